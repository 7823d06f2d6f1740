use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ConvertResult;
use crate::models::{
    display_value, AssertionResult, Attachment, Parameter, Status, StatusDetails, StepResult,
    TestRecord,
};
use crate::services::results_dir::{to_pretty_json, ResultsDir};

pub const NO_REQUEST_BODY: &str = "/* no request body */";
pub const NO_RESPONSE_BODY: &str = "/* no response body */";

/// Artifact file names for one test record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub request_headers: String,
    pub request_body: String,
    pub response_headers: String,
    pub response_body: String,
}

impl ArtifactNames {
    pub fn for_id(id: Uuid) -> Self {
        Self {
            request_headers: format!("{}-request-headers.json", id),
            request_body: format!("{}-request.json", id),
            response_headers: format!("{}-response-headers.json", id),
            response_body: format!("{}-response.json", id),
        }
    }
}

/// Steps for one record plus what the result assembler needs to know
#[derive(Debug, Clone)]
pub struct StepOutcome<'a> {
    pub steps: Vec<StepResult>,
    pub assertions_failed: bool,
    /// Failing assertions in evaluation order
    pub failed_assertions: Vec<&'a AssertionResult>,
}

/// Write the four artifact files for `record` and build its step sequence:
/// one step per assertion, then Request Headers, Request Body,
/// Response Headers and Response Body.
pub fn build_steps<'a>(
    record: &'a TestRecord,
    id: Uuid,
    dir: &ResultsDir,
) -> ConvertResult<StepOutcome<'a>> {
    let names = ArtifactNames::for_id(id);
    let empty = Map::new();

    let request = record.request.as_ref();
    let request_headers = request.and_then(|r| r.headers.as_ref()).unwrap_or(&empty);
    let request_body = body_text(
        &names.request_body,
        request.and_then(|r| r.data.as_ref()),
        NO_REQUEST_BODY,
    )?;

    let response = record.response.as_ref();
    let response_headers = response.and_then(|r| r.headers.as_ref()).unwrap_or(&empty);
    let response_body = body_text(
        &names.response_body,
        response.and_then(|r| r.data.as_ref()),
        NO_RESPONSE_BODY,
    )?;

    dir.write_json(&names.request_headers, request_headers)?;
    dir.write_text(&names.request_body, &request_body)?;
    dir.write_json(&names.response_headers, response_headers)?;
    dir.write_text(&names.response_body, &response_body)?;

    let mut steps = Vec::new();
    let mut failed_assertions = Vec::new();

    for assertion in record.assertions() {
        let step = assertion_step(assertion);
        if step.status == Status::Failed {
            failed_assertions.push(assertion);
        }
        steps.push(step);
    }

    let assertions_failed = !failed_assertions.is_empty();

    steps.push(
        StepResult::new("Request Headers", Status::Passed)
            .with_attachment(Attachment::json("Request Headers", &names.request_headers))
            .with_parameters(header_parameters(request_headers)),
    );
    steps.push(
        StepResult::new("Request Body", Status::Passed)
            .with_attachment(Attachment::json("Request Body", &names.request_body)),
    );
    steps.push(
        StepResult::new("Response Headers", Status::Passed)
            .with_attachment(Attachment::json("Response Headers", &names.response_headers))
            .with_parameters(header_parameters(response_headers)),
    );
    steps.push(
        StepResult::new("Response Body", Status::from_failed(assertions_failed))
            .with_attachment(Attachment::json("Response Body", &names.response_body)),
    );

    Ok(StepOutcome {
        steps,
        assertions_failed,
        failed_assertions,
    })
}

fn assertion_step(assertion: &AssertionResult) -> StepResult {
    let description = assertion.description.as_deref();
    let step = StepResult::new(
        description.unwrap_or("Assertion"),
        Status::from_failed(!assertion.passed()),
    );

    if assertion.passed() {
        return step;
    }

    step.with_details(StatusDetails {
        message: description.unwrap_or("Assertion failed").to_string(),
        trace: assertion
            .error
            .clone()
            .unwrap_or_else(|| "No description".to_string()),
    })
}

/// Body file contents: strings verbatim, other values pretty JSON, absent
/// bodies the placeholder
pub fn body_text(name: &str, data: Option<&Value>, placeholder: &str) -> ConvertResult<String> {
    match data {
        None => Ok(placeholder.to_string()),
        Some(Value::String(raw)) => Ok(raw.clone()),
        Some(value) => to_pretty_json(name, value),
    }
}

fn header_parameters(headers: &Map<String, Value>) -> Vec<Parameter> {
    headers
        .iter()
        .map(|(name, value)| Parameter::new(name, display_value(value)))
        .collect()
}
