use serde_json::Value;
use time::format_description::well_known::{Iso8601, Rfc2822, Rfc3339};
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::models::{
    display_value, is_blank, AssertionResult, Label, Parameter, Status, StatusDetails, TestRecord,
    TestResult,
};
use crate::services::ids::{to_epoch_millis, Clock, IdGenerator};
use crate::services::steps::StepOutcome;
use crate::services::suite_path::SuitePath;

pub const FRAMEWORK: &str = "bruno";
pub const LANGUAGE: &str = "javascript";
pub const NOT_AVAILABLE: &str = "n/a";
pub const DEFAULT_METHOD: &str = "GET";

/// Largest representable instant or span, 100 million days in milliseconds
pub const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Builds one Allure result document per Bruno test record
pub struct ResultAssembler<'a> {
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
    honor_source_status: bool,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(ids: &'a dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Self {
            ids,
            clock,
            honor_source_status: false,
        }
    }

    /// Fail records whose own `status` is not `pass` even without failing
    /// assertions
    pub fn honor_source_status(mut self, honor: bool) -> Self {
        self.honor_source_status = honor;
        self
    }

    pub fn assemble(&self, record: &TestRecord, id: Uuid, outcome: StepOutcome<'_>) -> TestResult {
        let start = self.record_timestamp(record);
        let stop = start.saturating_add(record_duration(record));

        let suite = SuitePath::from_path(record.path.as_deref());
        let method = record.method().unwrap_or(DEFAULT_METHOD);
        let url = record.url();

        let name = record
            .name
            .clone()
            .unwrap_or_else(|| format!("{} {}", method, url.unwrap_or_default()));
        let full_name = format!(
            "{}.{}",
            suite.package,
            record.name.as_deref().unwrap_or("test")
        );

        let status = if outcome.assertions_failed {
            Status::Failed
        } else {
            self.initial_status(record)
        };
        let status_details =
            (status == Status::Failed).then(|| failure_details(&outcome.failed_assertions));

        let response_code = record
            .response_status()
            .filter(|s| !is_blank(s))
            .map(display_value)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let description = record
            .description
            .clone()
            .or_else(|| record.name.clone())
            .unwrap_or_else(|| "No description provided".to_string());

        TestResult {
            uuid: id,
            history_id: self.ids.next_id(),
            name,
            full_name,
            status,
            status_details,
            steps: outcome.steps,
            parameters: vec![
                Parameter::new("Method", method),
                Parameter::new("URL", url.unwrap_or(NOT_AVAILABLE)),
                Parameter::new("Response Code", response_code),
            ],
            start,
            stop,
            labels: vec![
                Label::new("parentSuite", suite.parent_suite),
                Label::new("suite", suite.suite),
                Label::new("package", suite.package),
                Label::new("host", url.and_then(host_of).unwrap_or_else(|| NOT_AVAILABLE.to_string())),
                Label::new("framework", FRAMEWORK),
                Label::new("language", LANGUAGE),
            ],
            description_html: description.clone(),
            description,
        }
    }

    /// Record timestamp in epoch milliseconds, or now when absent or unusable
    pub fn record_timestamp(&self, record: &TestRecord) -> i64 {
        match record.timestamp.as_ref() {
            Some(value) if !is_blank(value) => parse_timestamp(value).unwrap_or_else(|| {
                tracing::warn!(timestamp = %value, "Unrecognized test timestamp, using current time");
                self.clock.now_millis()
            }),
            _ => self.clock.now_millis(),
        }
    }

    fn initial_status(&self, record: &TestRecord) -> Status {
        let reported_failure = record
            .status
            .as_deref()
            .is_some_and(|s| !s.eq_ignore_ascii_case("pass"));

        if self.honor_source_status && reported_failure {
            Status::Failed
        } else {
            Status::Passed
        }
    }
}

/// `response.responseTime`, else `duration`, else 0 (milliseconds).
/// Spans outside the representable range count as 0.
pub fn record_duration(record: &TestRecord) -> i64 {
    record
        .response_time()
        .or(record.duration)
        .and_then(to_millis)
        .unwrap_or(0)
}

fn to_millis(value: f64) -> Option<i64> {
    (value.is_finite() && value.abs() <= MAX_EPOCH_MILLIS).then(|| value.round() as i64)
}

fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(to_millis),
        Value::String(s) => parse_date_text(s.trim()).map(to_epoch_millis),
        _ => None,
    }
}

/// RFC 3339, ISO 8601 (date-only and offset-less forms read as UTC), then
/// RFC 2822
pub fn parse_date_text(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(text, &Iso8601::DEFAULT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|| {
            Date::parse(text, &Iso8601::DEFAULT)
                .ok()
                .map(|date| date.midnight().assume_utc())
        })
        .or_else(|| OffsetDateTime::parse(text, &Rfc2822).ok())
}

/// `host[:port]` of a URL; `None` when it does not parse or has no host
pub fn host_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn failure_details(failed: &[&AssertionResult]) -> StatusDetails {
    if failed.is_empty() {
        return StatusDetails {
            message: "Test failed".to_string(),
            trace: "No details".to_string(),
        };
    }

    let message = failed
        .iter()
        .map(|a| {
            format!(
                "{}: {}",
                a.description.as_deref().unwrap_or("Test"),
                a.error.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let trace = failed
        .iter()
        .map(|a| {
            format!(
                "Status: {}\nDescription: {}\nError: {}\nActual: {}\nExpected: {}",
                a.status.as_deref().unwrap_or("Failed"),
                a.description.as_deref().unwrap_or("No description"),
                a.error.as_deref().unwrap_or("No details"),
                render_optional(a.actual.as_ref()),
                render_optional(a.expected.as_ref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    StatusDetails { message, trace }
}

fn render_optional(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_else(|| "undefined".to_string())
}
