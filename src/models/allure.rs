use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attachment content type used for every artifact
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Test or step outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    pub fn from_failed(failed: bool) -> Self {
        if failed {
            Self::Failed
        } else {
            Self::Passed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Lifecycle stage; converted results are always finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetails {
    pub message: String,
    pub trace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// File name relative to the results directory
    pub source: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl Attachment {
    pub fn json(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Named sub-event of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub name: String,
    pub status: Status,
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
}

impl StepResult {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
            stage: Stage::Finished,
            status_details: None,
            attachments: None,
            parameters: None,
        }
    }

    pub fn with_details(mut self, details: StatusDetails) -> Self {
        self.status_details = Some(details);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// One `<uuid>-result.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub uuid: Uuid,
    pub history_id: Uuid,
    pub name: String,
    pub full_name: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    pub steps: Vec<StepResult>,
    pub parameters: Vec<Parameter>,
    /// Epoch milliseconds
    pub start: i64,
    pub stop: i64,
    pub labels: Vec<Label>,
    pub description: String,
    pub description_html: String,
}

impl TestResult {
    pub fn file_name(&self) -> String {
        result_file_name(self.uuid)
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.value.as_str())
    }
}

/// Per-run `container.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResultContainer {
    pub uuid: Uuid,
    pub children: Vec<Uuid>,
    pub befores: Vec<serde_json::Value>,
    pub afters: Vec<serde_json::Value>,
    pub start: i64,
    pub stop: i64,
}

pub fn result_file_name(id: Uuid) -> String {
    format!("{}-result.json", id)
}
