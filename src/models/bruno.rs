use serde::Deserialize;
use serde_json::{Map, Value};

/// One executed API test as recorded in a Bruno run report.
///
/// Every field is optional and decoded leniently: a value of the wrong JSON
/// type is treated as absent so a sparse record degrades into defaults
/// instead of failing the whole run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    /// Logical folder path, e.g. `Users/Get`
    #[serde(deserialize_with = "lenient::string")]
    pub path: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    /// Epoch milliseconds or an RFC 3339 string
    #[serde(deserialize_with = "lenient::present")]
    pub timestamp: Option<Value>,
    #[serde(deserialize_with = "lenient::number")]
    pub duration: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub request: Option<RequestInfo>,
    #[serde(deserialize_with = "lenient::nested")]
    pub response: Option<ResponseInfo>,
    #[serde(deserialize_with = "lenient::list")]
    pub pre_request_test_results: Vec<AssertionResult>,
    #[serde(deserialize_with = "lenient::list")]
    pub test_results: Vec<AssertionResult>,
    #[serde(deserialize_with = "lenient::list")]
    pub post_response_test_results: Vec<AssertionResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub method: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub headers: Option<Map<String, Value>>,
    /// `Some(Value::Null)` when the report carries an explicit `null` body
    #[serde(deserialize_with = "lenient::present")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseInfo {
    #[serde(deserialize_with = "lenient::present")]
    pub status: Option<Value>,
    #[serde(deserialize_with = "lenient::nested")]
    pub headers: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient::present")]
    pub data: Option<Value>,
    #[serde(deserialize_with = "lenient::number")]
    pub response_time: Option<f64>,
}

/// One pass/fail check evaluated against a request or response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssertionResult {
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub actual: Option<Value>,
    #[serde(deserialize_with = "lenient::present")]
    pub expected: Option<Value>,
}

impl AssertionResult {
    pub fn passed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("pass"))
    }
}

impl TestRecord {
    /// Decode a record, falling back to an all-default record when the value
    /// is not an object
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Pre-request, test, then post-response assertions
    pub fn assertions(&self) -> impl Iterator<Item = &AssertionResult> {
        self.pre_request_test_results
            .iter()
            .chain(&self.test_results)
            .chain(&self.post_response_test_results)
    }

    pub fn method(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.method.as_deref())
    }

    pub fn url(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.url.as_deref())
    }

    pub fn response_status(&self) -> Option<&Value> {
        self.response.as_ref().and_then(|r| r.status.as_ref())
    }

    pub fn response_time(&self) -> Option<f64> {
        self.response.as_ref().and_then(|r| r.response_time)
    }
}

/// Text form of a JSON value: strings verbatim, everything else compact JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a value counts as "no value" for fallback purposes
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Strings as-is, scalars as their text, empty and null as absent
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    /// Keeps an explicit `null` as `Some(Value::Null)`
    pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Some)
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }
}
