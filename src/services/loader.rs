use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ConvertError, ConvertResult};
use crate::models::TestRecord;

/// Read a Bruno report file and return its test records in source order
pub fn load_report(path: &Path) -> ConvertResult<Vec<TestRecord>> {
    let raw = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    let records = parse_report(&raw)?;
    tracing::info!(path = %path.display(), records = records.len(), "Loaded Bruno report");
    Ok(records)
}

/// Parse report text. A top-level array is unwrapped to its first element;
/// the report must then carry a `results` array.
pub fn parse_report(raw: &str) -> ConvertResult<Vec<TestRecord>> {
    let parsed: Value = serde_json::from_str(raw)?;

    let report = match parsed {
        Value::Array(items) => items.into_iter().next().ok_or(ConvertError::InvalidFormat)?,
        other => other,
    };

    match report {
        Value::Object(mut fields) => match fields.remove("results") {
            Some(Value::Array(results)) => Ok(results.into_iter().map(TestRecord::from_value).collect()),
            _ => Err(ConvertError::InvalidFormat),
        },
        _ => Err(ConvertError::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_report() {
        let records = parse_report(r#"{"results":[{"name":"a"},{"name":"b"}]}"#).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_wrapped_report() {
        let records = parse_report(r#"[{"results":[{"name":"a"}]},{"results":[]}]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_results_are_valid() {
        assert!(parse_report(r#"{"results":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_results_is_invalid() {
        for raw in [r#"{}"#, r#"[]"#, r#"{"results":null}"#, r#"{"results":{}}"#, "42"] {
            assert!(
                matches!(parse_report(raw), Err(ConvertError::InvalidFormat)),
                "expected InvalidFormat for {raw}"
            );
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(parse_report("{ nope"), Err(ConvertError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_report(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
