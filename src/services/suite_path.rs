/// Segment used when a record carries no folder path
pub const UNCATEGORIZED: &str = "uncategorized";

/// Split a Bruno folder path into trimmed, non-empty segments.
///
/// Both `/` and `\` separate segments and runs of separators collapse.
/// Absent or empty paths yield `["uncategorized"]`.
pub fn split_path_parts(path: Option<&str>) -> Vec<String> {
    let parts: Vec<String> = path
        .unwrap_or_default()
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        vec![UNCATEGORIZED.to_string()]
    } else {
        parts
    }
}

/// Suite labels derived from a folder path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitePath {
    pub parent_suite: String,
    pub suite: String,
    /// Dotted join of every segment
    pub package: String,
}

impl SuitePath {
    pub fn from_path(path: Option<&str>) -> Self {
        Self::from_parts(&split_path_parts(path))
    }

    pub fn from_parts(parts: &[String]) -> Self {
        let parent_suite = parts.first().map(String::as_str).unwrap_or(UNCATEGORIZED);
        let suite = parts.get(1).map(String::as_str).unwrap_or(parent_suite);

        Self {
            parent_suite: parent_suite.to_string(),
            suite: suite.to_string(),
            package: if parts.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                parts.join(".")
            },
        }
    }
}
