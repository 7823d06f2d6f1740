use std::path::PathBuf;

/// Conversion error type surfaced by every pipeline stage
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    // Source report errors
    #[error("Invalid Bruno report format")]
    InvalidFormat,

    #[error("Failed to parse Bruno report: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    // Filesystem errors
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for pipeline stages
pub type ConvertResult<T> = Result<T, ConvertError>;
