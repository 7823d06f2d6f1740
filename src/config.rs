use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable for the output directory
pub const ENV_OUTPUT_DIR: &str = "BRUNO_ALLURE_OUTPUT_DIR";

/// Environment variable for honoring the source record's own status
pub const ENV_HONOR_STATUS: &str = "BRUNO_ALLURE_HONOR_STATUS";

/// Environment variable for the log output format
pub const ENV_LOG_FORMAT: &str = "BRUNO_ALLURE_LOG_FORMAT";

/// Directory name used when no output directory is given
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "allure-results";

/// Log output format for the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Invalid(ENV_LOG_FORMAT)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Output
    pub output_dir: PathBuf,

    // Status handling
    pub honor_source_status: bool,

    // Logging
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            output_dir: env::var(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),

            honor_source_status: match env::var(ENV_HONOR_STATUS) {
                Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid(ENV_HONOR_STATUS))?,
                Err(_) => false,
            },

            log_format: match env::var(ENV_LOG_FORMAT) {
                Ok(raw) => raw.parse()?,
                Err(_) => LogFormat::default(),
            },
        })
    }

    /// Configuration writing into `output_dir` with every other value defaulted
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            honor_source_status: false,
            log_format: LogFormat::default(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_honor_source_status(mut self, honor: bool) -> Self {
        self.honor_source_status = honor;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// `allure-results` next to the running executable, or under the working
/// directory when the executable location cannot be resolved
pub fn default_output_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_OUTPUT_DIR_NAME)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
