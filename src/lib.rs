// Library crate for bruno-allure
// Exports the conversion pipeline for the CLI binary and tests

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{Config, ConfigError, LogFormat};
pub use error::{ConvertError, ConvertResult};
pub use services::{ConversionSummary, Converter};
