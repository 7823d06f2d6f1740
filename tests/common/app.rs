use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use bruno_allure::config::Config;
use bruno_allure::models::{TestResult, TestResultContainer};
use bruno_allure::services::{FixedClock, SequentialIds, CONTAINER_FILE};
use bruno_allure::{ConversionSummary, ConvertResult, Converter};

/// Clock value used for every "now" in tests
#[allow(dead_code)]
pub const TEST_NOW: i64 = 1_700_000_000_000;

/// Test application wrapper: a scratch directory holding the source report
/// and the output directory, plus a deterministic converter
#[allow(dead_code)]
pub struct TestApp {
    pub tmp: TempDir,
    pub source: PathBuf,
    pub output_dir: PathBuf,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let source = tmp.path().join("bruno-report.json");
        let output_dir = tmp.path().join("allure-results");

        Self {
            tmp,
            source,
            output_dir,
        }
    }

    pub fn config(&self) -> Config {
        Config::new(&self.output_dir)
    }

    pub fn converter(&self) -> Converter {
        self.converter_with(self.config())
    }

    pub fn converter_with(&self, config: Config) -> Converter {
        Converter::new(config)
            .with_ids(SequentialIds::new())
            .with_clock(FixedClock::new(TEST_NOW))
    }

    /// Write the source report and convert it
    pub fn convert(&self, report: &Value) -> ConvertResult<ConversionSummary> {
        self.write_source(&report.to_string());
        self.converter().convert(&self.source)
    }

    pub fn write_source(&self, raw: &str) {
        fs::write(&self.source, raw).expect("Failed to write source report");
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output_dir)
            .expect("Failed to read output dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn read(&self, file_name: &str) -> String {
        fs::read_to_string(self.output_dir.join(file_name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", file_name, e))
    }

    pub fn read_json(&self, file_name: &str) -> Value {
        serde_json::from_str(&self.read(file_name)).expect("Output is not JSON")
    }

    pub fn container(&self) -> TestResultContainer {
        serde_json::from_str(&self.read(CONTAINER_FILE)).expect("Invalid container")
    }

    pub fn result(&self, id: Uuid) -> TestResult {
        serde_json::from_str(&self.read(&format!("{}-result.json", id))).expect("Invalid result")
    }

    /// Results in container order
    pub fn results(&self) -> Vec<TestResult> {
        self.container()
            .children
            .into_iter()
            .map(|id| self.result(id))
            .collect()
    }
}
