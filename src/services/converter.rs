use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ConvertResult;
use crate::models::Status;
use crate::services::assembler::ResultAssembler;
use crate::services::container::{build_container, write_container};
use crate::services::ids::{Clock, IdGenerator, RandomIds, SystemClock};
use crate::services::loader::load_report;
use crate::services::results_dir::ResultsDir;
use crate::services::steps::build_steps;

/// Outcome of one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output_dir: PathBuf,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    /// Entries present in the output directory after the run
    pub files_in_dir: usize,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} files in {}",
            self.files_in_dir,
            self.output_dir.display()
        )
    }
}

/// Bruno report to Allure results converter
pub struct Converter {
    config: Config,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Converter {
    /// Create a converter with random ids and the system clock
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ids: Box::new(RandomIds),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert `source` into the configured output directory.
    ///
    /// Records are processed in source order; files written before a failure
    /// are left in place.
    pub fn convert(&self, source: &Path) -> ConvertResult<ConversionSummary> {
        let records = load_report(source)?;
        let dir = ResultsDir::create(self.config.output_dir())?;

        let assembler = ResultAssembler::new(self.ids.as_ref(), self.clock.as_ref())
            .honor_source_status(self.config.honor_source_status);

        let mut children = Vec::with_capacity(records.len());
        let mut failed = 0;

        for record in &records {
            let id = self.ids.next_id();
            let outcome = build_steps(record, id, &dir)?;
            let result = assembler.assemble(record, id, outcome);

            dir.write_json(&result.file_name(), &result)?;
            tracing::debug!(
                test_id = %id,
                name = %result.name,
                status = result.status.as_str(),
                "Result written"
            );

            if result.status == Status::Failed {
                failed += 1;
            }
            children.push(id);
        }

        let container = build_container(self.ids.as_ref(), self.clock.as_ref(), children);
        write_container(&dir, &container)?;

        let summary = ConversionSummary {
            output_dir: dir.root().to_path_buf(),
            total_tests: records.len(),
            passed: records.len() - failed,
            failed,
            files_in_dir: dir.file_count()?,
        };

        tracing::info!(
            total = summary.total_tests,
            passed = summary.passed,
            failed = summary.failed,
            files = summary.files_in_dir,
            "Conversion finished"
        );

        Ok(summary)
    }
}
