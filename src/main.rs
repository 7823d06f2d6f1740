use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bruno_allure::config::{Config, LogFormat, ENV_HONOR_STATUS, ENV_LOG_FORMAT, ENV_OUTPUT_DIR};
use bruno_allure::Converter;

/// Convert a Bruno run report into Allure result files
#[derive(Parser, Debug)]
#[command(
    name = "bruno-to-allure",
    version,
    after_help = "ENVIRONMENT VARIABLES:\n\
        BRUNO_ALLURE_OUTPUT_DIR      Output directory (default: allure-results next to the binary)\n\
        BRUNO_ALLURE_HONOR_STATUS    Fail tests whose own status is not \"pass\"\n\
        BRUNO_ALLURE_LOG_FORMAT      text or json\n\
        RUST_LOG                     Log filter (default: warn)"
)]
struct Args {
    /// Bruno JSON report to convert
    report: PathBuf,

    /// Directory to write Allure results into
    output_dir: Option<PathBuf>,

    /// Fail tests whose own status is not "pass" even when every assertion passed
    #[arg(long)]
    honor_status: bool,

    /// Log output format: text or json
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(summary) => {
            println!("✅ {}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error converting Bruno -> Allure: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<bruno_allure::ConversionSummary> {
    let mut config = Config::from_env().with_context(|| {
        format!(
            "Failed to load configuration ({}, {}, {})",
            ENV_OUTPUT_DIR, ENV_HONOR_STATUS, ENV_LOG_FORMAT
        )
    })?;

    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    if args.honor_status {
        config = config.with_honor_source_status(true);
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }

    init_tracing(config.log_format);
    tracing::debug!(?config, "Configuration loaded");

    let converter = Converter::new(config);
    converter
        .convert(&args.report)
        .with_context(|| format!("Failed to convert {}", args.report.display()))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
