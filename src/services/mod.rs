pub mod assembler;
pub mod container;
pub mod converter;
pub mod ids;
pub mod loader;
pub mod results_dir;
pub mod steps;
pub mod suite_path;

pub use assembler::ResultAssembler;
pub use container::{build_container, write_container, CONTAINER_FILE};
pub use converter::{ConversionSummary, Converter};
pub use ids::{Clock, FixedClock, IdGenerator, RandomIds, SequentialIds, SystemClock};
pub use loader::{load_report, parse_report};
pub use results_dir::ResultsDir;
pub use steps::{build_steps, ArtifactNames, StepOutcome};
pub use suite_path::{split_path_parts, SuitePath};
