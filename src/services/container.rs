use uuid::Uuid;

use crate::error::ConvertResult;
use crate::models::TestResultContainer;
use crate::services::ids::{Clock, IdGenerator};
use crate::services::results_dir::ResultsDir;

pub const CONTAINER_FILE: &str = "container.json";

/// Build the run container; start and stop are both taken now
pub fn build_container(
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
    children: Vec<Uuid>,
) -> TestResultContainer {
    let start = clock.now_millis();
    TestResultContainer {
        uuid: ids.next_id(),
        children,
        befores: Vec::new(),
        afters: Vec::new(),
        start,
        stop: clock.now_millis(),
    }
}

pub fn write_container(dir: &ResultsDir, container: &TestResultContainer) -> ConvertResult<()> {
    dir.write_json(CONTAINER_FILE, container)?;
    tracing::debug!(
        container_id = %container.uuid,
        children = container.children.len(),
        "Container written"
    );
    Ok(())
}
