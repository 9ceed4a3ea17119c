use super::load_structure;
use crate::engine::config::InterfaceConfig;
use crate::engine::error::EngineError;
use crate::engine::interface::{InterfaceSet, find_interface_with_progress};
use crate::engine::progress::ProgressReporter;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct InterfaceResult {
    pub structure_id: String,
    pub interface: InterfaceSet,
}

#[instrument(skip_all, name = "interface_workflow")]
pub fn run(config: &InterfaceConfig, reporter: &ProgressReporter) -> Result<InterfaceResult, EngineError> {
    let structure = load_structure(&config.input_path, reporter)?;

    let interface = reporter.phase("Interface search", || {
        find_interface_with_progress(
            &structure,
            &config.chain_1,
            &config.chain_2,
            config.distance,
            reporter,
        )
    })?;

    Ok(InterfaceResult {
        structure_id: structure.id,
        interface,
    })
}
