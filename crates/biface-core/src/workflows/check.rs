use super::load_structure;
use crate::core::io::write_structure;
use crate::core::models::structure::Structure;
use crate::engine::checking::{CheckPipeline, StageReport};
use crate::engine::config::CheckConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub structure: Structure,
    pub reports: Vec<StageReport>,
}

#[instrument(skip_all, name = "check_workflow")]
pub fn run(config: &CheckConfig, reporter: &ProgressReporter) -> Result<CheckResult, EngineError> {
    let structure = load_structure(&config.input_path, reporter)?;

    let pipeline = CheckPipeline::new(config.stages.clone());
    let (structure, reports) = pipeline.run(structure, reporter)?;

    if let Some(output_path) = &config.output_path {
        reporter.phase("Saving structure", || write_structure(&structure, output_path))?;
        info!(path = %output_path.display(), "Checked structure written.");
    }

    Ok(CheckResult { structure, reports })
}
