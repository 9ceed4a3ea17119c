use super::progress_handler;
use crate::cli::CheckArgs;
use crate::config::build_check_config;
use crate::error::Result;
use crate::report;
use biface::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: CheckArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_check_config(&args)?;
    let stage_names: Vec<_> = config.stages.iter().map(|s| s.name()).collect();
    info!("Running checking stages: {}", stage_names.join(", "));

    let progress_handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::check::run(&config, &reporter)?;
    info!(
        atoms = result.structure.atom_count(),
        "Checking pipeline finished."
    );

    let mut out = report::open_output(None)?;
    report::write_stage_reports(&mut *out, &result.reports)?;
    if let Some(path) = &config.output_path {
        println!("✓ Checked structure written to: {}", path.display());
    }
    Ok(())
}
