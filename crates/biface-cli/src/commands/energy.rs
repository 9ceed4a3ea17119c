use super::progress_handler;
use crate::cli::EnergyArgs;
use crate::config::build_energy_config;
use crate::error::Result;
use crate::report;
use biface::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: EnergyArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_energy_config(&args)?;

    let progress_handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the interface energy workflow...");
    let result = workflows::energy::run(&config, &reporter)?;

    if result.energy.skipped_atoms > 0 {
        warn!(
            "{} interface atom(s) had no parameters and were left out of the energy.",
            result.energy.skipped_atoms
        );
    }
    info!(
        structure = %result.structure_id,
        total = result.energy.total(),
        "Interface energy computed."
    );

    let mut out = report::open_output(args.output.as_deref())?;
    report::write_energy(&mut *out, &result, args.format)?;
    if let Some(path) = &args.output {
        println!("✓ Energy report written to: {}", path.display());
    }
    Ok(())
}
