use super::progress_handler;
use crate::cli::InterfaceArgs;
use crate::config::build_interface_config;
use crate::error::Result;
use crate::report;
use biface::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: InterfaceArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_interface_config(&args.pair)?;

    let progress_handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Searching interface between chains {} and {} within {} Å",
        config.chain_1, config.chain_2, config.distance
    );
    let result = workflows::interface::run(&config, &reporter)?;

    if result.interface.is_empty() {
        warn!(
            "No residues of chains {} and {} are within {} Å of each other.",
            config.chain_1, config.chain_2, config.distance
        );
    }
    info!(
        structure = %result.structure_id,
        residues = result.interface.len(),
        "Interface search complete."
    );

    let mut out = report::open_output(args.output.as_deref())?;
    report::write_interface(&mut *out, &result, args.format)?;
    if let Some(path) = &args.output {
        println!("✓ Interface report written to: {}", path.display());
    }
    Ok(())
}
