//! # Workflows Module
//!
//! End-to-end entry points used by front ends. Each workflow takes a validated settings
//! object from [`crate::engine::config`], loads its inputs from disk, runs the engine and
//! returns a result value; nothing is printed here.
//!
//! - **Interface** ([`interface`]) - Interface residues between two chains of a structure file
//! - **Check** ([`check`]) - Structure checking pipeline with optional output file
//! - **Energy** ([`energy`]) - Interface detection followed by interaction energy evaluation

pub mod check;
pub mod energy;
pub mod interface;

use crate::core::io::read_structure;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, warn};

/// Reads a structure file and logs the parser's warnings.
pub(crate) fn load_structure(path: &Path, reporter: &ProgressReporter) -> Result<Structure, EngineError> {
    let (structure, warnings) = reporter.phase("Loading structure", || read_structure(path))?;
    for message in &warnings {
        warn!(path = %path.display(), "{}", message);
    }
    info!(
        path = %path.display(),
        models = structure.model_count(),
        atoms = structure.atom_count(),
        "Structure loaded."
    );
    Ok(structure)
}
