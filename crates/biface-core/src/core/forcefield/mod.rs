//! # Force Field Module
//!
//! Parameter tables and pair potentials used to score the interaction between two
//! chains.
//!
//! ## Key Components
//!
//! - [`params`] - The residue library (atom type and partial charge per residue atom) and
//!   the van der Waals parameter set (well depth and radius per atom type)
//! - [`potentials`] - Lennard-Jones 12-6 and Coulomb pair terms, plus the
//!   Mehler-Solmajer distance-dependent dielectric
//!
//! ## Usage
//!
//! ```ignore
//! use biface::core::forcefield::params::{ResidueLibrary, VdwParamSet};
//!
//! let library = ResidueLibrary::load(Path::new("data/aaLib.lib"))?;
//! let vdw = VdwParamSet::load(Path::new("data/vdwprm"))?;
//! let params = library.get_params("SER", "OG");
//! ```

pub mod params;
pub mod potentials;
