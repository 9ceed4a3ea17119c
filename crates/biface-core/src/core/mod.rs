//! # Core Module
//!
//! Fundamental building blocks shared by every analysis in biface.
//!
//! - **Molecular Representation** ([`models`]) - Structures, models, chains, residues and atoms
//! - **File I/O** ([`io`]) - PDB/mmCIF reading and writing through `pdbtbx`
//! - **Force Field** ([`forcefield`]) - Residue library, van der Waals parameters and potentials
//! - **Utilities** ([`utils`]) - Residue and atom name classification, geometry helpers

pub mod forcefield;
pub mod io;
pub mod models;
pub mod utils;
