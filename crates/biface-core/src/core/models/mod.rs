//! # Core Models Module
//!
//! Data structures used to represent macromolecular structures.
//!
//! A [`structure::Structure`] owns one or more [`model::Model`]s. Each model is an arena
//! (backed by `slotmap`) holding chains, residues and atoms addressed by stable keys
//! from [`ids`], so removing a residue never invalidates the keys of the others.
//!
//! ```ignore
//! use biface::core::models::atom::Atom;
//! use biface::core::models::builder::StructureBuilder;
//! use biface::core::models::ids::ResidueId;
//! use biface::core::models::residue::ResidueKind;
//! use nalgebra::Point3;
//!
//! let mut builder = StructureBuilder::new("complex");
//! builder.start_chain("A");
//! builder
//!     .start_residue(1, None, "GLY", ResidueKind::Standard)?
//!     .add_atom(Atom::new(1, "CA", ResidueId::default(), Point3::origin()))?;
//! let structure = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod model;
pub mod residue;
pub mod structure;

#[cfg(test)]
pub(crate) mod fixtures;
