//! # biface Core Library
//!
//! Analysis of protein-protein complexes: structure preparation, detection of the
//! residues that form the interface between two chains, and interaction energies
//! across that interface.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split used throughout the project:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Model`), the
//!   adapter to the `pdbtbx` file readers, parameter tables and pure potentials.
//!
//! - **[`engine`]: The Logic Core.** Neighbor search, interface detection, the structure
//!   checking stages and the interaction energy task, together with configuration,
//!   progress reporting and the engine error type.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures (`check`, `interface`,
//!   `energy`) that take an explicit configuration, load their inputs and return results.

pub mod core;
pub mod engine;
pub mod workflows;
