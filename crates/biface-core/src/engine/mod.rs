//! # Engine Module
//!
//! The computational layer: interface detection between two chains, the structure
//! checking pipeline and interface energy evaluation.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated settings objects and their builders
//! - **Neighbor Search** ([`neighbors`]) - Radius queries over atom positions backed by a k-d tree
//! - **Interface Detection** ([`interface`]) - Residues of two chains lying within a distance cutoff
//! - **Structure Checking** ([`checking`]) - Independent, composable clean-up and diagnostic stages
//! - **Interface Energy** ([`energy`]) - Electrostatic and van der Waals interaction between chains
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Every entry point takes the structure by reference (or by value for checking stages
//! that return a modified copy) and keeps no state between calls.

pub mod checking;
pub mod config;
pub mod energy;
pub mod error;
pub mod interface;
pub mod neighbors;
pub mod progress;
