//! Reading and writing structure files.
//!
//! Parsing and serialisation of PDB and mmCIF text is delegated to `pdbtbx`; this module
//! converts between its object tree and the arena-based [`Structure`](crate::core::models::structure::Structure)
//! used by the rest of the crate, and picks a format from a file extension.

mod convert;
pub mod error;
pub mod format;
pub mod mmcif;
pub mod pdb;
pub mod traits;

pub use error::StructureIoError;
pub use format::{StructureFormat, read_structure, write_structure};
pub use mmcif::CifFile;
pub use pdb::PdbFile;
pub use traits::StructureFile;
