use crate::core::models::builder::BuildError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureIoError {
    #[error("Cannot access structure file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse '{path}': {}", .messages.join("; "))]
    Parse { path: PathBuf, messages: Vec<String> },
    #[error("Failed to write '{path}': {}", .messages.join("; "))]
    Write { path: PathBuf, messages: Vec<String> },
    #[error("Unsupported structure format for '{0}' (expected .pdb, .ent, .cif or .mmcif)")]
    UnsupportedFormat(PathBuf),
    #[error("Path '{0}' is not valid UTF-8")]
    InvalidPath(PathBuf),
    #[error("Structure conversion failed: {0}")]
    Conversion(String),
    #[error("Structure conversion failed: {0}")]
    Build(#[from] BuildError),
}
