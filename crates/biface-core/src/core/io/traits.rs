use super::convert;
use super::error::StructureIoError;
use crate::core::models::structure::Structure;
use pdbtbx::{PDB, PDBError, StrictnessLevel};
use std::path::Path;
use tracing::debug;

/// Result of reading a structure: the structure and the non-fatal parser warnings.
pub type ReadOutcome = (Structure, Vec<String>);

/// Defines the interface for reading and writing structure file formats.
///
/// Implementors only provide the two `pdbtbx` entry points of their format; the
/// conversion to and from [`Structure`] and the error mapping are shared.
pub trait StructureFile {
    /// Human-readable format name used in log messages.
    const NAME: &'static str;

    /// Parses `path` with `pdbtbx`.
    fn open_raw(path: &str, level: StrictnessLevel) -> Result<(PDB, Vec<PDBError>), Vec<PDBError>>;

    /// Serialises `pdb` to `path` with `pdbtbx`.
    fn save_raw(pdb: &PDB, path: &str, level: StrictnessLevel) -> Result<(), Vec<PDBError>>;

    /// Reads a structure from a file path.
    ///
    /// Parsing is permissive: recoverable problems are returned as warnings next to the
    /// structure instead of failing the read.
    ///
    /// # Errors
    ///
    /// Returns [`StructureIoError::Io`] when the file cannot be accessed and
    /// [`StructureIoError::Parse`] when `pdbtbx` rejects its contents.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ReadOutcome, StructureIoError> {
        let path = path.as_ref();
        std::fs::metadata(path).map_err(|source| StructureIoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let path_str = path
            .to_str()
            .ok_or_else(|| StructureIoError::InvalidPath(path.to_path_buf()))?;

        debug!(path = %path.display(), format = Self::NAME, "Parsing structure file");
        let (pdb, warnings) =
            Self::open_raw(path_str, StrictnessLevel::Loose).map_err(|errors| {
                StructureIoError::Parse {
                    path: path.to_path_buf(),
                    messages: errors.iter().map(ToString::to_string).collect(),
                }
            })?;

        let fallback_id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("structure");
        let structure = convert::from_pdbtbx(&pdb, fallback_id)?;
        Ok((structure, warnings.iter().map(ToString::to_string).collect()))
    }

    /// Writes a structure to a file path, overwriting any existing file.
    fn write_to_path<P: AsRef<Path>>(structure: &Structure, path: P) -> Result<(), StructureIoError> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| StructureIoError::InvalidPath(path.to_path_buf()))?;

        let pdb = convert::to_pdbtbx(structure)?;
        debug!(path = %path.display(), format = Self::NAME, "Writing structure file");
        Self::save_raw(&pdb, path_str, StrictnessLevel::Loose).map_err(|errors| {
            StructureIoError::Write {
                path: path.to_path_buf(),
                messages: errors.iter().map(ToString::to_string).collect(),
            }
        })
    }
}
