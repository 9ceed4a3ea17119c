use super::error::StructureIoError;
use super::mmcif::CifFile;
use super::pdb::PdbFile;
use super::traits::{ReadOutcome, StructureFile};
use crate::core::models::structure::Structure;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mmcif,
}

impl StructureFormat {
    /// Chooses a format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, StructureIoError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdb") | Some("ent") => Ok(StructureFormat::Pdb),
            Some("cif") | Some("mmcif") => Ok(StructureFormat::Mmcif),
            _ => Err(StructureIoError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureFormat::Pdb => write!(f, "{}", PdbFile::NAME),
            StructureFormat::Mmcif => write!(f, "{}", CifFile::NAME),
        }
    }
}

/// Reads a PDB or mmCIF file, choosing the format from its extension.
pub fn read_structure(path: &Path) -> Result<ReadOutcome, StructureIoError> {
    match StructureFormat::from_path(path)? {
        StructureFormat::Pdb => PdbFile::read_from_path(path),
        StructureFormat::Mmcif => CifFile::read_from_path(path),
    }
}

/// Writes a PDB or mmCIF file, choosing the format from its extension.
pub fn write_structure(structure: &Structure, path: &Path) -> Result<(), StructureIoError> {
    match StructureFormat::from_path(path)? {
        StructureFormat::Pdb => PdbFile::write_to_path(structure, path),
        StructureFormat::Mmcif => CifFile::write_to_path(structure, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn from_path_recognizes_known_extensions() {
        let cases = [
            ("1abc.pdb", StructureFormat::Pdb),
            ("pdb1abc.ent", StructureFormat::Pdb),
            ("1abc.cif", StructureFormat::Mmcif),
            ("1ABC.MMCIF", StructureFormat::Mmcif),
            ("1ABC.PDB", StructureFormat::Pdb),
        ];
        for (name, expected) in cases {
            assert_eq!(StructureFormat::from_path(Path::new(name)).unwrap(), expected);
        }
    }

    #[test]
    fn from_path_rejects_unknown_or_missing_extension() {
        for name in ["model.xyz", "model", "model.pdb.gz"] {
            let result = StructureFormat::from_path(&PathBuf::from(name));
            assert!(matches!(result, Err(StructureIoError::UnsupportedFormat(_))));
        }
    }

    #[test]
    fn read_structure_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_structure(&dir.path().join("missing.xyz"));
        assert!(matches!(result, Err(StructureIoError::UnsupportedFormat(_))));
    }
}
