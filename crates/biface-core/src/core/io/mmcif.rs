use super::traits::StructureFile;
use pdbtbx::{PDB, PDBError, StrictnessLevel};

/// The PDBx/mmCIF format.
pub struct CifFile;

impl StructureFile for CifFile {
    const NAME: &'static str = "mmCIF";

    fn open_raw(path: &str, level: StrictnessLevel) -> Result<(PDB, Vec<PDBError>), Vec<PDBError>> {
        pdbtbx::open_mmcif(path, level)
    }

    fn save_raw(pdb: &PDB, path: &str, level: StrictnessLevel) -> Result<(), Vec<PDBError>> {
        pdbtbx::save_mmcif(pdb, path, level)
    }
}
