use super::traits::StructureFile;
use pdbtbx::{PDB, PDBError, StrictnessLevel};

/// The PDB text format.
pub struct PdbFile;

impl StructureFile for PdbFile {
    const NAME: &'static str = "PDB";

    fn open_raw(path: &str, level: StrictnessLevel) -> Result<(PDB, Vec<PDBError>), Vec<PDBError>> {
        pdbtbx::open_pdb(path, level)
    }

    fn save_raw(pdb: &PDB, path: &str, level: StrictnessLevel) -> Result<(), Vec<PDBError>> {
        pdbtbx::save_pdb(pdb, path, level)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::models::residue::ResidueKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn atom_line(
        record: &str,
        serial: usize,
        name: &str,
        alt_loc: char,
        res_name: &str,
        chain: char,
        res_seq: isize,
        pos: (f64, f64, f64),
        occupancy: f64,
        element: &str,
    ) -> String {
        let padded_name = if name.len() < 4 {
            format!(" {}", name)
        } else {
            name.to_string()
        };
        format!(
            "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            record,
            serial,
            padded_name,
            alt_loc,
            res_name,
            chain,
            res_seq,
            pos.0,
            pos.1,
            pos.2,
            occupancy,
            20.0,
            element
        )
    }

    pub(crate) fn write_pdb(lines: &[String]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdb").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        writeln!(file, "END").unwrap();
        file.flush().unwrap();
        file
    }

    fn two_chain_lines() -> Vec<String> {
        vec![
            atom_line("ATOM", 1, "N", ' ', "ALA", 'A', 1, (0.0, 0.0, 0.0), 1.0, "N"),
            atom_line("ATOM", 2, "CA", ' ', "ALA", 'A', 1, (1.5, 0.0, 0.0), 1.0, "C"),
            atom_line("ATOM", 3, "N", ' ', "GLY", 'B', 5, (4.0, 0.0, 0.0), 1.0, "N"),
            atom_line("HETATM", 4, "O", ' ', "HOH", 'B', 101, (9.0, 0.0, 0.0), 1.0, "O"),
        ]
    }

    #[test]
    fn reads_chains_residues_and_atoms() {
        let file = write_pdb(&two_chain_lines());
        let (structure, _warnings) = PdbFile::read_from_path(file.path()).unwrap();

        let model = structure.first_model().unwrap();
        assert_eq!(model.atom_count(), 4);
        let ids: Vec<&str> = model.chains_iter().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);

        let chain_b = model.find_chain_by_id("B").unwrap();
        let water = model.find_residue(chain_b, 101, None).unwrap();
        assert_eq!(model.residue(water).unwrap().kind, ResidueKind::Water);
        let gly = model.find_residue(chain_b, 5, None).unwrap();
        assert_eq!(model.residue(gly).unwrap().kind, ResidueKind::Standard);
    }

    #[test]
    fn reads_coordinates_and_elements() {
        let file = write_pdb(&two_chain_lines());
        let (structure, _) = PdbFile::read_from_path(file.path()).unwrap();
        let model = structure.first_model().unwrap();
        let chain_a = model.find_chain_by_id("A").unwrap();
        let ca = model
            .chain_atoms(chain_a)
            .map(|(_, atom)| atom)
            .find(|atom| atom.name == "CA")
            .unwrap();
        assert!((ca.position.x - 1.5).abs() < 1e-9);
        assert_eq!(ca.element, "C");
    }

    #[test]
    fn alternative_locations_become_separate_atoms() {
        let lines = vec![
            atom_line("ATOM", 1, "CA", ' ', "SER", 'A', 1, (0.0, 0.0, 0.0), 1.0, "C"),
            atom_line("ATOM", 2, "OG", 'A', "SER", 'A', 1, (1.0, 0.0, 0.0), 0.6, "O"),
            atom_line("ATOM", 3, "OG", 'B', "SER", 'A', 1, (0.0, 1.0, 0.0), 0.4, "O"),
        ];
        let file = write_pdb(&lines);
        let (structure, _) = PdbFile::read_from_path(file.path()).unwrap();
        let model = structure.first_model().unwrap();
        let chain = model.find_chain_by_id("A").unwrap();
        let residue_id = model.find_residue(chain, 1, None).unwrap();
        let residue = model.residue(residue_id).unwrap();

        let mut og: Vec<(Option<char>, f64)> = residue
            .atom_ids_by_name("OG")
            .iter()
            .map(|&id| model.atom(id).unwrap())
            .map(|atom| (atom.alt_loc, atom.occupancy))
            .collect();
        og.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(og.len(), 2);
        assert_eq!(og[0].0, Some('A'));
        assert!((og[0].1 - 0.6).abs() < 1e-9);
        assert_eq!(og[1].0, Some('B'));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("absent.pdb"));
        assert!(matches!(result, Err(crate::core::io::StructureIoError::Io { .. })));
    }

    #[test]
    fn written_file_can_be_read_back() {
        let file = write_pdb(&two_chain_lines());
        let (structure, _) = PdbFile::read_from_path(file.path()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdb");
        PdbFile::write_to_path(&structure, &out).unwrap();
        let (reread, _) = PdbFile::read_from_path(&out).unwrap();

        let model = reread.first_model().unwrap();
        assert_eq!(model.atom_count(), 4);
        assert!(model.find_chain_by_id("B").is_some());
    }
}
