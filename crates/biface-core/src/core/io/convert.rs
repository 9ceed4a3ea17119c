use super::error::StructureIoError;
use crate::core::models::atom::Atom;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::ResidueKind;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use pdbtbx::PDB;
use std::collections::HashSet;

fn first_char(code: Option<&str>) -> Option<char> {
    code.and_then(|c| c.trim().chars().next())
}

/// Reduces an identifier to characters that are valid in both a PDB header and an mmCIF
/// `data_` block name. Falls back to `"structure"` when nothing usable is left.
pub(super) fn sanitize_id(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        "structure".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Flattens a `pdbtbx` tree into a [`Structure`].
///
/// Every conformer of a residue contributes its atoms, tagged with the conformer's
/// alternative location. Atoms shared between conformers are added once.
pub(super) fn from_pdbtbx(pdb: &PDB, fallback_id: &str) -> Result<Structure, StructureIoError> {
    let id = pdb
        .identifier
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(fallback_id);
    let mut builder = StructureBuilder::new(&sanitize_id(id));

    for model in pdb.models() {
        builder.start_model(model.serial_number());
        for chain in model.chains() {
            builder.start_chain(chain.id());
            for residue in chain.residues() {
                let Some(first_conformer) = residue.conformers().next() else {
                    continue;
                };
                let hetero = residue.atoms().any(|atom| atom.hetero());
                let name = first_conformer.name();
                builder.start_residue(
                    residue.serial_number(),
                    first_char(residue.insertion_code()),
                    name,
                    ResidueKind::classify(name, hetero),
                )?;

                let mut seen = HashSet::new();
                for conformer in residue.conformers() {
                    let alt_loc = first_char(conformer.alternative_location());
                    for atom in conformer.atoms() {
                        if !seen.insert(atom.serial_number()) {
                            continue;
                        }
                        let (x, y, z) = atom.pos();
                        let element = atom.element().map(|e| e.symbol()).unwrap_or("");
                        let mut converted = Atom::new(
                            atom.serial_number(),
                            atom.name(),
                            ResidueId::default(),
                            Point3::new(x, y, z),
                        )
                        .with_element(element)
                        .with_alt_loc(alt_loc, atom.occupancy());
                        converted.b_factor = atom.b_factor();
                        builder.add_atom(converted)?;
                    }
                }
            }
        }
    }

    Ok(builder.build())
}

/// Rebuilds a `pdbtbx` tree from a [`Structure`] for writing.
pub(super) fn to_pdbtbx(structure: &Structure) -> Result<PDB, StructureIoError> {
    let mut pdb = PDB::new();
    pdb.identifier = Some(sanitize_id(&structure.id));

    for model in &structure.models {
        let mut out = pdbtbx::Model::new(model.serial());
        for residue_id in model.ordered_residue_ids() {
            let (Some(residue), Some(key)) = (model.residue(residue_id), model.residue_key(residue_id))
            else {
                continue;
            };
            let hetero = residue.kind != ResidueKind::Standard;
            let insertion_code = residue.insertion_code.map(|c| c.to_string());

            for (_, atom) in model.residue_atoms(residue_id) {
                let converted = pdbtbx::Atom::new(
                    hetero,
                    atom.serial,
                    atom.name.as_str(),
                    atom.position.x,
                    atom.position.y,
                    atom.position.z,
                    atom.occupancy,
                    atom.b_factor,
                    atom.element.as_str(),
                    0,
                )
                .ok_or_else(|| {
                    StructureIoError::Conversion(format!(
                        "atom '{}' (serial {}) of residue {} cannot be represented",
                        atom.name, atom.serial, key
                    ))
                })?;
                let alt_loc = atom.alt_loc.map(|c| c.to_string());
                out.add_atom(
                    converted,
                    key.chain_id.as_str(),
                    (residue.number, insertion_code.as_deref()),
                    (residue.name.as_str(), alt_loc.as_deref()),
                );
            }
        }
        pdb.add_model(out);
    }

    Ok(pdb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_structure() -> Structure {
        let mut builder = StructureBuilder::new("sample");
        builder.start_chain("A");
        builder
            .start_residue(12, Some('B'), "TYR", ResidueKind::Standard)
            .unwrap()
            .add_atom(
                Atom::new(1, "CA", ResidueId::default(), Point3::new(1.0, 2.0, 3.0))
                    .with_element("C"),
            )
            .unwrap();
        builder
            .start_residue(301, None, "ZN", ResidueKind::Hetero)
            .unwrap()
            .add_atom(
                Atom::new(2, "ZN", ResidueId::default(), Point3::new(4.0, 4.0, 4.0))
                    .with_element("ZN"),
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn to_pdbtbx_keeps_identity_and_hetero_flag() {
        let pdb = to_pdbtbx(&sample_structure()).unwrap();
        assert_eq!(pdb.identifier.as_deref(), Some("sample"));
        assert_eq!(pdb.model_count(), 1);
        assert_eq!(pdb.atom_count(), 2);

        let hetero: Vec<bool> = pdb.atoms().map(|atom| atom.hetero()).collect();
        assert_eq!(hetero, vec![false, true]);
    }

    #[test]
    fn conversion_round_trip_preserves_residue_keys() {
        let original = sample_structure();
        let pdb = to_pdbtbx(&original).unwrap();
        let converted = from_pdbtbx(&pdb, "fallback").unwrap();

        let model = converted.first_model().unwrap();
        let chain = model.find_chain_by_id("A").unwrap();
        let tyr = model.find_residue(chain, 12, Some('B')).unwrap();
        assert_eq!(model.residue(tyr).unwrap().kind, ResidueKind::Standard);
        let zn = model.find_residue(chain, 301, None).unwrap();
        assert_eq!(model.residue(zn).unwrap().kind, ResidueKind::Hetero);
        assert_eq!(converted.id, "sample");
    }

    #[test]
    fn from_pdbtbx_uses_fallback_id_without_identifier() {
        let pdb = PDB::new();
        let structure = from_pdbtbx(&pdb, "file-stem").unwrap();
        assert_eq!(structure.id, "file-stem");
        assert!(structure.is_empty());
    }

    #[test]
    fn identifiers_are_reduced_to_block_name_characters() {
        assert_eq!(sanitize_id("6m0j"), "6m0j");
        assert_eq!(sanitize_id(".tmpAbC123"), "tmpAbC123");
        assert_eq!(sanitize_id("  6m0j fixed\t"), "6m0j_fixed");
        assert_eq!(sanitize_id("complex.v2"), "complex_v2");
        assert_eq!(sanitize_id("..."), "structure");
        assert_eq!(sanitize_id(""), "structure");
    }

    #[test]
    fn unsafe_ids_are_cleaned_in_both_directions() {
        let mut structure = sample_structure();
        structure.id = ".tmp8xQz".to_string();
        let pdb = to_pdbtbx(&structure).unwrap();
        assert_eq!(pdb.identifier.as_deref(), Some("tmp8xQz"));

        let converted = from_pdbtbx(&PDB::new(), ".tmp8xQz").unwrap();
        assert_eq!(converted.id, "tmp8xQz");
    }
}
