use super::StageReport;
use crate::core::models::ids::AtomId;
use crate::core::models::model::Model;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::engine::neighbors::NeighborSearch;
use tracing::debug;

const CYSTEINE_NAMES: [&str; 3] = ["CYS", "CYX", "CYM"];

fn atom_label(model: &Model, atom_id: AtomId) -> String {
    match model.atom(atom_id) {
        Some(atom) => match model.residue_key(atom.residue_id) {
            Some(key) => format!("{}.{}", key, atom.name),
            None => atom.name.clone(),
        },
        None => "?".to_string(),
    }
}

/// Reports cysteine pairs whose SG atoms are within `cutoff` (read-only).
pub fn disulfides(structure: Structure, cutoff: f64) -> Result<(Structure, StageReport), EngineError> {
    let model = structure.first_model().ok_or(EngineError::EmptyStructure)?;

    let search = NeighborSearch::new(
        model
            .residues_iter()
            .filter(|(_, residue)| CYSTEINE_NAMES.contains(&residue.name.as_str()))
            .flat_map(|(_, residue)| residue.atom_ids_by_name("SG").iter().copied())
            .filter_map(|atom_id| model.atom(atom_id).map(|atom| (atom_id, atom.position))),
    );
    debug!(sulfur_atoms = search.len(), "Searching disulfide candidates.");

    let mut findings: Vec<String> = search
        .pairs_within(cutoff)
        .into_iter()
        .filter(|(a, b, _)| {
            model.atom(*a).map(|atom| atom.residue_id) != model.atom(*b).map(|atom| atom.residue_id)
        })
        .map(|(a, b, dist)| format!("{} {} {:.3}", atom_label(model, a), atom_label(model, b), dist))
        .collect();
    findings.sort();

    let mut report = StageReport::new(
        "getss",
        format!("{} possible disulfide bond(s) within {:.2} A", findings.len(), cutoff),
    );
    report.findings = findings;
    Ok((structure, report))
}

/// Reports atom pairs of different residues closer than `cutoff` (read-only).
pub fn clashes(structure: Structure, cutoff: f64) -> Result<(Structure, StageReport), EngineError> {
    let model = structure.first_model().ok_or(EngineError::EmptyStructure)?;

    let search = NeighborSearch::new(model.atoms_iter().map(|(atom_id, atom)| (atom_id, atom.position)));
    let mut findings: Vec<String> = search
        .pairs_within(cutoff)
        .into_iter()
        .filter(|&(_, _, dist)| dist < cutoff)
        .filter(|(a, b, _)| {
            model.atom(*a).map(|atom| atom.residue_id) != model.atom(*b).map(|atom| atom.residue_id)
        })
        .map(|(a, b, dist)| format!("{} {} {:.3}", atom_label(model, a), atom_label(model, b), dist))
        .collect();
    findings.sort();

    let mut report = StageReport::new(
        "clashes",
        format!("{} severe clash(es) below {:.2} A", findings.len(), cutoff),
    );
    report.findings = findings;
    Ok((structure, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fixtures::structure_from;

    #[test]
    fn disulfides_reports_close_sg_pairs_only() {
        let structure = structure_from(&[
            ("A", 10, "CYS", "SG", [0.0, 0.0, 0.0]),
            ("A", 20, "CYS", "SG", [2.04, 0.0, 0.0]),
            ("A", 30, "CYS", "SG", [10.0, 0.0, 0.0]),
            ("A", 40, "MET", "SD", [1.0, 0.0, 0.0]),
        ]);
        let (_, report) = disulfides(structure, 2.5).unwrap();
        assert_eq!(report.findings, vec!["A:CYS10.SG A:CYS20.SG 2.040".to_string()]);
        assert_eq!(report.removed, 0);
    }

    #[test]
    fn disulfides_spans_chains() {
        let structure = structure_from(&[
            ("A", 10, "CYS", "SG", [0.0, 0.0, 0.0]),
            ("B", 5, "CYX", "SG", [0.0, 2.0, 0.0]),
        ]);
        let (_, report) = disulfides(structure, 2.5).unwrap();
        assert_eq!(report.findings.len(), 1);
    }

    #[test]
    fn clashes_ignores_atoms_of_the_same_residue() {
        let structure = structure_from(&[
            ("A", 1, "ALA", "N", [0.0, 0.0, 0.0]),
            ("A", 1, "ALA", "CA", [0.5, 0.0, 0.0]),
            ("B", 1, "GLY", "CA", [0.0, 0.8, 0.0]),
            ("B", 2, "GLY", "CA", [10.0, 0.0, 0.0]),
        ]);
        let (structure, report) = clashes(structure, 1.0).unwrap();
        assert_eq!(report.findings.len(), 2);
        assert!(report.findings.iter().all(|line| line.contains("B:GLY1.CA")));
        assert_eq!(structure.atom_count(), 4);
    }

    #[test]
    fn clashes_uses_a_strict_cutoff() {
        let structure = structure_from(&[
            ("A", 1, "ALA", "CA", [0.0, 0.0, 0.0]),
            ("B", 1, "GLY", "CA", [1.0, 0.0, 0.0]),
        ]);
        let (_, report) = clashes(structure, 1.0).unwrap();
        assert!(report.findings.is_empty());
    }

    #[test]
    fn read_only_stages_need_a_model() {
        let result = clashes(Structure::new("empty"), 1.0);
        assert!(matches!(result, Err(EngineError::EmptyStructure)));
    }
}
