use super::{RemovalSelection, StageReport};
use crate::core::models::residue::{Residue, ResidueKind};
use crate::core::models::structure::Structure;
use crate::core::utils::identifiers;
use crate::engine::error::EngineError;
use std::collections::BTreeSet;

fn is_metal(residue: &Residue) -> bool {
    residue.kind == ResidueKind::Hetero && identifiers::is_metal_ion(&residue.name)
}

fn is_ligand(residue: &Residue) -> bool {
    residue.kind == ResidueKind::Hetero && !identifiers::is_metal_ion(&residue.name)
}

/// Lists residues matching `matches` and removes those accepted by `selection`.
fn remove_residues<F>(
    mut structure: Structure,
    stage: &'static str,
    label: &str,
    selection: &RemovalSelection,
    matches: F,
) -> (Structure, StageReport)
where
    F: Fn(&Residue) -> bool,
{
    let mut found = BTreeSet::new();
    let mut removed = 0;
    for model in &mut structure.models {
        for residue_id in model.ordered_residue_ids() {
            if let (Some(residue), Some(key)) = (model.residue(residue_id), model.residue_key(residue_id)) {
                if matches(residue) {
                    found.insert(key.to_string());
                }
            }
        }
        let gone = model.retain_residues(|residue| !(matches(residue) && selection.removes(&residue.name)));
        removed += gone.len();
        model.prune_empty();
    }

    let summary = if removed > 0 {
        format!("{} {} found, {} removed", found.len(), label, removed)
    } else {
        format!("{} {} found", found.len(), label)
    };
    let mut report = StageReport::new(stage, summary);
    report.removed = removed;
    report.findings = found.into_iter().collect();
    (structure, report)
}

pub fn metals(
    structure: Structure,
    selection: &RemovalSelection,
) -> Result<(Structure, StageReport), EngineError> {
    Ok(remove_residues(structure, "metals", "metal ion(s)", selection, is_metal))
}

pub fn ligands(
    structure: Structure,
    selection: &RemovalSelection,
) -> Result<(Structure, StageReport), EngineError> {
    Ok(remove_residues(structure, "ligands", "ligand(s)", selection, is_ligand))
}

pub fn water(structure: Structure) -> Result<(Structure, StageReport), EngineError> {
    let (structure, mut report) = remove_residues(
        structure,
        "water",
        "water molecule(s)",
        &RemovalSelection::All,
        |residue| residue.kind == ResidueKind::Water,
    );
    // Individual waters are not worth listing.
    report.findings.clear();
    Ok((structure, report))
}

pub fn hydrogens(mut structure: Structure) -> Result<(Structure, StageReport), EngineError> {
    let mut removed = 0;
    for model in &mut structure.models {
        removed += model.retain_atoms(|atom| !atom.is_hydrogen());
        model.prune_empty();
    }
    let mut report = StageReport::new("hydrogens", format!("{} hydrogen atom(s) removed", removed));
    report.removed = removed;
    Ok((structure, report))
}
