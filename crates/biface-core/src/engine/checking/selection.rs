use super::{AltLocSelection, ChainSelection, ModelSelection, StageReport};
use crate::core::models::ids::AtomId;
use crate::core::models::model::Model;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

pub fn models(
    mut structure: Structure,
    selection: &ModelSelection,
) -> Result<(Structure, StageReport), EngineError> {
    let before = structure.model_count();
    let keep_serial = match selection {
        ModelSelection::Keep => None,
        ModelSelection::First => Some(
            structure
                .first_model()
                .ok_or(EngineError::EmptyStructure)?
                .serial(),
        ),
        ModelSelection::Select(serial) => {
            structure
                .model(*serial)
                .ok_or(EngineError::ModelNotFound { serial: *serial })?;
            Some(*serial)
        }
    };

    let mut report = match keep_serial {
        None => StageReport::new("models", format!("{} model(s) found, keeping all", before)),
        Some(serial) => {
            let mut kept_one = false;
            structure.retain_models(|model| {
                let keep = !kept_one && model.serial() == serial;
                kept_one |= keep;
                keep
            });
            StageReport::new(
                "models",
                format!("{} model(s) found, selected model {}", before, serial),
            )
        }
    };
    report.removed = before - structure.model_count();
    Ok((structure, report))
}

pub fn chains(
    mut structure: Structure,
    selection: &ChainSelection,
) -> Result<(Structure, StageReport), EngineError> {
    let present: Vec<String> = structure
        .first_model()
        .ok_or(EngineError::EmptyStructure)?
        .chains_iter()
        .map(|(_, chain)| chain.id.clone())
        .collect();

    let ChainSelection::Ids(wanted) = selection else {
        let mut report = StageReport::new(
            "chains",
            format!("{} chain(s) found, keeping all", present.len()),
        );
        report.findings = present;
        return Ok((structure, report));
    };

    if let Some(missing) = wanted.iter().find(|id| !present.contains(*id)) {
        return Err(EngineError::ChainNotFound {
            chain_id: missing.clone(),
        });
    }

    let mut removed = BTreeSet::new();
    for model in &mut structure.models {
        let doomed: Vec<_> = model
            .chains_iter()
            .filter(|(_, chain)| !wanted.contains(&chain.id))
            .map(|(id, chain)| (id, chain.id.clone()))
            .collect();
        for (chain_id, name) in doomed {
            model.remove_chain(chain_id);
            removed.insert(name);
        }
    }

    let mut report = StageReport::new(
        "chains",
        format!(
            "{} chain(s) found, kept {}",
            present.len(),
            wanted.join(",")
        ),
    );
    report.removed = removed.len();
    report.findings = removed.into_iter().collect();
    Ok((structure, report))
}

/// Chooses the surviving atom among alternative conformations of one atom name.
fn pick_alternative(candidates: &[(AtomId, char, f64)], selection: AltLocSelection) -> AtomId {
    let by_occupancy = || {
        candidates
            .iter()
            .copied()
            .reduce(|best, next| {
                if next.2 > best.2 || (next.2 == best.2 && next.1 < best.1) {
                    next
                } else {
                    best
                }
            })
            .map(|(id, _, _)| id)
    };
    let chosen = match selection {
        AltLocSelection::Occupancy => by_occupancy(),
        AltLocSelection::Id(wanted) => candidates
            .iter()
            .find(|(_, alt, _)| *alt == wanted)
            .map(|(id, _, _)| *id)
            .or_else(by_occupancy),
    };
    // Candidate groups are never empty.
    chosen.unwrap_or(candidates[0].0)
}

fn resolve_altlocs(model: &mut Model, selection: AltLocSelection) -> (usize, BTreeSet<String>) {
    let mut doomed = Vec::new();
    let mut winners = Vec::new();
    let mut affected = BTreeSet::new();

    for residue_id in model.ordered_residue_ids() {
        let mut groups: BTreeMap<&str, Vec<(AtomId, char, f64)>> = BTreeMap::new();
        for (atom_id, atom) in model.residue_atoms(residue_id) {
            if let Some(alt) = atom.alt_loc {
                groups
                    .entry(atom.name.as_str())
                    .or_default()
                    .push((atom_id, alt, atom.occupancy));
            }
        }
        if groups.is_empty() {
            continue;
        }

        for candidates in groups.values() {
            let winner = pick_alternative(candidates, selection);
            if let AltLocSelection::Id(wanted) = selection {
                if !candidates.iter().any(|(_, alt, _)| *alt == wanted) {
                    if let Some(key) = model.residue_key(residue_id) {
                        warn!(residue = %key, altloc = %wanted, "Alternative location absent, using occupancy");
                    }
                }
            }
            winners.push(winner);
            doomed.extend(candidates.iter().map(|(id, _, _)| *id).filter(|&id| id != winner));
        }
        if let Some(key) = model.residue_key(residue_id) {
            affected.insert(key.to_string());
        }
    }

    for &atom_id in &doomed {
        model.remove_atom(atom_id);
    }
    for atom_id in winners {
        if let Some(atom) = model.atom_mut(atom_id) {
            atom.alt_loc = None;
        }
    }
    (doomed.len(), affected)
}

pub fn altloc(
    mut structure: Structure,
    selection: AltLocSelection,
) -> Result<(Structure, StageReport), EngineError> {
    let mut removed = 0;
    let mut affected = BTreeSet::new();
    for model in &mut structure.models {
        let (count, residues) = resolve_altlocs(model, selection);
        removed += count;
        affected.extend(residues);
    }

    let criterion = match selection {
        AltLocSelection::Occupancy => "occupancy".to_string(),
        AltLocSelection::Id(id) => format!("altloc {}", id),
    };
    let mut report = StageReport::new(
        "altloc",
        format!(
            "{} residue(s) with alternative locations, selected by {}",
            affected.len(),
            criterion
        ),
    );
    report.removed = removed;
    report.findings = affected.into_iter().collect();
    Ok((structure, report))
}
