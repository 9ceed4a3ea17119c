use super::error::EngineError;
use super::neighbors::NeighborSearch;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::ids::ResidueId;
use crate::core::models::model::Model;
use crate::core::models::residue::ResidueKey;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Residues of two chains that lie within a distance cutoff of each other.
///
/// `residues_1` belong to `chain_1` and `residues_2` to `chain_2`. Each residue appears at
/// most once; the sets are ordered by chain, number and insertion code only so that
/// printing is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceSet {
    pub chain_1: String,
    pub chain_2: String,
    pub residues_1: BTreeSet<ResidueKey>,
    pub residues_2: BTreeSet<ResidueKey>,
}

impl InterfaceSet {
    fn empty(chain_1: &str, chain_2: &str) -> Self {
        Self {
            chain_1: chain_1.to_string(),
            chain_2: chain_2.to_string(),
            residues_1: BTreeSet::new(),
            residues_2: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.residues_1.is_empty() && self.residues_2.is_empty()
    }

    /// Total number of interface residues over both chains.
    pub fn len(&self) -> usize {
        self.residues_1.len() + self.residues_2.len()
    }

    /// The same interface seen from the other chain.
    pub fn swapped(self) -> Self {
        Self {
            chain_1: self.chain_2,
            chain_2: self.chain_1,
            residues_1: self.residues_2,
            residues_2: self.residues_1,
        }
    }
}

type ResidueHits = (HashSet<ResidueId>, HashSet<ResidueId>);

fn empty_hits() -> ResidueHits {
    (HashSet::new(), HashSet::new())
}

#[cfg(feature = "parallel")]
fn merge_hits(mut acc: ResidueHits, other: ResidueHits) -> ResidueHits {
    acc.0.extend(other.0);
    acc.1.extend(other.1);
    acc
}

/// Finds the interface between two chains of the first model of `structure`.
///
/// A residue of either chain is part of the interface when at least one of its atoms lies
/// within `distance` (inclusive) of an atom of the other chain.
///
/// # Errors
///
/// * [`EngineError::InvalidDistance`] - `distance` is NaN or infinite.
/// * [`EngineError::EmptyStructure`] - the structure has no models.
/// * [`EngineError::ChainNotFound`] - either chain is absent from the first model.
/// * [`EngineError::IdenticalChains`] - both identifiers name the same chain.
///
/// A finite `distance <= 0` is valid and yields an empty interface.
pub fn find_interface(
    structure: &Structure,
    chain_id_1: &str,
    chain_id_2: &str,
    distance: f64,
) -> Result<InterfaceSet, EngineError> {
    find_interface_with_progress(
        structure,
        chain_id_1,
        chain_id_2,
        distance,
        &ProgressReporter::new(),
    )
}

/// [`find_interface`], reporting one task step per atom of chain 1.
pub fn find_interface_with_progress(
    structure: &Structure,
    chain_id_1: &str,
    chain_id_2: &str,
    distance: f64,
    reporter: &ProgressReporter,
) -> Result<InterfaceSet, EngineError> {
    if !distance.is_finite() {
        return Err(EngineError::InvalidDistance { value: distance });
    }
    let model = structure.first_model().ok_or(EngineError::EmptyStructure)?;
    find_interface_in_model(model, chain_id_1, chain_id_2, distance, reporter)
}

/// [`find_interface_with_progress`] on an explicit model.
#[instrument(skip(model, reporter), name = "interface_search")]
pub fn find_interface_in_model(
    model: &Model,
    chain_id_1: &str,
    chain_id_2: &str,
    distance: f64,
    reporter: &ProgressReporter,
) -> Result<InterfaceSet, EngineError> {
    if !distance.is_finite() {
        return Err(EngineError::InvalidDistance { value: distance });
    }
    let chain_1 = model
        .find_chain_by_id(chain_id_1)
        .ok_or_else(|| EngineError::ChainNotFound {
            chain_id: chain_id_1.to_string(),
        })?;
    let chain_2 = model
        .find_chain_by_id(chain_id_2)
        .ok_or_else(|| EngineError::ChainNotFound {
            chain_id: chain_id_2.to_string(),
        })?;
    if chain_1 == chain_2 {
        return Err(EngineError::IdenticalChains {
            chain_id: chain_id_1.to_string(),
        });
    }

    let mut interface = InterfaceSet::empty(chain_id_1, chain_id_2);
    if distance <= 0.0 {
        debug!("Non-positive cutoff, interface is empty.");
        return Ok(interface);
    }

    let search = NeighborSearch::new(
        model
            .chain_atoms(chain_2)
            .map(|(_, atom)| (atom.residue_id, atom.position)),
    );
    let queries: Vec<(ResidueId, Point3<f64>)> = model
        .chain_atoms(chain_1)
        .map(|(_, atom)| (atom.residue_id, atom.position))
        .collect();
    debug!(
        query_atoms = queries.len(),
        indexed_atoms = search.len(),
        "Running radius queries."
    );
    reporter.report(Progress::TaskStart {
        total_steps: queries.len() as u64,
    });

    let visit = |mut acc: ResidueHits, (residue_id, position): &(ResidueId, Point3<f64>)| {
        let hits = search.within(position, distance);
        if !hits.is_empty() {
            acc.0.insert(*residue_id);
            acc.1.extend(hits);
        }
        reporter.report(Progress::TaskIncrement);
        acc
    };

    #[cfg(not(feature = "parallel"))]
    let (hits_1, hits_2) = queries.iter().fold(empty_hits(), visit);

    #[cfg(feature = "parallel")]
    let (hits_1, hits_2) = queries
        .par_iter()
        .fold(empty_hits, visit)
        .reduce(empty_hits, merge_hits);

    reporter.report(Progress::TaskFinish);

    interface.residues_1 = hits_1
        .into_iter()
        .filter_map(|id| model.residue_key(id))
        .collect();
    interface.residues_2 = hits_2
        .into_iter()
        .filter_map(|id| model.residue_key(id))
        .collect();

    info!(
        residues_1 = interface.residues_1.len(),
        residues_2 = interface.residues_2.len(),
        "Interface search complete."
    );
    Ok(interface)
}
