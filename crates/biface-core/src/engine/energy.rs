use super::config::Dielectric;
use super::error::EngineError;
use super::interface::InterfaceSet;
use crate::core::forcefield::params::{ResidueLibrary, VdwParamSet};
use crate::core::forcefield::potentials::{
    combine_lj, coulomb, lennard_jones_12_6, mehler_solmajer_dielectric,
};
use crate::core::models::model::Model;
use crate::core::models::residue::ResidueKey;
use crate::core::utils::geometry::distance;
use nalgebra::Point3;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueEnergy {
    pub residue: ResidueKey,
    pub electrostatic: f64,
    pub vdw: f64,
}

impl ResidueEnergy {
    pub fn total(&self) -> f64 {
        self.electrostatic + self.vdw
    }
}

/// Interaction energy between the two sides of an interface, in kcal/mol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceEnergy {
    pub residues_1: Vec<ResidueEnergy>,
    pub residues_2: Vec<ResidueEnergy>,
    pub electrostatic: f64,
    pub vdw: f64,
    /// Atoms left out because the residue library or the van der Waals set lacks them.
    pub skipped_atoms: usize,
}

impl InterfaceEnergy {
    pub fn total(&self) -> f64 {
        self.electrostatic + self.vdw
    }
}

struct ParamAtom {
    owner: usize,
    position: Point3<f64>,
    charge: f64,
    rvdw: f64,
    eps: f64,
}

/// Resolves parameters for every atom of `residues`, returning the atoms and the number
/// of atoms that could not be parameterised.
fn parameterize_side(
    model: &Model,
    residues: &BTreeSet<ResidueKey>,
    library: &ResidueLibrary,
    vdw: &VdwParamSet,
) -> (Vec<ParamAtom>, usize) {
    let mut atoms = Vec::new();
    let mut skipped = 0;

    for (owner, key) in residues.iter().enumerate() {
        let Some(residue_id) = model
            .find_chain_by_id(&key.chain_id)
            .and_then(|chain| model.find_residue(chain, key.number, key.insertion_code))
        else {
            continue;
        };
        for (_, atom) in model.residue_atoms(residue_id) {
            let Some(params) = library.get_params(&key.name, &atom.name) else {
                skipped += 1;
                continue;
            };
            let Some(atom_type) = vdw.get(&params.atom_type) else {
                warn!(residue = %key, atom = %atom.name, atom_type = %params.atom_type, "Atom type not found in van der Waals parameters");
                skipped += 1;
                continue;
            };
            atoms.push(ParamAtom {
                owner,
                position: atom.position,
                charge: params.charge,
                rvdw: atom_type.rvdw,
                eps: atom_type.eps,
            });
        }
    }
    (atoms, skipped)
}

fn pair_energy(a: &ParamAtom, b: &ParamAtom, dielectric: Dielectric) -> (f64, f64) {
    let dist = distance(&a.position, &b.position);
    let eps_r = match dielectric {
        Dielectric::Constant(value) => value,
        Dielectric::MehlerSolmajer => mehler_solmajer_dielectric(dist),
    };
    let (r_min, well_depth) = combine_lj(a.rvdw, a.eps, b.rvdw, b.eps);
    (
        coulomb(dist, a.charge, b.charge, eps_r),
        lennard_jones_12_6(dist, r_min, well_depth),
    )
}

/// Computes the interaction energy between the interface residues of both chains.
///
/// Every atom of an interface residue on one side interacts with every atom of the
/// interface residues on the other side. Each residue is credited with the full energy
/// of its pairs, so both per-residue lists sum to the same total.
#[instrument(skip_all, name = "interface_energy")]
pub fn interface_energy(
    model: &Model,
    interface: &InterfaceSet,
    library: &ResidueLibrary,
    vdw: &VdwParamSet,
    dielectric: Dielectric,
) -> Result<InterfaceEnergy, EngineError> {
    for chain_id in [&interface.chain_1, &interface.chain_2] {
        if model.find_chain_by_id(chain_id).is_none() {
            return Err(EngineError::ChainNotFound {
                chain_id: chain_id.clone(),
            });
        }
    }

    let (side_1, skipped_1) = parameterize_side(model, &interface.residues_1, library, vdw);
    let (side_2, skipped_2) = parameterize_side(model, &interface.residues_2, library, vdw);

    let zeroed = |residues: &BTreeSet<ResidueKey>| -> Vec<ResidueEnergy> {
        residues
            .iter()
            .map(|key| ResidueEnergy {
                residue: key.clone(),
                electrostatic: 0.0,
                vdw: 0.0,
            })
            .collect()
    };
    let mut residues_1 = zeroed(&interface.residues_1);
    let mut residues_2 = zeroed(&interface.residues_2);
    let mut total_elec = 0.0;
    let mut total_vdw = 0.0;

    for a in &side_1 {
        for b in &side_2 {
            let (elec, lj) = pair_energy(a, b, dielectric);
            residues_1[a.owner].electrostatic += elec;
            residues_1[a.owner].vdw += lj;
            residues_2[b.owner].electrostatic += elec;
            residues_2[b.owner].vdw += lj;
            total_elec += elec;
            total_vdw += lj;
        }
    }

    let skipped_atoms = skipped_1 + skipped_2;
    if skipped_atoms > 0 {
        warn!(skipped_atoms, "Some atoms had no parameters and were ignored.");
    }
    info!(
        electrostatic = total_elec,
        vdw = total_vdw,
        "Interface energy computed."
    );

    Ok(InterfaceEnergy {
        residues_1,
        residues_2,
        electrostatic: total_elec,
        vdw: total_vdw,
        skipped_atoms,
    })
}
