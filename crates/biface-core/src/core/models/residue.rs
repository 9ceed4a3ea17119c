use super::ids::{AtomId, ChainId};
use crate::core::utils::identifiers;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidueKind {
    #[default]
    Standard, // Polymer residue (amino acid or nucleotide)
    Water,  // Solvent molecule
    Hetero, // Ligand, ion, cofactor or modified monomer
}

impl ResidueKind {
    /// Classifies a residue from its name and the `HETATM` flag of its atoms.
    ///
    /// Water is recognized by name regardless of the record type. Non-polymer residues
    /// read from `ATOM` records are still hetero groups.
    pub fn classify(residue_name: &str, hetero: bool) -> Self {
        if identifiers::is_water(residue_name) {
            ResidueKind::Water
        } else if hetero || !identifiers::is_polymer_residue(residue_name) {
            ResidueKind::Hetero
        } else {
            ResidueKind::Standard
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid residue kind string")]
pub struct ParseResidueKindError;

impl FromStr for ResidueKind {
    type Err = ParseResidueKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "polymer" => Ok(ResidueKind::Standard),
            "water" | "solvent" => Ok(ResidueKind::Water),
            "hetero" | "het" | "hetatm" => Ok(ResidueKind::Hetero),
            _ => Err(ParseResidueKindError),
        }
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResidueKind::Standard => "Standard",
                ResidueKind::Water => "Water",
                ResidueKind::Hetero => "Hetero",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                          // Residue sequence number from source file
    pub insertion_code: Option<char>,           // PDB insertion code, if any
    pub name: String,                           // Name of the residue (e.g., "ALA", "HOH")
    pub kind: ResidueKind,                      // Polymer, water or hetero group
    pub chain_id: ChainId,                      // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,              // Atoms belonging to this residue, in file order
    atom_name_map: HashMap<String, Vec<AtomId>>, // Atom name to IDs (several when altlocs exist)
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        kind: ResidueKind,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            insertion_code,
            name: name.to_string(),
            kind,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_default()
            .push(atom_id);
    }

    pub(crate) fn remove_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.retain(|&id| id != atom_id);
        if let Some(ids) = self.atom_name_map.get_mut(atom_name) {
            ids.retain(|&id| id != atom_id);
            if ids.is_empty() {
                self.atom_name_map.remove(atom_name);
            }
        }
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn get_first_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map
            .get(name)
            .and_then(|ids| ids.first().copied())
    }

    pub fn atom_ids_by_name(&self, name: &str) -> &[AtomId] {
        self.atom_name_map
            .get(name)
            .map_or(&[], |ids| ids.as_slice())
    }
}

/// Stable, printable identity of a residue: chain id, sequence number and insertion
/// code. The residue name is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResidueKey {
    pub chain_id: String,
    pub number: isize,
    pub insertion_code: Option<char>,
    pub name: String,
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.chain_id, self.name, self.number)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}
