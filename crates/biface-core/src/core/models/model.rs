use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::{Residue, ResidueKey, ResidueKind};
use slotmap::SlotMap;
use std::collections::HashMap;

type ResidueLookupKey = (ChainId, isize, Option<char>);

/// One model (coordinate set) of a structure.
///
/// This struct stores chains, residues and atoms in slot maps so that removals keep
/// every other key valid. Chain insertion order is tracked separately because it is
/// the order in which chains are reported and written back to disk.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Model serial number (`MODEL` record or `pdbx_PDB_model_num`).
    serial: usize,
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in the order they were added.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain, number and insertion code.
    residue_id_map: HashMap<ResidueLookupKey, ResidueId>,
    /// Lookup map for finding chains by their identifier.
    chain_id_map: HashMap<String, ChainId>,
}

impl Model {
    /// Creates a new, empty model with the given serial number.
    pub fn new(serial: usize) -> Self {
        Self {
            serial,
            ..Default::default()
        }
    }

    pub fn serial(&self) -> usize {
        self.serial
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms of the model, in storage order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over the chains in insertion order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Finds a chain ID by its identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The chain identifier (e.g., "A").
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: &str) -> Option<ChainId> {
        self.chain_id_map.get(id).copied()
    }

    /// Finds a residue ID by its chain, sequence number and insertion code.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, number, insertion_code))
            .copied()
    }

    /// Adds a new chain to the model or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given identifier already exists,
    /// its ID is returned and no duplicate is created.
    pub fn add_chain(&mut self, id: &str) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(id.to_string(), chain_id);
        chain_id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// This method is idempotent on `(chain, number, insertion code)`.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        kind: ResidueKind,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, number, insertion_code);
        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let residue_id = self
            .residues
            .insert(Residue::new(number, insertion_code, name, kind, chain_id));
        chain.residues.push(residue_id);
        self.residue_id_map.insert(key, residue_id);
        Some(residue_id)
    }

    /// Adds an atom to a residue, rewriting the atom's parent to `residue_id`.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        residue.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Removes an atom and unregisters it from its parent residue.
    ///
    /// Empty residues are kept; use [`Model::prune_empty`] to drop them.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;
        if let Some(residue) = self.residues.get_mut(atom.residue_id) {
            residue.remove_atom(&atom.name, atom_id);
        }
        Some(atom)
    }

    /// Removes a residue with all of its atoms.
    pub fn remove_residue(&mut self, residue_id: ResidueId) -> Option<Residue> {
        let residue = self.residues.remove(residue_id)?;

        for &atom_id in residue.atoms() {
            self.atoms.remove(atom_id);
        }
        if let Some(chain) = self.chains.get_mut(residue.chain_id) {
            chain.residues.retain(|&id| id != residue_id);
        }
        self.residue_id_map
            .remove(&(residue.chain_id, residue.number, residue.insertion_code));

        Some(residue)
    }

    /// Removes a chain with all of its residues and atoms.
    pub fn remove_chain(&mut self, chain_id: ChainId) -> Option<Chain> {
        let chain = self.chains.remove(chain_id)?;

        for &residue_id in chain.residues() {
            if let Some(residue) = self.residues.remove(residue_id) {
                for &atom_id in residue.atoms() {
                    self.atoms.remove(atom_id);
                }
                self.residue_id_map
                    .remove(&(chain_id, residue.number, residue.insertion_code));
            }
        }
        self.chain_order.retain(|&id| id != chain_id);
        self.chain_id_map.remove(&chain.id);

        Some(chain)
    }

    /// Removes every atom for which `keep` returns `false`.
    ///
    /// # Return
    ///
    /// The number of atoms removed.
    pub fn retain_atoms<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Atom) -> bool,
    {
        let doomed: Vec<AtomId> = self
            .atoms
            .iter()
            .filter(|(_, atom)| !keep(atom))
            .map(|(id, _)| id)
            .collect();
        for &atom_id in &doomed {
            self.remove_atom(atom_id);
        }
        doomed.len()
    }

    /// Removes every residue for which `keep` returns `false`.
    ///
    /// # Return
    ///
    /// The identities of the removed residues, in chain order.
    pub fn retain_residues<F>(&mut self, mut keep: F) -> Vec<ResidueKey>
    where
        F: FnMut(&Residue) -> bool,
    {
        let doomed: Vec<ResidueId> = self
            .ordered_residue_ids()
            .into_iter()
            .filter(|&id| self.residues.get(id).is_some_and(|residue| !keep(residue)))
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for residue_id in doomed {
            if let Some(key) = self.residue_key(residue_id) {
                removed.push(key);
            }
            self.remove_residue(residue_id);
        }
        removed
    }

    /// Drops residues without atoms and chains without residues.
    pub fn prune_empty(&mut self) {
        let empty_residues: Vec<ResidueId> = self
            .residues
            .iter()
            .filter(|(_, residue)| residue.is_empty())
            .map(|(id, _)| id)
            .collect();
        for residue_id in empty_residues {
            self.remove_residue(residue_id);
        }

        let empty_chains: Vec<ChainId> = self
            .chains
            .iter()
            .filter(|(_, chain)| chain.is_empty())
            .map(|(id, _)| id)
            .collect();
        for chain_id in empty_chains {
            self.remove_chain(chain_id);
        }
    }

    /// Residue IDs in chain order, then in residue order within each chain.
    pub fn ordered_residue_ids(&self) -> Vec<ResidueId> {
        self.chains_iter()
            .flat_map(|(_, chain)| chain.residues().iter().copied())
            .collect()
    }

    /// Iterates over the atoms of one residue in file order.
    pub fn residue_atoms(&self, residue_id: ResidueId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.residues
            .get(residue_id)
            .into_iter()
            .flat_map(|residue| residue.atoms().iter())
            .filter_map(|&atom_id| self.atoms.get(atom_id).map(|atom| (atom_id, atom)))
    }

    /// Iterates over every atom of a chain, residue by residue.
    pub fn chain_atoms(&self, chain_id: ChainId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.chains
            .get(chain_id)
            .into_iter()
            .flat_map(|chain| chain.residues().iter())
            .flat_map(|&residue_id| self.residue_atoms(residue_id))
    }

    /// Builds the printable identity of a residue.
    pub fn residue_key(&self, residue_id: ResidueId) -> Option<ResidueKey> {
        let residue = self.residues.get(residue_id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some(ResidueKey {
            chain_id: chain.id.clone(),
            number: residue.number,
            insertion_code: residue.insertion_code,
            name: residue.name.clone(),
        })
    }
}
