use super::atom::Atom;
use super::ids::{ChainId, ResidueId};
use super::model::Model;
use super::residue::ResidueKind;
use super::structure::Structure;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Cannot start a residue without a current chain")]
    NoCurrentChain,
    #[error("Cannot add an atom without a current residue")]
    NoCurrentResidue,
}

/// Streaming builder for [`Structure`].
///
/// Records are fed in file order: model, chain, residue, then atoms. Starting a chain
/// before any model implicitly opens model 1, which matches files without `MODEL`
/// records.
pub struct StructureBuilder {
    structure: Structure,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl StructureBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            structure: Structure::new(id),
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn start_model(&mut self, serial: usize) -> &mut Self {
        self.structure.models.push(Model::new(serial));
        self.current_chain = None;
        self.current_residue = None;
        self
    }

    fn current_model(&mut self) -> &mut Model {
        if self.structure.models.is_empty() {
            self.structure.models.push(Model::new(1));
        }
        let last = self.structure.models.len() - 1;
        &mut self.structure.models[last]
    }

    pub fn start_chain(&mut self, id: &str) -> &mut Self {
        let chain_id = self.current_model().add_chain(id);
        self.current_chain = Some(chain_id);
        self.current_residue = None;
        self
    }

    pub fn start_residue(
        &mut self,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        kind: ResidueKind,
    ) -> Result<&mut Self, BuildError> {
        let chain_id = self.current_chain.ok_or(BuildError::NoCurrentChain)?;
        let residue_id = self
            .current_model()
            .add_residue(chain_id, number, insertion_code, name, kind)
            .ok_or(BuildError::NoCurrentChain)?;
        self.current_residue = Some(residue_id);
        Ok(self)
    }

    /// Adds an atom to the current residue. The atom's `residue_id` is overwritten.
    pub fn add_atom(&mut self, atom: Atom) -> Result<&mut Self, BuildError> {
        let residue_id = self.current_residue.ok_or(BuildError::NoCurrentResidue)?;
        self.current_model()
            .add_atom_to_residue(residue_id, atom)
            .ok_or(BuildError::NoCurrentResidue)?;
        Ok(self)
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}
