use super::model::Model;

/// A parsed macromolecular structure: an identifier and one or more models.
///
/// Most operations only look at the first model, mirroring how crystal structures are
/// usually handled. NMR ensembles keep every model until the `models` checking stage
/// selects one.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub id: String,
    pub models: Vec<Model>,
}

impl Structure {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            models: Vec::new(),
        }
    }

    pub fn first_model(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn first_model_mut(&mut self) -> Option<&mut Model> {
        self.models.first_mut()
    }

    /// Finds a model by its serial number.
    pub fn model(&self, serial: usize) -> Option<&Model> {
        self.models.iter().find(|model| model.serial() == serial)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Keeps only the models for which `keep` returns `true`.
    pub fn retain_models<F>(&mut self, keep: F)
    where
        F: FnMut(&Model) -> bool,
    {
        self.models.retain(keep);
    }

    /// Total atom count over every model.
    pub fn atom_count(&self) -> usize {
        self.models.iter().map(Model::atom_count).sum()
    }
}
