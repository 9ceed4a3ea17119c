//! Structure checking and clean-up stages.
//!
//! Each stage is a plain function taking a [`Structure`] by value and returning the
//! (possibly modified) structure with a [`StageReport`]. Stages are independent and
//! idempotent; [`CheckPipeline`] only fixes their order and reports progress.

mod contacts;
mod removal;
mod selection;

pub use contacts::{clashes, disulfides};
pub use removal::{hydrogens, ligands, metals, water};
pub use selection::{altloc, chains, models};

use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::structure::Structure;
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelection {
    /// Keep every model.
    Keep,
    /// Keep the first model.
    First,
    /// Keep the model with this serial number.
    Select(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainSelection {
    All,
    Ids(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltLocSelection {
    /// Highest occupancy wins; ties go to the first indicator alphabetically.
    Occupancy,
    /// This indicator wins where present, occupancy decides elsewhere.
    Id(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalSelection {
    /// Report matching residues without removing them.
    Keep,
    All,
    /// Remove matching residues with one of these names.
    Names(Vec<String>),
}

impl RemovalSelection {
    fn removes(&self, residue_name: &str) -> bool {
        match self {
            RemovalSelection::Keep => false,
            RemovalSelection::All => true,
            RemovalSelection::Names(names) => names
                .iter()
                .any(|name| name.trim().eq_ignore_ascii_case(residue_name.trim())),
        }
    }
}

/// One configured checking stage.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStage {
    Models(ModelSelection),
    Chains(ChainSelection),
    AltLoc(AltLocSelection),
    Metals(RemovalSelection),
    Ligands(RemovalSelection),
    Hydrogens,
    Water,
    Disulfides { cutoff: f64 },
    Clashes { cutoff: f64 },
}

impl CheckStage {
    pub fn name(&self) -> &'static str {
        match self {
            CheckStage::Models(_) => "models",
            CheckStage::Chains(_) => "chains",
            CheckStage::AltLoc(_) => "altloc",
            CheckStage::Metals(_) => "metals",
            CheckStage::Ligands(_) => "ligands",
            CheckStage::Hydrogens => "hydrogens",
            CheckStage::Water => "water",
            CheckStage::Disulfides { .. } => "getss",
            CheckStage::Clashes { .. } => "clashes",
        }
    }

    pub fn apply(&self, structure: Structure) -> Result<(Structure, StageReport), EngineError> {
        match self {
            CheckStage::Models(selection) => models(structure, selection),
            CheckStage::Chains(selection) => chains(structure, selection),
            CheckStage::AltLoc(selection) => altloc(structure, *selection),
            CheckStage::Metals(selection) => metals(structure, selection),
            CheckStage::Ligands(selection) => ligands(structure, selection),
            CheckStage::Hydrogens => hydrogens(structure),
            CheckStage::Water => water(structure),
            CheckStage::Disulfides { cutoff } => disulfides(structure, *cutoff),
            CheckStage::Clashes { cutoff } => clashes(structure, *cutoff),
        }
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    pub summary: String,
    /// Number of atoms, residues, chains or models removed, depending on the stage.
    pub removed: usize,
    /// One line per reported item (residue, bond candidate, clash).
    pub findings: Vec<String>,
}

impl StageReport {
    pub(crate) fn new(stage: &'static str, summary: String) -> Self {
        Self {
            stage,
            summary,
            removed: 0,
            findings: Vec::new(),
        }
    }
}

/// Ordered list of stages applied one after the other.
#[derive(Debug, Clone, Default)]
pub struct CheckPipeline {
    stages: Vec<CheckStage>,
}

impl CheckPipeline {
    pub fn new(stages: Vec<CheckStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[CheckStage] {
        &self.stages
    }

    #[instrument(skip_all, name = "check_pipeline")]
    pub fn run(
        &self,
        structure: Structure,
        reporter: &ProgressReporter,
    ) -> Result<(Structure, Vec<StageReport>), EngineError> {
        let mut current = structure;
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let (next, report) = reporter.phase(stage.name(), || stage.apply(current))?;
            info!(stage = report.stage, removed = report.removed, "{}", report.summary);
            reporter.report(Progress::Message(report.summary.clone()));
            current = next;
            reports.push(report);
        }

        Ok((current, reports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fixtures::structure_from;
    use std::sync::Mutex;

    fn dirty_structure() -> Structure {
        structure_from(&[
            ("A", 1, "ALA", "CA", [0.0, 0.0, 0.0]),
            ("A", 1, "ALA", "HA", [0.0, 1.0, 0.0]),
            ("A", 2, "NAG", "C1", [5.0, 0.0, 0.0]),
            ("A", 3, "ZN", "ZN", [9.0, 0.0, 0.0]),
            ("B", 1, "GLY", "CA", [0.0, 0.0, 4.0]),
            ("W", 1, "HOH", "O", [20.0, 0.0, 0.0]),
        ])
    }

    #[test]
    fn stage_names_match_command_vocabulary() {
        assert_eq!(CheckStage::Water.name(), "water");
        assert_eq!(CheckStage::Disulfides { cutoff: 2.5 }.name(), "getss");
        assert_eq!(CheckStage::AltLoc(AltLocSelection::Occupancy).name(), "altloc");
    }

    #[test]
    fn removal_selection_matches_names_case_insensitively() {
        let selection = RemovalSelection::Names(vec!["nag".to_string()]);
        assert!(selection.removes("NAG"));
        assert!(!selection.removes("BMA"));
        assert!(!RemovalSelection::Keep.removes("NAG"));
        assert!(RemovalSelection::All.removes("NAG"));
    }

    #[test]
    fn pipeline_applies_stages_in_order_and_collects_reports() {
        let pipeline = CheckPipeline::new(vec![
            CheckStage::Metals(RemovalSelection::All),
            CheckStage::Ligands(RemovalSelection::All),
            CheckStage::Hydrogens,
            CheckStage::Water,
        ]);
        let (structure, reports) = pipeline
            .run(dirty_structure(), &ProgressReporter::new())
            .unwrap();

        let names: Vec<&str> = reports.iter().map(|r| r.stage).collect();
        assert_eq!(names, vec!["metals", "ligands", "hydrogens", "water"]);
        let model = structure.first_model().unwrap();
        assert_eq!(model.atom_count(), 2);
        assert!(model.find_chain_by_id("W").is_none());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let pipeline = CheckPipeline::new(vec![
            CheckStage::Hydrogens,
            CheckStage::Water,
            CheckStage::Ligands(RemovalSelection::All),
        ]);
        let (once, _) = pipeline
            .run(dirty_structure(), &ProgressReporter::new())
            .unwrap();
        let atoms = once.atom_count();
        let (twice, reports) = pipeline.run(once, &ProgressReporter::new()).unwrap();
        assert_eq!(twice.atom_count(), atoms);
        assert!(reports.iter().all(|r| r.removed == 0));
    }

    #[test]
    fn pipeline_reports_each_stage_as_a_phase() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));
        let pipeline = CheckPipeline::new(vec![CheckStage::Water, CheckStage::Hydrogens]);
        pipeline.run(dirty_structure(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(phases.into_inner().unwrap(), vec!["water", "hydrogens"]);
    }

    #[test]
    fn pipeline_stops_at_the_first_failing_stage() {
        let pipeline = CheckPipeline::new(vec![
            CheckStage::Models(ModelSelection::Select(5)),
            CheckStage::Water,
        ]);
        let result = pipeline.run(dirty_structure(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::ModelNotFound { serial: 5 })));
    }

    #[test]
    fn failing_stage_still_closes_its_phase() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::PhaseStart { name } => format!("start {name}"),
                Progress::PhaseFinish => "finish".to_string(),
                _ => return,
            };
            events.lock().unwrap().push(label);
        }));
        let pipeline = CheckPipeline::new(vec![
            CheckStage::Water,
            CheckStage::Models(ModelSelection::Select(99)),
            CheckStage::Hydrogens,
        ]);
        let result = pipeline.run(dirty_structure(), &reporter);
        drop(reporter);

        assert!(matches!(result, Err(EngineError::ModelNotFound { serial: 99 })));
        assert_eq!(
            events.into_inner().unwrap(),
            vec!["start water", "finish", "start models", "finish"]
        );
    }
}
