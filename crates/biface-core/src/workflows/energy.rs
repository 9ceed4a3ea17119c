use super::load_structure;
use crate::core::forcefield::params::{ResidueLibrary, VdwParamSet};
use crate::engine::config::EnergyConfig;
use crate::engine::energy::{InterfaceEnergy, interface_energy};
use crate::engine::error::EngineError;
use crate::engine::interface::{InterfaceSet, find_interface_with_progress};
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct EnergyResult {
    pub structure_id: String,
    pub interface: InterfaceSet,
    pub energy: InterfaceEnergy,
}

#[instrument(skip_all, name = "energy_workflow")]
pub fn run(config: &EnergyConfig, reporter: &ProgressReporter) -> Result<EnergyResult, EngineError> {
    let (library, vdw) = reporter.phase("Loading parameters", || {
        let library = ResidueLibrary::load(&config.residue_library_path)?;
        let vdw = VdwParamSet::load(&config.vdw_params_path)?;
        info!(
            library_entries = library.len(),
            atom_types = vdw.len(),
            "Parameters loaded."
        );
        Ok::<_, EngineError>((library, vdw))
    })?;

    let structure = load_structure(&config.interface.input_path, reporter)?;
    let model = structure.first_model().ok_or(EngineError::EmptyStructure)?;

    let interface = reporter.phase("Interface search", || {
        find_interface_with_progress(
            &structure,
            &config.interface.chain_1,
            &config.interface.chain_2,
            config.interface.distance,
            reporter,
        )
    })?;

    let energy = reporter.phase("Energy evaluation", || {
        interface_energy(model, &interface, &library, &vdw, config.dielectric)
    })?;

    Ok(EnergyResult {
        structure_id: structure.id.clone(),
        interface,
        energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{Dielectric, EnergyConfigBuilder};
    use crate::workflows::interface::tests::complex_file;
    use std::fs;

    #[test]
    fn run_loads_parameters_and_scores_the_interface() {
        let input = complex_file();
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("aaLib.lib");
        fs::write(&library, "LYS NZ N3 1.0\nASP OD1 O2 -1.0\n").unwrap();
        let vdw = dir.path().join("vdwprm");
        fs::write(&vdw, "N3 0.17 3.25 14.01 1.0\nO2 0.21 2.96 16.00 1.0\n").unwrap();

        let config = EnergyConfigBuilder::new()
            .input_path(input.path().to_path_buf())
            .chain_1("A")
            .chain_2("E")
            .distance(4.0)
            .residue_library_path(library)
            .vdw_params_path(vdw)
            .dielectric(Dielectric::Constant(1.0))
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();

        // The water in chain E has no library entry.
        assert_eq!(result.energy.skipped_atoms, 1);
        assert!(result.energy.electrostatic < 0.0);
    }

    #[test]
    fn run_fails_on_missing_parameter_file() {
        let input = complex_file();
        let dir = tempfile::tempdir().unwrap();
        let config = EnergyConfigBuilder::new()
            .input_path(input.path().to_path_buf())
            .chain_1("A")
            .chain_2("E")
            .distance(4.0)
            .residue_library_path(dir.path().join("none.lib"))
            .vdw_params_path(dir.path().join("none.prm"))
            .dielectric(Dielectric::MehlerSolmajer)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Params { .. })));
    }
}
