use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{ChainPairArgs, CheckArgs, EnergyArgs};
use crate::error::{CliError, Result};
use crate::utils::parser::{self, StageCutoffs};
use biface::engine::config::{
    CheckConfig, CheckConfigBuilder, EnergyConfig, EnergyConfigBuilder, InterfaceConfig,
    InterfaceConfigBuilder,
};
use std::path::{Path, PathBuf};
use tracing::debug;

fn load_file_config(config_path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

struct ChainPair {
    chain_1: Option<String>,
    chain_2: Option<String>,
    distance: Option<f64>,
}

fn merge_chain_pair(args: &ChainPairArgs, file_config: &mut FileConfig) -> ChainPair {
    let file = file_config.interface.take().unwrap_or_default();
    ChainPair {
        chain_1: args.chain_1.clone().or(file.chain_1),
        chain_2: args.chain_2.clone().or(file.chain_2),
        distance: args.distance.or(file.distance),
    }
}

pub fn build_interface_config(args: &ChainPairArgs) -> Result<InterfaceConfig> {
    let mut file_config = load_file_config(args.config.as_deref(), &args.set_values)?;
    let pair = merge_chain_pair(args, &mut file_config);

    let mut builder = InterfaceConfigBuilder::new().input_path(args.input.clone());
    if let Some(chain_1) = pair.chain_1 {
        builder = builder.chain_1(chain_1);
    }
    if let Some(chain_2) = pair.chain_2 {
        builder = builder.chain_2(chain_2);
    }
    if let Some(distance) = pair.distance {
        builder = builder.distance(distance);
    }

    let config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved interface configuration: {:?}", config);
    Ok(config)
}

pub fn build_energy_config(args: &EnergyArgs) -> Result<EnergyConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(args.pair.config.as_deref(), &args.pair.set_values)?;
    let pair = merge_chain_pair(&args.pair, &mut file_config);
    let energy_file = file_config.energy.take().unwrap_or_default();

    let dielectric_spec = args
        .dielectric
        .clone()
        .or(energy_file.dielectric)
        .unwrap_or(defaults.dielectric);
    let dielectric = parser::parse_dielectric(&dielectric_spec)
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let mut builder = EnergyConfigBuilder::new()
        .input_path(args.pair.input.clone())
        .dielectric(dielectric);
    if let Some(chain_1) = pair.chain_1 {
        builder = builder.chain_1(chain_1);
    }
    if let Some(chain_2) = pair.chain_2 {
        builder = builder.chain_2(chain_2);
    }
    if let Some(distance) = pair.distance {
        builder = builder.distance(distance);
    }
    if let Some(path) = args.residue_library.clone().or(energy_file.residue_library) {
        builder = builder.residue_library_path(path);
    }
    if let Some(path) = args.vdw_params.clone().or(energy_file.vdw_params) {
        builder = builder.vdw_params_path(path);
    }

    let config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved energy configuration: {:?}", config);
    Ok(config)
}

pub fn build_check_config(args: &CheckArgs) -> Result<CheckConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(args.config.as_deref(), &args.set_values)?;
    let check_file = file_config.check.take().unwrap_or_default();

    let cutoffs = StageCutoffs {
        disulfide: check_file
            .disulfide_cutoff
            .unwrap_or(defaults.disulfide_cutoff),
        clash: check_file.clash_cutoff.unwrap_or(defaults.clash_cutoff),
    };

    let stage_specs = if !args.stages.is_empty() {
        args.stages.clone()
    } else {
        check_file.stages.unwrap_or(defaults.stages)
    };
    let stages = stage_specs
        .iter()
        .map(|spec| parser::parse_stage(spec, cutoffs))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let output_path: Option<PathBuf> = args.output.clone().or(check_file.output);

    let config = CheckConfigBuilder::new()
        .input_path(args.input.clone())
        .output_path(output_path)
        .stages(stages)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved check configuration: {:?}", config);
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0].trim();
        let value_str = parts[1].trim();

        match key {
            "interface.chain-1" => {
                config
                    .interface
                    .get_or_insert_with(Default::default)
                    .chain_1 = Some(value_str.to_string());
            }
            "interface.chain-2" => {
                config
                    .interface
                    .get_or_insert_with(Default::default)
                    .chain_2 = Some(value_str.to_string());
            }
            "interface.distance" => {
                config
                    .interface
                    .get_or_insert_with(Default::default)
                    .distance = Some(parse_value(key, value_str, "float")?);
            }
            "energy.residue-library" => {
                config
                    .energy
                    .get_or_insert_with(Default::default)
                    .residue_library = Some(PathBuf::from(value_str));
            }
            "energy.vdw-params" => {
                config
                    .energy
                    .get_or_insert_with(Default::default)
                    .vdw_params = Some(PathBuf::from(value_str));
            }
            "energy.dielectric" => {
                config
                    .energy
                    .get_or_insert_with(Default::default)
                    .dielectric = Some(value_str.to_string());
            }
            "check.stages" => {
                config.check.get_or_insert_with(Default::default).stages = Some(
                    value_str
                        .split(';')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "check.output" => {
                config.check.get_or_insert_with(Default::default).output =
                    Some(PathBuf::from(value_str));
            }
            "check.disulfide-cutoff" => {
                config
                    .check
                    .get_or_insert_with(Default::default)
                    .disulfide_cutoff = Some(parse_value(key, value_str, "float")?);
            }
            "check.clash-cutoff" => {
                config
                    .check
                    .get_or_insert_with(Default::default)
                    .clash_cutoff = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use biface::engine::checking::{AltLocSelection, CheckStage, ModelSelection};
    use biface::engine::config::Dielectric;
    use std::fs;
    use tempfile::tempdir;

    fn pair_args() -> ChainPairArgs {
        ChainPairArgs {
            input: PathBuf::from("complex.pdb"),
            chain_1: None,
            chain_2: None,
            distance: None,
            config: None,
            set_values: vec![],
        }
    }

    fn energy_args(pair: ChainPairArgs) -> EnergyArgs {
        EnergyArgs {
            pair,
            residue_library: None,
            vdw_params: None,
            dielectric: None,
            output: None,
            format: OutputFormat::Text,
        }
    }

    fn check_args() -> CheckArgs {
        CheckArgs {
            input: PathBuf::from("raw.cif"),
            output: None,
            config: None,
            stages: vec![],
            set_values: vec![],
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("biface.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn interface_config_from_cli_flags() {
        let mut args = pair_args();
        args.chain_1 = Some("A".to_string());
        args.chain_2 = Some("E".to_string());
        args.distance = Some(4.0);

        let config = build_interface_config(&args).unwrap();
        assert_eq!(config.input_path, PathBuf::from("complex.pdb"));
        assert_eq!(config.chain_1, "A");
        assert_eq!(config.chain_2, "E");
        assert_eq!(config.distance, 4.0);
    }

    #[test]
    fn interface_config_requires_a_distance() {
        let mut args = pair_args();
        args.chain_1 = Some("A".to_string());
        args.chain_2 = Some("E".to_string());

        let err = build_interface_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("distance")));
    }

    #[test]
    fn interface_config_rejects_negative_distance_and_identical_chains() {
        let mut args = pair_args();
        args.chain_1 = Some("A".to_string());
        args.chain_2 = Some("E".to_string());
        args.distance = Some(-1.0);
        assert!(matches!(
            build_interface_config(&args),
            Err(CliError::Config(_))
        ));

        args.distance = Some(4.0);
        args.chain_2 = Some("A".to_string());
        assert!(matches!(
            build_interface_config(&args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn cli_flags_override_file_and_set_values_override_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [interface]
            chain-1 = "A"
            chain-2 = "B"
            distance = 5.0
            "#,
        );
        let mut args = pair_args();
        args.config = Some(path);
        args.chain_2 = Some("E".to_string());
        args.set_values = vec!["interface.distance=3.5".to_string()];

        let config = build_interface_config(&args).unwrap();
        assert_eq!(config.chain_1, "A");
        assert_eq!(config.chain_2, "E");
        assert_eq!(config.distance, 3.5);
    }

    #[test]
    fn set_values_reject_bad_format_and_unknown_keys() {
        let mut args = pair_args();
        args.set_values = vec!["interface.distance".to_string()];
        let err = build_interface_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("KEY=VALUE")));

        args.set_values = vec!["interface.cutoff=4".to_string()];
        let err = build_interface_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("Unsupported")));

        args.set_values = vec!["interface.distance=far".to_string()];
        let err = build_interface_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("Invalid float")));
    }

    #[test]
    fn energy_config_uses_default_dielectric() {
        let mut pair = pair_args();
        pair.chain_1 = Some("A".to_string());
        pair.chain_2 = Some("E".to_string());
        pair.distance = Some(4.0);
        let mut args = energy_args(pair);
        args.residue_library = Some(PathBuf::from("aaLib.lib"));
        args.vdw_params = Some(PathBuf::from("vdw.txt"));

        let config = build_energy_config(&args).unwrap();
        assert_eq!(config.dielectric, Dielectric::MehlerSolmajer);
        assert_eq!(config.interface.chain_2, "E");
        assert_eq!(config.residue_library_path, PathBuf::from("aaLib.lib"));
    }

    #[test]
    fn energy_config_reads_paths_from_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [interface]
            chain-1 = "A"
            chain-2 = "E"
            distance = 4.0

            [energy]
            residue-library = "aaLib.lib"
            vdw-params = "vdw.txt"
            dielectric = "constant=4"
            "#,
        );
        let mut pair = pair_args();
        pair.config = Some(path);
        let args = energy_args(pair);

        let config = build_energy_config(&args).unwrap();
        assert_eq!(config.residue_library_path, dir.path().join("aaLib.lib"));
        assert_eq!(config.vdw_params_path, dir.path().join("vdw.txt"));
        assert_eq!(config.dielectric, Dielectric::Constant(4.0));
    }

    #[test]
    fn energy_config_requires_parameter_files() {
        let mut pair = pair_args();
        pair.chain_1 = Some("A".to_string());
        pair.chain_2 = Some("E".to_string());
        pair.distance = Some(4.0);
        let args = energy_args(pair);

        let err = build_energy_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("residue_library_path")));
    }

    #[test]
    fn energy_config_rejects_unknown_dielectric() {
        let mut args = energy_args(pair_args());
        args.dielectric = Some("vacuum".to_string());
        assert!(matches!(
            build_energy_config(&args),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn check_config_falls_back_to_default_stages() {
        let config = build_check_config(&check_args()).unwrap();
        assert_eq!(
            config.stages,
            vec![
                CheckStage::Models(ModelSelection::First),
                CheckStage::AltLoc(AltLocSelection::Occupancy),
                CheckStage::Disulfides { cutoff: 2.5 },
                CheckStage::Clashes { cutoff: 1.0 },
            ]
        );
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn check_config_applies_file_cutoffs_to_cli_stages() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [check]
            stages = ["water"]
            disulfide-cutoff = 2.2
            output = "clean.pdb"
            "#,
        );
        let mut args = check_args();
        args.config = Some(path);
        args.stages = vec!["getss".to_string(), "hydrogens".to_string()];
        args.set_values = vec!["check.clash-cutoff=0.7".to_string()];

        let config = build_check_config(&args).unwrap();
        assert_eq!(
            config.stages,
            vec![CheckStage::Disulfides { cutoff: 2.2 }, CheckStage::Hydrogens]
        );
        assert_eq!(config.output_path, Some(dir.path().join("clean.pdb")));
    }

    #[test]
    fn check_config_reads_stage_list_from_set_values() {
        let mut args = check_args();
        args.set_values = vec!["check.stages=chains=A,E; water; clashes".to_string()];

        let config = build_check_config(&args).unwrap();
        assert_eq!(config.stages.len(), 3);
        assert_eq!(config.stages[1], CheckStage::Water);
        assert_eq!(config.stages[2], CheckStage::Clashes { cutoff: 1.0 });
    }

    #[test]
    fn check_config_rejects_unknown_stage_and_negative_cutoff() {
        let mut args = check_args();
        args.stages = vec!["rebuild".to_string()];
        assert!(matches!(
            build_check_config(&args),
            Err(CliError::Argument(_))
        ));

        args.stages = vec!["clashes=-1".to_string()];
        assert!(matches!(
            build_check_config(&args),
            Err(CliError::Config(_))
        ));
    }
}
