use super::checking::CheckStage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {value} (must be a finite, non-negative number)")]
    InvalidDistance { parameter: &'static str, value: f64 },
    #[error("Chain identifier for '{0}' must not be empty")]
    EmptyChainId(&'static str),
    #[error("Both chains are '{0}'; an interface needs two different chains")]
    IdenticalChains(String),
    #[error("Dielectric constant must be a finite, positive number (got {0})")]
    InvalidDielectric(f64),
}

fn validate_distance(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDistance { parameter, value })
    }
}

fn validate_chain_pair(chain_1: String, chain_2: String) -> Result<(String, String), ConfigError> {
    let chain_1 = chain_1.trim().to_string();
    let chain_2 = chain_2.trim().to_string();
    if chain_1.is_empty() {
        return Err(ConfigError::EmptyChainId("chain_1"));
    }
    if chain_2.is_empty() {
        return Err(ConfigError::EmptyChainId("chain_2"));
    }
    if chain_1 == chain_2 {
        return Err(ConfigError::IdenticalChains(chain_1));
    }
    Ok((chain_1, chain_2))
}

/// Dielectric model used for electrostatics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dielectric {
    Constant(f64),
    MehlerSolmajer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceConfig {
    pub input_path: PathBuf,
    pub chain_1: String,
    pub chain_2: String,
    pub distance: f64,
}

#[derive(Default)]
pub struct InterfaceConfigBuilder {
    input_path: Option<PathBuf>,
    chain_1: Option<String>,
    chain_2: Option<String>,
    distance: Option<f64>,
}

impl InterfaceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn chain_1(mut self, id: impl Into<String>) -> Self {
        self.chain_1 = Some(id.into());
        self
    }
    pub fn chain_2(mut self, id: impl Into<String>) -> Self {
        self.chain_2 = Some(id.into());
        self
    }
    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn build(self) -> Result<InterfaceConfig, ConfigError> {
        let input_path = self
            .input_path
            .ok_or(ConfigError::MissingParameter("input_path"))?;
        let (chain_1, chain_2) = validate_chain_pair(
            self.chain_1.ok_or(ConfigError::MissingParameter("chain_1"))?,
            self.chain_2.ok_or(ConfigError::MissingParameter("chain_2"))?,
        )?;
        let distance = validate_distance(
            "distance",
            self.distance
                .ok_or(ConfigError::MissingParameter("distance"))?,
        )?;
        Ok(InterfaceConfig {
            input_path,
            chain_1,
            chain_2,
            distance,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub stages: Vec<CheckStage>,
}

#[derive(Default)]
pub struct CheckConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    stages: Option<Vec<CheckStage>>,
}

impl CheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }
    pub fn stages(mut self, stages: Vec<CheckStage>) -> Self {
        self.stages = Some(stages);
        self
    }

    pub fn build(self) -> Result<CheckConfig, ConfigError> {
        let stages = self.stages.ok_or(ConfigError::MissingParameter("stages"))?;
        for stage in &stages {
            match stage {
                CheckStage::Disulfides { cutoff } => {
                    validate_distance("getss.cutoff", *cutoff)?;
                }
                CheckStage::Clashes { cutoff } => {
                    validate_distance("clashes.cutoff", *cutoff)?;
                }
                _ => {}
            }
        }
        Ok(CheckConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_path: self.output_path,
            stages,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyConfig {
    pub interface: InterfaceConfig,
    pub residue_library_path: PathBuf,
    pub vdw_params_path: PathBuf,
    pub dielectric: Dielectric,
}

#[derive(Default)]
pub struct EnergyConfigBuilder {
    interface: InterfaceConfigBuilder,
    residue_library_path: Option<PathBuf>,
    vdw_params_path: Option<PathBuf>,
    dielectric: Option<Dielectric>,
}

impl EnergyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.interface = self.interface.input_path(path);
        self
    }
    pub fn chain_1(mut self, id: impl Into<String>) -> Self {
        self.interface = self.interface.chain_1(id);
        self
    }
    pub fn chain_2(mut self, id: impl Into<String>) -> Self {
        self.interface = self.interface.chain_2(id);
        self
    }
    pub fn distance(mut self, distance: f64) -> Self {
        self.interface = self.interface.distance(distance);
        self
    }
    pub fn residue_library_path(mut self, path: PathBuf) -> Self {
        self.residue_library_path = Some(path);
        self
    }
    pub fn vdw_params_path(mut self, path: PathBuf) -> Self {
        self.vdw_params_path = Some(path);
        self
    }
    pub fn dielectric(mut self, dielectric: Dielectric) -> Self {
        self.dielectric = Some(dielectric);
        self
    }

    pub fn build(self) -> Result<EnergyConfig, ConfigError> {
        let dielectric = self
            .dielectric
            .ok_or(ConfigError::MissingParameter("dielectric"))?;
        if let Dielectric::Constant(value) = dielectric {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDielectric(value));
            }
        }
        Ok(EnergyConfig {
            interface: self.interface.build()?,
            residue_library_path: self
                .residue_library_path
                .ok_or(ConfigError::MissingParameter("residue_library_path"))?,
            vdw_params_path: self
                .vdw_params_path
                .ok_or(ConfigError::MissingParameter("vdw_params_path"))?,
            dielectric,
        })
    }
}
