use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileInterfaceConfig {
    pub chain_1: Option<String>,
    pub chain_2: Option<String>,
    pub distance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileEnergyConfig {
    pub residue_library: Option<PathBuf>,
    pub vdw_params: Option<PathBuf>,
    pub dielectric: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCheckConfig {
    pub stages: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    pub disulfide_cutoff: Option<f64>,
    pub clash_cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub interface: Option<FileInterfaceConfig>,
    pub energy: Option<FileEnergyConfig>,
    pub check: Option<FileCheckConfig>,
}

impl FileConfig {
    /// Reads a TOML configuration file. Relative paths inside it are resolved against
    /// the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration file {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let mut config: FileConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }
        Ok(config)
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(inner) = p.as_mut() {
                if inner.is_relative() {
                    *inner = base.join(&*inner);
                }
            }
        };
        if let Some(energy) = self.energy.as_mut() {
            resolve(&mut energy.residue_library);
            resolve(&mut energy.vdw_params);
        }
        if let Some(check) = self.check.as_mut() {
            resolve(&mut check.output);
        }
    }
}
