use thiserror::Error;

use crate::core::forcefield::params::ParamLoadError;
use crate::core::io::StructureIoError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure contains no models")]
    EmptyStructure,

    #[error("Chain '{chain_id}' not found in the first model")]
    ChainNotFound { chain_id: String },

    #[error("Both chains are '{chain_id}'; an interface needs two different chains")]
    IdenticalChains { chain_id: String },

    #[error("Invalid distance cutoff: {value}")]
    InvalidDistance { value: f64 },

    #[error("Model {serial} not found in structure")]
    ModelNotFound { serial: usize },

    #[error("Structure I/O failed: {source}")]
    Io {
        #[from]
        source: StructureIoError,
    },

    #[error("Parameter loading failed: {source}")]
    Params {
        #[from]
        source: ParamLoadError,
    },
}
