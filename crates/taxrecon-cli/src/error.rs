use std::path::PathBuf;

use taxrecon::{ConfigError, TaxReconError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a valid profile: {source}")]
    Profile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Recon(#[from] TaxReconError),

    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
