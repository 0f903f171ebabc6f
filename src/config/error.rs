use crate::maas::MaasError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in configuration: {reason}")]
    InvalidYaml { reason: String },

    #[error("Invalid maas settings: {0}")]
    Maas(#[from] MaasError),

    #[error("Invalid cache window '{value}': {reason}")]
    InvalidWindow { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
