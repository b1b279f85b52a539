//! Error types for config loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A config layer is not valid JSON5.
    #[error("failed to parse config {layer}: {source}")]
    Parse {
        layer: String,
        #[source]
        source: json5::Error,
    },
    /// The merged document did not decode into the config model.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    /// A specific field failed validation.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
}
