use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("audio file not found at {0}")]
    NotFound(PathBuf),
    #[error("unsupported engine type: {0}")]
    UnsupportedEngine(String),
    #[error("failed to write audio output to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
