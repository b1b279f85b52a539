//! Error types for the session history.

/// Failures reading or rewriting the history log.
///
/// Unparseable file contents are not an error: stores recover them to an
/// empty history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode session history: {0}")]
    Serde(#[from] serde_json::Error),
}
