//! Append-only session history for Exam Whisperer.

pub mod error;
pub mod store;

/// History error type.
pub use error::HistoryError;
/// History store interface and default file implementation.
pub use store::{FileHistoryStore, HistoryStore};
