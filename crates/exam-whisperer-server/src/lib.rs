//! HTTP server for Exam Whisperer.
//!
//! Routes are thin: each one calls an [`AppState`] operation and maps the
//! result to JSON. Provider failures are returned as data with a 200 status;
//! only history store failures, malformed request bodies and malformed quiz
//! attempts produce error statuses.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiJson, ServerError};
pub use routes::router;
pub use server::serve;
pub use state::AppState;
