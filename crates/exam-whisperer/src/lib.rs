//! Public SDK surface for Exam Whisperer.
//!
//! This crate re-exports the building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use exam_whisperer_config as config;
/// Re-export for convenience.
pub use exam_whisperer_history as history;
pub use exam_whisperer_llm as llm;
/// Re-export for convenience.
pub use exam_whisperer_protocol as protocol;
pub use exam_whisperer_server as server;
pub use exam_whisperer_voice as voice;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// Defaults to `info` when `RUST_LOG` is unset. This is a no-op if the
/// feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .try_init();
    }
}
