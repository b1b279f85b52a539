//! Test helpers shared across Exam Whisperer crates.

pub mod history;
pub mod llm;
pub mod logging;
pub mod provider;

pub use history::{FailingHistory, StubHistory};
pub use llm::{FixedAnswer, FixedQuiz, sample_quiz};
pub use logging::{CapturedLog, LogCapture};
pub use provider::{MockProvider, MockReply, MockRequest};
