//! Voice placeholders for Exam Whisperer.
//!
//! No audio is processed: transcription returns canned text and synthesis
//! writes a text file standing in for audio.

pub mod error;
pub mod input;
pub mod output;

pub use error::VoiceError;
pub use input::{DEFAULT_TRANSCRIPT, GREETING_TRANSCRIPT, HISTORY_TRANSCRIPT, transcribe};
pub use output::{TtsEngine, synthesize};
