use crate::error::VoiceError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Text-to-speech backend being simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngine {
    #[default]
    Pyttsx3,
    Omnidimension,
}

impl TtsEngine {
    fn label(self) -> &'static str {
        match self {
            TtsEngine::Pyttsx3 => "pyttsx3",
            TtsEngine::Omnidimension => "Omnidimension",
        }
    }
}

impl fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtsEngine::Pyttsx3 => f.write_str("pyttsx3"),
            TtsEngine::Omnidimension => f.write_str("omnidimension"),
        }
    }
}

impl FromStr for TtsEngine {
    type Err = VoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pyttsx3" => Ok(TtsEngine::Pyttsx3),
            "omnidimension" => Ok(TtsEngine::Omnidimension),
            other => Err(VoiceError::UnsupportedEngine(other.to_string())),
        }
    }
}

/// Simulated text-to-speech.
///
/// Logs the spoken text and, when `output` is set, writes a placeholder file
/// in place of real audio. Returns the path written, if any.
pub fn synthesize(
    text: &str,
    engine: TtsEngine,
    output: Option<&Path>,
) -> Result<Option<PathBuf>, VoiceError> {
    info!("simulating speech (engine={engine}, chars={})", text.len());
    let Some(path) = output else {
        return Ok(None);
    };
    let contents = format!("Simulated audio content for: '{text}' ({})", engine.label());
    fs::write(path, contents).map_err(|source| VoiceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("simulated audio saved (engine={engine}, path={})", path.display());
    Ok(Some(path.to_path_buf()))
}
