use crate::error::VoiceError;
use log::info;
use std::path::Path;

pub const GREETING_TRANSCRIPT: &str = "Hello Exam Whisperer, how can you help me today?";
pub const HISTORY_TRANSCRIPT: &str = "Can you explain the main causes of World War One?";
pub const DEFAULT_TRANSCRIPT: &str =
    "This is a transcribed placeholder text from your audio input.";

/// Simulated speech-to-text.
///
/// The audio itself is never decoded; the transcript is picked from the file
/// name so callers can exercise the voice flow end to end.
pub fn transcribe(path: impl AsRef<Path>) -> Result<String, VoiceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(VoiceError::NotFound(path.to_path_buf()));
    }
    info!("simulating audio transcription (path={})", path.display());

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let transcript = if name.contains("hello") || name.contains("intro") {
        GREETING_TRANSCRIPT
    } else if name.contains("history") || name.contains("ww1") {
        HISTORY_TRANSCRIPT
    } else {
        DEFAULT_TRANSCRIPT
    };
    Ok(transcript.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn transcript_follows_file_name() {
        let temp = tempdir().expect("tempdir");
        let cases = [
            ("dummy_hello.wav", GREETING_TRANSCRIPT),
            ("Intro.mp3", GREETING_TRANSCRIPT),
            ("history_question.mp3", HISTORY_TRANSCRIPT),
            ("ww1.ogg", HISTORY_TRANSCRIPT),
            ("random_audio.ogg", DEFAULT_TRANSCRIPT),
        ];
        for (name, expected) in cases {
            let path = temp.path().join(name);
            fs::write(&path, b"not really audio").expect("write");
            assert_eq!(transcribe(&path).expect("transcribe"), expected);
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let err = transcribe(temp.path().join("hello.wav")).expect_err("missing");
        assert!(matches!(err, VoiceError::NotFound(_)));
        assert!(err.to_string().starts_with("audio file not found at"));
    }
}
