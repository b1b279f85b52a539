use exam_whisperer_protocol::{ErrorPayload, QuizValidationError};
use thiserror::Error;

/// Failures of a single chat-completion exchange.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("API Key is not set")]
    MissingCredential,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("error communicating with the provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode JSON response from the provider: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected response format from the provider: missing choices[0].message.content")]
    MissingContent { body: String },
}

impl ChatError {
    /// Raw provider body, when one was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            ChatError::Status { body, .. }
            | ChatError::Decode { body, .. }
            | ChatError::MissingContent { body } => Some(body),
            ChatError::MissingCredential | ChatError::Client(_) | ChatError::Transport(_) => None,
        }
    }
}

/// Failures of the answer client.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error(
        "OpenAI API Key is not set. Set provider.api_key or one of the provider.api_key_env variables."
    )]
    MissingCredential,
    #[error(transparent)]
    Provider(ChatError),
}

impl From<ChatError> for AnswerError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::MissingCredential => AnswerError::MissingCredential,
            other => AnswerError::Provider(other),
        }
    }
}

impl AnswerError {
    /// Render the failure as answer text for callers that only carry strings.
    pub fn into_answer(self) -> String {
        format!("Error: {self}")
    }
}

/// Failures of the quiz generator.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(
        "OpenAI API Key is not set for quiz generation. Set provider.api_key or one of the provider.api_key_env variables."
    )]
    MissingCredential,
    #[error(transparent)]
    Provider(ChatError),
    #[error("could not decode JSON quiz response: {source}")]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("generated quiz data has an invalid format or invalid answer: {reason}")]
    Invalid {
        raw: String,
        #[source]
        reason: QuizValidationError,
    },
}

impl From<ChatError> for QuizError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::MissingCredential => QuizError::MissingCredential,
            other => QuizError::Provider(other),
        }
    }
}

impl QuizError {
    /// Convert into the error body returned in place of a quiz.
    pub fn to_payload(&self) -> ErrorPayload {
        let raw = match self {
            QuizError::Decode { raw, .. } | QuizError::Invalid { raw, .. } => Some(raw.as_str()),
            QuizError::Provider(err) => err.raw_body(),
            QuizError::MissingCredential => None,
        };
        match raw {
            Some(raw) => ErrorPayload::with_raw(self.to_string(), raw),
            None => ErrorPayload::new(self.to_string()),
        }
    }
}
