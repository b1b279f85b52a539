//! Wire types shared by the history store, the model clients, and the HTTP
//! surface of Exam Whisperer.

mod quiz;
mod record;

pub use quiz::{ErrorPayload, Quiz, QuizOutcome, QuizValidationError};
pub use record::{QUIZ_OPTION_COUNT, QuizAttempt, QuizAttemptError, SessionRecord};

use serde::{Deserialize, Serialize};

/// Body of `POST /ask_ai`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// Response of `POST /ask_ai`. Provider failures are carried as answer text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: String,
}

/// Body of `POST /generate_quiz`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizRequest {
    #[serde(default)]
    pub topic_or_answer: String,
}

/// Body of `POST /log_quiz_attempt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogQuizAttemptRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default, deserialize_with = "record::deserialize_attempt")]
    pub quiz_attempt: Option<QuizAttempt>,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `DELETE /history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClearHistoryResponse {
    pub message: String,
    /// Whether a backing file existed and was removed.
    pub cleared: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_bodies_default_missing_fields() {
        let ask: AskRequest = serde_json::from_value(json!({})).expect("ask");
        assert_eq!(ask.question, "");
        let quiz: QuizRequest = serde_json::from_value(json!({})).expect("quiz");
        assert_eq!(quiz.topic_or_answer, "");
        let log: LogQuizAttemptRequest =
            serde_json::from_value(json!({ "question": "q" })).expect("log");
        assert_eq!(log.answer, "");
        assert_eq!(log.quiz_attempt, None);
        let empty: LogQuizAttemptRequest =
            serde_json::from_value(json!({ "question": "q", "quiz_attempt": {} })).expect("log");
        assert_eq!(empty.quiz_attempt, None);
    }

    #[test]
    fn log_request_reads_attempt() {
        let log: LogQuizAttemptRequest = serde_json::from_value(json!({
            "question": "Explain Renaissance art.",
            "answer": "Renaissance art emerged in Italy...",
            "quiz_attempt": {
                "quiz_question": "Who painted the Mona Lisa?",
                "options": ["Vincent van Gogh", "Pablo Picasso", "Leonardo da Vinci", "Claude Monet"],
                "selected_option": "Pablo Picasso",
                "correct_answer": "Leonardo da Vinci",
                "is_correct": false
            }
        }))
        .expect("log");
        let attempt = log.quiz_attempt.expect("attempt");
        assert!(!attempt.is_correct);
        assert_eq!(attempt.validate(), Ok(()));
    }
}
