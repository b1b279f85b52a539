//! Session history records and quiz attempts.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Number of options every quiz and quiz attempt carries.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// One logged Q&A or quiz-attempt event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    /// Time the recorder created the record.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Question asked by the user.
    #[serde(default)]
    pub question: String,
    /// Answer shown to the user.
    #[serde(default)]
    pub answer: String,
    /// Quiz attempt attached to the event; persisted as `{}` when absent.
    #[serde(
        default,
        serialize_with = "serialize_attempt",
        deserialize_with = "deserialize_attempt"
    )]
    pub quiz_attempt: Option<QuizAttempt>,
}

impl SessionRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        quiz_attempt: Option<QuizAttempt>,
    ) -> Self {
        Self::at(Utc::now(), question, answer, quiz_attempt)
    }

    /// Build a record with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        question: impl Into<String>,
        answer: impl Into<String>,
        quiz_attempt: Option<QuizAttempt>,
    ) -> Self {
        Self {
            timestamp,
            question: question.into(),
            answer: answer.into(),
            quiz_attempt,
        }
    }
}

/// A user's recorded response to a generated quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizAttempt {
    pub quiz_question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub selected_option: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Shape violations for a submitted quiz attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizAttemptError {
    #[error("quiz attempt must carry exactly 4 options, got {0}")]
    OptionCount(usize),
    #[error("correct answer {0:?} is not one of the options")]
    CorrectAnswerNotInOptions(String),
    #[error("selected option {0:?} is not one of the options")]
    SelectedNotInOptions(String),
}

impl QuizAttempt {
    /// Check the attempt against the quiz shape contract.
    pub fn validate(&self) -> Result<(), QuizAttemptError> {
        if self.options.len() != QUIZ_OPTION_COUNT {
            return Err(QuizAttemptError::OptionCount(self.options.len()));
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(QuizAttemptError::CorrectAnswerNotInOptions(
                self.correct_answer.clone(),
            ));
        }
        if !self.options.contains(&self.selected_option) {
            return Err(QuizAttemptError::SelectedNotInOptions(
                self.selected_option.clone(),
            ));
        }
        Ok(())
    }
}

/// Accept RFC 3339 timestamps and offset-less ISO-8601 ones (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {err}")))
}

fn serialize_attempt<S>(attempt: &Option<QuizAttempt>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match attempt {
        Some(attempt) => attempt.serialize(serializer),
        None => Map::new().serialize(serializer),
    }
}

pub(crate) fn deserialize_attempt<'de, D>(deserializer: D) -> Result<Option<QuizAttempt>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => QuizAttempt::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
