//! Generated quiz model and its shape validation.

use crate::record::QUIZ_OPTION_COUNT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fields a generated quiz object must carry, and the only ones it may carry.
const QUIZ_FIELDS: [&str; 3] = ["question", "options", "answer"];

/// A validated multiple-choice quiz.
///
/// Instances only come out of [`Quiz::new`] or [`Quiz::from_value`], so the
/// answer is always one of four distinct options.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Quiz {
    question: String,
    options: [String; QUIZ_OPTION_COUNT],
    answer: String,
}

/// Reasons a candidate quiz object is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizValidationError {
    #[error("quiz must be a JSON object")]
    NotAnObject,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unexpected field: {0}")]
    UnexpectedField(String),
    #[error("field {field} must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
    #[error("quiz must have exactly 4 options, got {0}")]
    OptionCount(usize),
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    #[error("answer {0:?} is not one of the options")]
    AnswerNotInOptions(String),
}

impl Quiz {
    /// Build a quiz, enforcing the option and answer invariants.
    pub fn new(
        question: impl Into<String>,
        options: [String; QUIZ_OPTION_COUNT],
        answer: impl Into<String>,
    ) -> Result<Self, QuizValidationError> {
        let answer = answer.into();
        for (idx, option) in options.iter().enumerate() {
            if options[..idx].contains(option) {
                return Err(QuizValidationError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&answer) {
            return Err(QuizValidationError::AnswerNotInOptions(answer));
        }
        Ok(Self {
            question: question.into(),
            options,
            answer,
        })
    }

    /// Validate an arbitrary JSON value as a quiz.
    pub fn from_value(value: &Value) -> Result<Self, QuizValidationError> {
        let Value::Object(map) = value else {
            return Err(QuizValidationError::NotAnObject);
        };
        if let Some(key) = map.keys().find(|key| !QUIZ_FIELDS.contains(&key.as_str())) {
            return Err(QuizValidationError::UnexpectedField(key.clone()));
        }

        let question = expect_str(map.get("question"), "question")?;
        let options = match map.get("options") {
            None => return Err(QuizValidationError::MissingField("options")),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(QuizValidationError::WrongType {
                    field: "options".to_string(),
                    expected: "an array",
                });
            }
        };
        if options.len() != QUIZ_OPTION_COUNT {
            return Err(QuizValidationError::OptionCount(options.len()));
        }
        let mut collected: [String; QUIZ_OPTION_COUNT] = Default::default();
        for (idx, option) in options.iter().enumerate() {
            let Some(text) = option.as_str() else {
                return Err(QuizValidationError::WrongType {
                    field: format!("options[{idx}]"),
                    expected: "a string",
                });
            };
            collected[idx] = text.to_string();
        }
        let answer = expect_str(map.get("answer"), "answer")?;

        Self::new(question, collected, answer)
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl<'de> Deserialize<'de> for Quiz {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Quiz::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn expect_str<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a str, QuizValidationError> {
    match value {
        None => Err(QuizValidationError::MissingField(field)),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(QuizValidationError::WrongType {
            field: field.to_string(),
            expected: "a string",
        }),
    }
}

/// Error body returned in place of an answer or quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub error: String,
    /// Raw provider body or content kept for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_response: None,
        }
    }

    pub fn with_raw(error: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_response: Some(raw.into()),
        }
    }
}

/// Body of a quiz generation response: either a quiz or an error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuizOutcome {
    Quiz(Quiz),
    Error(ErrorPayload),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_quiz() {
        let quiz = Quiz::from_value(&json!({
            "question": "What is the main component of air?",
            "options": ["Nitrogen", "Oxygen", "Carbon Dioxide", "Hydrogen"],
            "answer": "Nitrogen"
        }))
        .expect("valid quiz");
        assert_eq!(quiz.answer(), "Nitrogen");
        assert_eq!(quiz.options().len(), 4);
    }

    #[test]
    fn rejects_wrong_option_counts() {
        let three = json!({ "question": "Q", "options": ["A", "B", "C"], "answer": "A" });
        assert_eq!(
            Quiz::from_value(&three),
            Err(QuizValidationError::OptionCount(3))
        );
        let five = json!({ "question": "Q", "options": ["A", "B", "C", "D", "E"], "answer": "A" });
        assert_eq!(
            Quiz::from_value(&five),
            Err(QuizValidationError::OptionCount(5))
        );
    }

    #[test]
    fn rejects_answer_outside_options() {
        let value = json!({ "question": "Q", "options": ["A", "B", "C", "D"], "answer": "E" });
        assert_eq!(
            Quiz::from_value(&value),
            Err(QuizValidationError::AnswerNotInOptions("E".to_string()))
        );
    }

    #[test]
    fn rejects_missing_and_extra_fields() {
        let missing = json!({ "question": "Q", "options": ["A", "B", "C", "D"] });
        assert_eq!(
            Quiz::from_value(&missing),
            Err(QuizValidationError::MissingField("answer"))
        );
        let extra = json!({
            "question": "Q",
            "options": ["A", "B", "C", "D"],
            "answer": "A",
            "hint": "first letter"
        });
        assert_eq!(
            Quiz::from_value(&extra),
            Err(QuizValidationError::UnexpectedField("hint".to_string()))
        );
    }

    #[test]
    fn rejects_non_string_options_and_duplicates() {
        let numeric = json!({ "question": "Q", "options": ["A", 2, "C", "D"], "answer": "A" });
        assert_eq!(
            Quiz::from_value(&numeric),
            Err(QuizValidationError::WrongType {
                field: "options[1]".to_string(),
                expected: "a string",
            })
        );
        let duplicate = json!({ "question": "Q", "options": ["A", "B", "A", "D"], "answer": "A" });
        assert_eq!(
            Quiz::from_value(&duplicate),
            Err(QuizValidationError::DuplicateOption("A".to_string()))
        );
    }

    #[test]
    fn outcome_serializes_without_tag() {
        let payload = QuizOutcome::Error(ErrorPayload::with_raw("bad quiz", "{}"));
        assert_eq!(
            serde_json::to_value(payload).expect("serialize"),
            json!({ "error": "bad quiz", "raw_response": "{}" })
        );
        let plain = QuizOutcome::Error(ErrorPayload::new("no key"));
        assert_eq!(
            serde_json::to_value(plain).expect("serialize"),
            json!({ "error": "no key" })
        );
    }
}
