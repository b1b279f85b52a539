//! Multiple-choice quiz generation with strict shape validation.

use crate::chat::{ChatClient, ChatMessage, ChatRequest, ResponseFormat};
use crate::error::{ChatError, QuizError};
use async_trait::async_trait;
use exam_whisperer_config::ProviderConfig;
use exam_whisperer_protocol::Quiz;
use log::{info, warn};
use serde_json::Value;

pub const QUIZ_SYSTEM_PROMPT: &str =
    "You are a quiz master. Generate quizzes in strict JSON format.";

/// Produces a validated quiz for a topic or a prior answer.
#[async_trait]
pub trait QuizProvider: Send + Sync {
    async fn generate_quiz(&self, topic_or_answer: &str) -> Result<Quiz, QuizError>;
}

/// Build the user prompt asking for one quiz about `topic_or_answer`.
pub fn quiz_prompt(topic_or_answer: &str) -> String {
    format!(
        "Generate a single multiple-choice question (MCQ) quiz based on the following text/topic.\n\
         The quiz should have:\n\
         1. A 'question' field (string).\n\
         2. An 'options' field (an array of 4 strings).\n\
         3. An 'answer' field (string) which is one of the options.\n\
         Ensure the answer is one of the provided options.\n\
         \n\
         Respond ONLY with a JSON object. Do not include any other text or markdown.\n\
         Ensure the JSON is perfectly parsable and follows the structure exactly.\n\
         \n\
         Text/Topic for Quiz:\n\
         \"{topic_or_answer}\""
    )
}

/// Validate raw model content as a quiz.
pub fn parse_quiz(raw: &str) -> Result<Quiz, QuizError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| QuizError::Decode {
        raw: raw.to_string(),
        source,
    })?;
    Quiz::from_value(&value).map_err(|reason| QuizError::Invalid {
        raw: raw.to_string(),
        reason,
    })
}

/// Quiz generator backed by a chat-completion provider.
#[derive(Debug, Clone)]
pub struct QuizGenerator {
    chat: ChatClient,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl QuizGenerator {
    pub fn new(chat: ChatClient, provider: &ProviderConfig) -> Self {
        Self {
            chat,
            model: provider.model.clone(),
            temperature: provider.temperature,
            max_tokens: provider.quiz_max_tokens,
        }
    }

    pub fn from_config(provider: &ProviderConfig) -> Result<Self, ChatError> {
        Ok(Self::new(ChatClient::from_config(provider)?, provider))
    }

    fn request(&self, topic_or_answer: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(QUIZ_SYSTEM_PROMPT),
                ChatMessage::user(quiz_prompt(topic_or_answer)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: Some(ResponseFormat::json_object()),
        }
    }
}

#[async_trait]
impl QuizProvider for QuizGenerator {
    async fn generate_quiz(&self, topic_or_answer: &str) -> Result<Quiz, QuizError> {
        let raw = self.chat.complete(&self.request(topic_or_answer)).await?;
        match parse_quiz(&raw) {
            Ok(quiz) => {
                info!("quiz generated (model={}, options={})", self.model, quiz.options().len());
                Ok(quiz)
            }
            Err(err) => {
                warn!("generated quiz rejected (model={}): {err}", self.model);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_embeds_topic_and_shape() {
        let prompt = quiz_prompt("photosynthesis");
        assert!(prompt.contains("\"photosynthesis\""));
        assert!(prompt.contains("an array of 4 strings"));
        assert!(prompt.contains("Respond ONLY with a JSON object"));
    }

    #[test]
    fn parse_quiz_distinguishes_decode_and_shape_failures() {
        let err = parse_quiz("Sure! Here is your quiz").expect_err("not json");
        match err {
            QuizError::Decode { raw, .. } => assert_eq!(raw, "Sure! Here is your quiz"),
            other => panic!("unexpected error: {other:?}"),
        }

        let three = r#"{"question":"Q","options":["A","B","C"],"answer":"A"}"#;
        match parse_quiz(three).expect_err("three options") {
            QuizError::Invalid { raw, .. } => assert_eq!(raw, three),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_quiz_accepts_valid_content() {
        let quiz = parse_quiz(
            r#"{"question":"Capital of France?","options":["Berlin","Madrid","Paris","Rome"],"answer":"Paris"}"#,
        )
        .expect("quiz");
        assert_eq!(quiz.answer(), "Paris");
    }
}
