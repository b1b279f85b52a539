//! Free-text answers to study questions.

use crate::chat::{ChatClient, ChatMessage, ChatRequest};
use crate::error::{AnswerError, ChatError};
use async_trait::async_trait;
use exam_whisperer_config::ProviderConfig;
use log::info;

pub const ANSWER_SYSTEM_PROMPT: &str = "You are Exam Whisperer, an AI assistant specialized in explaining educational topics concisely and accurately.";

/// Produces one textual answer for a prompt.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn answer_question(&self, prompt: &str) -> Result<String, AnswerError>;
}

/// Answer client backed by a chat-completion provider.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    chat: ChatClient,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerClient {
    pub fn new(chat: ChatClient, provider: &ProviderConfig) -> Self {
        Self {
            chat,
            model: provider.model.clone(),
            temperature: provider.temperature,
            max_tokens: provider.answer_max_tokens,
        }
    }

    pub fn from_config(provider: &ProviderConfig) -> Result<Self, ChatError> {
        Ok(Self::new(ChatClient::from_config(provider)?, provider))
    }

    /// Answer with an explicit model and temperature.
    ///
    /// Temperature is clamped to `[0.0, 2.0]`.
    pub async fn answer_with(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, AnswerError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(ANSWER_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: temperature.clamp(0.0, 2.0),
            max_tokens: self.max_tokens,
            response_format: None,
        };
        let answer = self.chat.complete(&request).await?;
        info!(
            "answer generated (model={model}, prompt_chars={}, answer_chars={})",
            prompt.len(),
            answer.len()
        );
        Ok(answer)
    }
}

#[async_trait]
impl AnswerProvider for AnswerClient {
    async fn answer_question(&self, prompt: &str) -> Result<String, AnswerError> {
        self.answer_with(prompt, &self.model, self.temperature).await
    }
}
