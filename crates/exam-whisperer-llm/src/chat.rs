//! Minimal chat-completion transport shared by the answer and quiz clients.

use crate::error::ChatError;
use exam_whisperer_config::ProviderConfig;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Credential values shipped as placeholders in sample configs.
const PLACEHOLDER_KEYS: [&str; 3] = ["***", "**", "YOUR_OPENAI_API_KEY_HERE"];

/// Whether a configured credential is usable for an outbound call.
pub fn is_usable_credential(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// `response_format` request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// Body of one chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Posts chat-completion requests to one endpoint with one credential.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Build a client with a bounded per-request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ChatError::Client)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Build a client from provider config, resolving the credential.
    pub fn from_config(provider: &ProviderConfig) -> Result<Self, ChatError> {
        let client = Self::new(
            provider.endpoint.clone(),
            provider.resolve_api_key(),
            Duration::from_secs(provider.timeout_secs),
        )?;
        if !client.has_credential() {
            warn!(
                "provider credential missing; model calls will fail until one is configured (endpoint={})",
                client.endpoint
            );
        }
        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_credential(&self) -> bool {
        self.usable_key().is_some()
    }

    fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| is_usable_credential(key))
    }

    /// Send one request and return the first choice's message content.
    ///
    /// Makes no network call when the credential is missing or a placeholder.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let api_key = self.usable_key().ok_or(ChatError::MissingCredential)?;
        debug!(
            "sending chat completion (endpoint={}, model={}, max_tokens={})",
            self.endpoint, request.model, request.max_tokens
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(
                "provider rejected chat completion (endpoint={}, status={})",
                self.endpoint,
                status.as_u16()
            );
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(source) => return Err(ChatError::Decode { body, source }),
        };
        let content = value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| ChatError::MissingContent { body })?;
        debug!("chat completion received (chars={})", content.len());
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn placeholders_and_blanks_are_unusable() {
        assert!(!is_usable_credential(""));
        assert!(!is_usable_credential("   "));
        assert!(!is_usable_credential("***"));
        assert!(!is_usable_credential("**"));
        assert!(!is_usable_credential("YOUR_OPENAI_API_KEY_HERE"));
        assert!(is_usable_credential("sk-test"));
    }

    #[test]
    fn request_serializes_in_provider_shape() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: 0.5,
            max_tokens: 200,
            response_format: Some(ResponseFormat::json_object()),
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "hi" }
                ],
                "temperature": 0.5,
                "max_tokens": 200,
                "response_format": { "type": "json_object" }
            })
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_before_sending() {
        let client = ChatClient::new(
            "http://127.0.0.1:9/unreachable",
            Some("***".to_string()),
            Duration::from_secs(1),
        )
        .expect("client");
        assert!(!client.has_credential());
        let request = ChatRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::user("x")],
            temperature: 0.7,
            max_tokens: 10,
            response_format: None,
        };
        let err = client.complete(&request).await.expect_err("no key");
        assert!(matches!(err, ChatError::MissingCredential));
    }
}
