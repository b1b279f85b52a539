//! Configuration schema for Exam Whisperer.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root config for the Exam Whisperer server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WhispererConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl WhispererConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> WhispererConfigBuilder {
        WhispererConfigBuilder::new()
    }
}

/// Builder for assembling a `WhispererConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct WhispererConfigBuilder {
    config: WhispererConfig,
}

impl WhispererConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: WhispererConfig::default(),
        }
    }

    /// Replace the HTTP server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the chat-completion provider configuration.
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.provider = provider;
        self
    }

    /// Replace the history persistence configuration.
    pub fn history(mut self, history: HistoryConfig) -> Self {
        self.config.history = history;
        self
    }

    /// Finalize and return the built `WhispererConfig`.
    pub fn build(self) -> WhispererConfig {
        self.config
    }
}

/// Listen address for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Chat-completion provider settings shared by the answer and quiz clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_answer_max_tokens")]
    pub answer_max_tokens: u32,
    #[serde(default = "default_quiz_max_tokens")]
    pub quiz_max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Inline credential; takes precedence over the environment.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variables consulted in order for the credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            answer_max_tokens: default_answer_max_tokens(),
            quiz_max_tokens: default_quiz_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the provider credential from config, then the process environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the credential using a custom variable lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.api_key.as_ref().filter(|key| !key.trim().is_empty()) {
            debug!("provider credential resolved from config");
            return Some(key.clone());
        }
        for name in &self.api_key_env {
            if let Some(value) = lookup(name).filter(|value| !value.trim().is_empty()) {
                debug!("provider credential resolved from environment (var={name})");
                return Some(value);
            }
        }
        debug!(
            "provider credential not found (vars={})",
            self.api_key_env.join(",")
        );
        None
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_answer_max_tokens() -> u32 {
    500
}

fn default_quiz_max_tokens() -> u32 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

/// Both variable names the two original clients read, plus the unified one.
fn default_api_key_env() -> Vec<String> {
    vec![
        "OPENAI_API_KEY".to_string(),
        "OPENAI_API_KEY_QUIZ".to_string(),
        "API_KEY".to_string(),
    ]
}

/// Session history persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("data").join("history.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn inline_key_wins_over_environment() {
        let provider = ProviderConfig {
            api_key: Some("inline".to_string()),
            ..ProviderConfig::default()
        };
        let key = provider.resolve_api_key_with(|_| Some("from-env".to_string()));
        assert_eq!(key, Some("inline".to_string()));
    }

    #[test]
    fn environment_lookup_follows_declared_order() {
        let env: HashMap<&str, &str> =
            HashMap::from([("OPENAI_API_KEY_QUIZ", "quiz-key"), ("API_KEY", "plain-key")]);
        let provider = ProviderConfig::default();
        let key = provider.resolve_api_key_with(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(key, Some("quiz-key".to_string()));
    }

    #[test]
    fn blank_values_are_skipped() {
        let provider = ProviderConfig {
            api_key: Some("  ".to_string()),
            api_key_env: vec!["EMPTY".to_string()],
            ..ProviderConfig::default()
        };
        let key = provider.resolve_api_key_with(|_| Some(String::new()));
        assert_eq!(key, None);
    }

    #[test]
    fn builder_replaces_sections() {
        let config = WhispererConfig::builder()
            .server(ServerConfig {
                bind: "0.0.0.0".to_string(),
                port: 8080,
            })
            .build();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.provider.answer_max_tokens, 500);
        assert_eq!(config.history.path, PathBuf::from("data/history.json"));
    }
}
