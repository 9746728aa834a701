//! Generation backend configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
/// Default model name.
pub const DEFAULT_MODEL: &str = "llama3.2";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which HTTP backend serves generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Local Ollama server (`/api/generate`).
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions (`/v1/chat/completions`).
    OpenAi,
    /// OpenRouter chat completions (`/api/v1/chat/completions`).
    OpenRouter,
}

impl Provider {
    /// Display name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAi => "OpenAI",
            Self::OpenRouter => "OpenRouter",
        }
    }

    /// Request path appended to the configured base URL.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Self::Ollama => "/api/generate",
            Self::OpenAi => "/v1/chat/completions",
            Self::OpenRouter => "/api/v1/chat/completions",
        }
    }

    /// Whether the backend speaks the chat-completions message format.
    pub fn is_chat(self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for the generation client, as stored in the `ai` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Generative edits are refused unless enabled.
    pub enabled: bool,
    /// Backend selection.
    pub provider: Provider,
    /// Bearer token for chat backends.
    pub api_key: String,
    /// Scheme, host and optional port of the backend.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Request timeout.
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: Provider::Ollama,
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    /// Full request URL for the configured provider.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.provider.endpoint_path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_local_ollama() {
        let config = AiConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.provider, Provider::Ollama);
        assert_eq!(config.endpoint_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = AiConfig {
            provider: Provider::OpenRouter,
            base_url: "https://openrouter.ai/".to_string(),
            ..AiConfig::default()
        };
        assert_eq!(
            config.endpoint_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AiConfig =
            serde_yaml::from_str("enabled: true\nprovider: openai\napi_key: sk-1\n")
                .expect("valid yaml");
        assert!(config.enabled);
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let parsed: Result<AiConfig, _> = serde_yaml::from_str("provider: gemini\n");
        assert!(parsed.is_err());
    }
}
