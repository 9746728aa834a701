//! Blocking HTTP client for the configured backend.

use std::time::Duration;

use inkwell_core::{GenerateError, TextGenerator};
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::{AiConfig, Provider};
use crate::error::AiError;
use crate::wire::{ChatRequest, ChatResponse, OllamaRequest, OllamaResponse, frame_prompt};

/// Referer OpenRouter attributes requests to.
pub const OPENROUTER_REFERER: &str = "https://github.com/inkwell-editor/inkwell";
/// Application title OpenRouter shows for requests.
pub const OPENROUTER_TITLE: &str = "Inkwell Editor";

/// Generation client; one instance serves every request of an editor session.
#[derive(Debug, Clone)]
pub struct AiClient {
    config: AiConfig,
    http: Client,
}

impl AiClient {
    /// Build a client for `config`.
    ///
    /// Fails when the API key cannot be carried in a header or the HTTP client cannot be
    /// initialized. A disabled config still builds; requests are refused later.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(concat!("inkwell/", env!("CARGO_PKG_VERSION"))),
        );
        if config.provider.is_chat() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))?;
            auth.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, auth);
        }
        if config.provider == Provider::OpenRouter {
            headers.insert("http-referer", HeaderValue::from_static(OPENROUTER_REFERER));
            headers.insert("x-title", HeaderValue::from_static(OPENROUTER_TITLE));
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|source| AiError::Http {
                provider: config.provider,
                source,
            })?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Ask the backend for text. The answer is trimmed of surrounding whitespace.
    pub fn generate_text(&self, prompt: &str, context: &str) -> Result<String, AiError> {
        if !self.config.enabled {
            return Err(AiError::Disabled);
        }

        let provider = self.config.provider;
        let url = self.config.endpoint_url();
        tracing::info!(
            provider = provider.name(),
            model = %self.config.model,
            url = %url,
            "dispatching generation request"
        );

        let text = match provider {
            Provider::Ollama => {
                let body = OllamaRequest {
                    model: &self.config.model,
                    prompt: frame_prompt(prompt, context),
                    stream: false,
                };
                let response = self.http.post(&url).json(&body).send();
                self.decode::<OllamaResponse>(response)?.response
            }
            Provider::OpenAi | Provider::OpenRouter => {
                let body = ChatRequest::new(&self.config.model, prompt, context);
                let response = self.http.post(&url).json(&body).send();
                self.decode::<ChatResponse>(response)?
                    .first_content()
                    .ok_or(AiError::EmptyResponse)?
            }
        };

        tracing::debug!(
            provider = provider.name(),
            chars = text.len(),
            "generation finished"
        );
        Ok(text.trim().to_string())
    }

    fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Result<Response>,
    ) -> Result<T, AiError> {
        let provider = self.config.provider;
        let http_error = |source: reqwest::Error| AiError::Http { provider, source };

        let response = response.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(
                provider = provider.name(),
                status = status.as_u16(),
                "backend rejected request"
            );
            return Err(AiError::Status {
                provider,
                status: status.as_u16(),
                body,
            });
        }
        response.json::<T>().map_err(http_error)
    }
}

impl TextGenerator for AiClient {
    fn generate(&self, prompt: &str, context: &str) -> Result<String, GenerateError> {
        self.generate_text(prompt, context).map_err(GenerateError::from)
    }
}
