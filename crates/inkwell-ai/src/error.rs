//! Error type for generation requests.

use inkwell_core::GenerateError;
use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

use crate::config::Provider;

#[derive(Debug, Error)]
/// Failures of a generation request.
pub enum AiError {
    #[error("AI is not enabled in config (set ai.enabled: true)")]
    /// Generation was requested while `ai.enabled` is false.
    Disabled,

    #[error("failed to call {provider} API: {source}")]
    /// Transport failure, timeout, or an undecodable response body.
    Http {
        /// Backend that was called.
        provider: Provider,
        /// Underlying client error.
        source: reqwest::Error,
    },

    #[error("{provider} API error ({status}): {body}")]
    /// The backend answered with a non-success status.
    Status {
        /// Backend that was called.
        provider: Provider,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    #[error("no response from API")]
    /// A chat backend returned zero choices.
    EmptyResponse,

    #[error("invalid API key: {0}")]
    /// The API key cannot be sent as an HTTP header.
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl From<AiError> for GenerateError {
    fn from(err: AiError) -> Self {
        GenerateError::new(err.to_string())
    }
}
