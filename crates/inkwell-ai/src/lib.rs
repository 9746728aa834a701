#![warn(missing_docs)]
//! Inkwell AI - text-generation backends for generative edits
//!
//! [`AiClient`] implements [`inkwell_core::TextGenerator`] over HTTP. The backend is
//! chosen by [`AiConfig::provider`]:
//!
//! | Provider     | Endpoint                    | Auth                          |
//! |--------------|-----------------------------|-------------------------------|
//! | `ollama`     | `POST /api/generate`        | none                          |
//! | `openai`     | `POST /v1/chat/completions` | bearer                        |
//! | `openrouter` | `POST /api/v1/chat/completions` | bearer, `HTTP-Referer`, `X-Title` |
//!
//! Requests are blocking; the editor waits for the answer before applying it.
//!
//! ```rust,no_run
//! use inkwell_ai::{AiClient, AiConfig};
//! use inkwell_core::{EditSession, GenerationMode, GenerationRequest};
//!
//! let client = AiClient::new(AiConfig { enabled: true, ..AiConfig::default() })?;
//! let mut session = EditSession::new();
//! session.generate(&client, GenerationRequest::new("write a haiku", GenerationMode::Insert))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use client::AiClient;
pub use config::{AiConfig, Provider};
pub use error::AiError;
pub use wire::{SYSTEM_PROMPT, frame_prompt};
