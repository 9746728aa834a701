//! Error types for storage, formatting and generation failures.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the persistence collaborator.
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    /// Reading the file failed for a reason other than "not found".
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    /// Writing the file failed.
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    /// The file content could not be decoded as text.
    InvalidUtf8 {
        /// File that was being read.
        path: PathBuf,
    },
}

#[derive(Debug, Error)]
/// Errors produced when reformatting a document.
pub enum FormatError {
    #[error("formatting is supported for JSON, YAML and HCL files, not '{0}'")]
    /// No formatter exists for this file extension.
    Unsupported(String),

    #[error("JSON format error: {0}")]
    /// The document is not valid JSON.
    Json(#[from] serde_json::Error),

    #[error("YAML format error: {0}")]
    /// The document is not valid YAML.
    Yaml(#[from] serde_yaml::Error),

    #[error("HCL format error: {0}")]
    /// The document is not valid HCL.
    Hcl(#[from] hcl::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
/// A failure reported by a [`crate::TextGenerator`].
///
/// The core never inspects the message; it is surfaced to the user as-is.
pub struct GenerateError {
    message: String,
}

impl GenerateError {
    /// Wrap a descriptive failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The descriptive message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
