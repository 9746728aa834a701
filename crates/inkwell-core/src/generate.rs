//! Generative edits.
//!
//! An external [`TextGenerator`] produces text from a prompt and a context slice; the
//! session applies the result to the document in one of three [`GenerationMode`]s as a
//! single undoable step. See [`crate::EditSession::generate`] for the state machine.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::GenerateError;

/// Number of prompts remembered by [`PromptHistory`].
pub const PROMPT_HISTORY_LIMIT: usize = 20;

/// The text-generation capability.
///
/// Implementations own their transport; the call is synchronous and may block.
pub trait TextGenerator {
    /// Produce text for `prompt`, given `context` (selected text or the whole document).
    fn generate(&self, prompt: &str, context: &str) -> Result<String, GenerateError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str, &str) -> Result<String, GenerateError>,
{
    fn generate(&self, prompt: &str, context: &str) -> Result<String, GenerateError> {
        self(prompt, context)
    }
}

/// How a generated result is applied to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Insert a line feed and the result at the cursor.
    #[default]
    Insert,
    /// Replace the selection, or the whole document when nothing is selected.
    Replace,
    /// Replace the whole document regardless of selection.
    Overwrite,
}

impl GenerationMode {
    /// Lowercase name (`insert`, `replace`, `overwrite`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Replace => "replace",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Self::Insert),
            "replace" => Ok(Self::Replace),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!("unknown generation mode '{other}'")),
        }
    }
}

/// Which slice of the document is sent as context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextScope {
    /// The non-empty selection.
    Selection,
    /// The whole document.
    Document,
}

impl ContextScope {
    /// Lowercase name for prompts and status messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Document => "document",
        }
    }
}

/// A generative edit as requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// User prompt; empty means "reuse the last prompt".
    pub prompt: String,
    /// How to apply the result.
    pub mode: GenerationMode,
}

impl GenerationRequest {
    /// Build a request.
    pub fn new(prompt: impl Into<String>, mode: GenerationMode) -> Self {
        Self {
            prompt: prompt.into(),
            mode,
        }
    }
}

/// What happened to a generative edit that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The result was applied.
    Applied {
        /// Mode used.
        mode: GenerationMode,
        /// Context that was sent.
        scope: ContextScope,
        /// Prompt actually sent (after reusing the last one, if any).
        prompt: String,
    },
    /// Empty prompt with no previous prompt to reuse.
    Cancelled,
}

/// Last prompt plus a bounded history of accepted prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptHistory {
    entries: VecDeque<String>,
    last: Option<String>,
}

impl PromptHistory {
    /// Resolve the prompt to send: a non-empty prompt as given, otherwise the last one.
    pub fn resolve(&self, prompt: &str) -> Option<String> {
        if prompt.is_empty() {
            self.last.clone()
        } else {
            Some(prompt.to_string())
        }
    }

    /// Remember an accepted prompt.
    pub fn record(&mut self, prompt: &str) {
        self.entries.push_back(prompt.to_string());
        if self.entries.len() > PROMPT_HISTORY_LIMIT {
            self.entries.pop_front();
        }
        self.last = Some(prompt.to_string());
    }

    /// The most recent prompt.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Remembered prompts, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }

    /// Number of remembered prompts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no prompt was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `back`-th most recent prompt (0 = latest), for recall while editing a prompt.
    pub fn recall(&self, back: usize) -> Option<&str> {
        self.entries
            .len()
            .checked_sub(back + 1)
            .and_then(|idx| self.entries.get(idx))
            .map(String::as_str)
    }
}
