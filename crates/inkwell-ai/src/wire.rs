//! Request and response bodies of the supported backends.

use serde::{Deserialize, Serialize};

/// System message sent by chat backends when context accompanies the prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful code assistant. Provide concise responses.";

/// Combine the task with its context; an empty context leaves the prompt untouched.
pub fn frame_prompt(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        prompt.to_string()
    } else {
        format!("Context:\n{context}\n\nTask: {prompt}")
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OllamaRequest<'a> {
    pub model: &'a str,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OllamaResponse {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, prompt: &str, context: &str) -> Self {
        let messages = if context.is_empty() {
            vec![ChatMessage::user(prompt.to_string())]
        } else {
            vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage::user(frame_prompt(prompt, context)),
            ]
        };
        Self { model, messages }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatResponse {
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
    }
}
