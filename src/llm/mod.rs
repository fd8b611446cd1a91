//! Language model client
//!
//! The planner only needs single-shot chat completions: a system instruction,
//! optional earlier turns, one user message, and the text of the first choice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::ChatTurn;

mod openai;

pub use openai::OpenAiChatClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for ChatMessage {
    fn from(turn: &ChatTurn) -> Self {
        match turn.role.trim().to_lowercase().as_str() {
            "assistant" | "agent" => ChatMessage::assistant(turn.content.clone()),
            _ => ChatMessage::user(turn.content.clone()),
        }
    }
}

/// One completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: vec![ChatMessage::user(user_prompt)],
        }
    }

    /// Put earlier conversation turns ahead of the current user message
    #[must_use]
    pub fn with_history(mut self, history: &[ChatTurn]) -> Self {
        let mut messages: Vec<ChatMessage> = history.iter().map(ChatMessage::from).collect();
        messages.append(&mut self.messages);
        self.messages = messages;
        self
    }
}

/// A chat completion backend
///
/// Returns the raw text of the completion. Errors mean the model could not be
/// reached or answered with a non-success status; unparsable content is the
/// caller's concern.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}
