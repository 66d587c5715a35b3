//! Chat completion abstraction for answer generation.

mod openai;

pub use openai::OpenAIChatModel;

use crate::error::Result;
use async_trait::async_trait;

/// Role of a message in an assembled prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One message of an assembled prompt.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

/// Trait for language model completion.
///
/// Implementations are external services. A failed call fails the turn;
/// the engine does not retry.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generate a completion for the given prompt messages.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
