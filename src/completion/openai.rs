//! OpenAI chat completion implementation.

use super::{ChatMessage, CompletionModel, MessageRole};
use crate::config::RagSettings;
use crate::error::{LeseError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-based chat completion model.
pub struct OpenAIChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    /// Create a new chat model.
    pub fn new(model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
        }
    }

    /// Create a chat model from configuration settings.
    pub fn from_settings(settings: &RagSettings) -> Self {
        Self::new(&settings.model, settings.temperature)
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let msg = match message.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(|e| LeseError::Completion(e.to_string()))?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(|e| LeseError::Completion(e.to_string()))?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(|e| LeseError::Completion(e.to_string()))?
            .into(),
    };
    Ok(msg)
}

#[async_trait]
impl CompletionModel for OpenAIChatModel {
    #[instrument(skip(self, messages), fields(messages = messages.len()))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<_>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| LeseError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LeseError::OpenAI(format!("Chat API error: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LeseError::Completion("No choices in response".to_string()))?;

        // An empty answer is passed through as-is; only a malformed
        // response (no choices) is an error.
        let answer = choice.message.content.clone().unwrap_or_default();
        debug!("Completion produced {} chars", answer.len());

        Ok(answer)
    }
}
