use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::time::timeout;

use crate::config::Config;

/// Which configured model a task runs on. Knowledge extraction favors the
/// cheap fast model, document and content writing the slow one, and site
/// generation the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Fast,
    Slow,
    Executor,
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelRole::Fast => "fast",
            ModelRole::Slow => "slow",
            ModelRole::Executor => "executor",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("model request timed out after {0}s")]
    Timeout(u64),
}

/// Seam between the pipeline and the remote chat-completion API. One call,
/// no retries; the pipeline owns every failure policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(
        &self,
        role: ModelRole,
        messages: Vec<ChatMessage>,
    ) -> Result<String, ModelError>;
}

pub struct OpenAiModelClient {
    client: Client<OpenAIConfig>,
    config: Arc<Config>,
}

impl OpenAiModelClient {
    pub fn new(config: Arc<Config>) -> Self {
        let mut api_config = OpenAIConfig::new().with_api_key(config.api_key.expose_secret());
        if let Some(base) = &config.api_base {
            api_config = api_config.with_api_base(base.as_str());
        }
        Self {
            client: Client::with_config(api_config),
            config,
        }
    }

    fn build_payload(
        messages: Vec<ChatMessage>,
    ) -> Result<Vec<ChatCompletionRequestMessage>, ModelError> {
        let mut payload = Vec::with_capacity(messages.len());
        for message in messages {
            let built = match message.role {
                ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content)
                    .build()
                    .map(ChatCompletionRequestMessage::from),
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content)
                    .build()
                    .map(ChatCompletionRequestMessage::from),
            };
            payload.push(built.map_err(|err| ModelError::Unavailable(err.to_string()))?);
        }
        Ok(payload)
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn complete(
        &self,
        role: ModelRole,
        messages: Vec<ChatMessage>,
    ) -> Result<String, ModelError> {
        let model = self.config.model_for(role).to_string();
        let payload = Self::build_payload(messages)?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(&model)
            .messages(payload)
            .build()
            .map_err(|err| ModelError::Unavailable(err.to_string()))?;

        log::debug!("dispatching chat completion to {} model {}", role, model);
        let deadline = Duration::from_secs(self.config.model_timeout_secs);
        let response = match timeout(deadline, self.client.chat().create(request)).await {
            Err(_) => return Err(ModelError::Timeout(self.config.model_timeout_secs)),
            Ok(Err(err)) => return Err(ModelError::Unavailable(err.to_string())),
            Ok(Ok(response)) => response,
        };

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}
