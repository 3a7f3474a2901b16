//! Chat model port
//!
//! Defines the interface for sending a conversation to a language model.

use async_trait::async_trait;
use dishmuse_domain::Message;
use thiserror::Error;

/// Errors that can occur while talking to a chat model
#[derive(Error, Debug)]
pub enum ChatModelError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Chat model not configured: {0}")]
    NotConfigured(String),
}

/// A single completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: Option<String>,
    /// Conversation so far, ending with the current user message.
    pub messages: Vec<Message>,
    /// Overrides the adapter's default model for this call.
    pub model: Option<String>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// A one-message request with no system instruction.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self::new(vec![Message::user(prompt)])
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Port for request/response chat completion.
///
/// One request per call, no retries. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Name of the model used when a request carries no override.
    fn model_name(&self) -> &str;

    /// Send the conversation and return the reply text.
    async fn complete(&self, request: ChatRequest) -> Result<String, ChatModelError>;
}
