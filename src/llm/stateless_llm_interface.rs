use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One chat message sent upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// A single-shot completion request. Model and temperature belong to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("completion contained no text")]
    EmptyCompletion,
}

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory between calls; every request carries
/// its full prompt.
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Run one completion and return the generated text
    async fn chat_completion(&self, request: ChatRequest) -> Result<String, LlmError>;
}
