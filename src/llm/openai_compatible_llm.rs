use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::stateless_llm_interface::{ChatRequest, LlmError, Message, StatelessLLMInterface};
use crate::config::{Credentials, LlmConfig};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// OpenAI compatible LLM implementation
/// Talks to any `/chat/completions` endpoint that accepts a bearer token
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    credentials: Credentials,
    temperature: f32,
}

impl OpenAICompatibleLLM {
    pub fn new(llm_config: &LlmConfig, credentials: Credentials) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(llm_config.timeout_secs))
            .build()?;

        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            llm_config.model, llm_config.base_url
        );
        Ok(Self {
            client,
            model: llm_config.model.clone(),
            base_url: llm_config.base_url.trim_end_matches('/').to_string(),
            credentials,
            temperature: llm_config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Pull the first choice's text out of a completion body.
pub fn extract_content(response: ChatCompletionResponse) -> Result<String, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("no choices in response".to_string()))?;

    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(LlmError::EmptyCompletion),
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(&self, request: ChatRequest) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "POST {} (max_tokens={}, messages={})",
            self.endpoint(),
            request.max_tokens,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.credentials.api_key())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        extract_content(parsed)
    }
}
