use std::sync::Arc;

use crate::config::{Config, Credentials};
use crate::llm::{OpenAICompatibleLLM, StatelessLLMInterface};

/// Shared, read-only handler state. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<dyn StatelessLLMInterface>,
}

impl AppState {
    pub fn new(config: Config, credentials: Credentials) -> anyhow::Result<Self> {
        let llm = OpenAICompatibleLLM::new(&config.llm_config, credentials)?;
        Ok(Self::with_llm(config, Arc::new(llm)))
    }

    pub fn with_llm(config: Config, llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }

    /// Identifier reported back to callers as `model_used`
    pub fn model(&self) -> &str {
        &self.config.llm_config.model
    }
}
