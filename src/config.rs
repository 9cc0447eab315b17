use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Settings for the upstream chat-completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingApiKey(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Bearer token for the upstream provider. Debug output is redacted.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into() }
    }

    /// Read the key from the environment variable named in the config.
    pub fn from_env(llm_config: &LlmConfig) -> Result<Self, ConfigError> {
        match std::env::var(&llm_config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ConfigError::MissingApiKey(llm_config.api_key_env.clone())),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"***").finish()
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text, picking the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Load the first config file that exists, or fall back to the built-in defaults.
    pub fn discover() -> Result<(Self, Option<String>)> {
        let candidates: Vec<String> = vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        for path in candidates {
            if !Path::new(&path).exists() {
                tracing::debug!("No config at {}", path);
                continue;
            }
            let config = Self::load(&path)?;
            return Ok((config, Some(path)));
        }

        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let llm = &self.llm_config;
        if llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm_config.model is empty".to_string()));
        }
        if llm.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("llm_config.base_url is empty".to_string()));
        }
        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm_config.temperature must be within 0..=2, got {}",
                llm.temperature
            )));
        }
        if llm.timeout_secs == 0 {
            return Err(ConfigError::Invalid("llm_config.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables stay untouched.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(pattern) => pattern,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
