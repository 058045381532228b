//! Hosted model client configuration

use crate::core::config::ModelConfig;

/// Default OpenAI-compatible API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the hosted model client
#[derive(Debug, Clone)]
pub struct AgentClientConfig {
    /// API root, e.g. `https://api.openai.com/v1`
    pub endpoint: String,

    /// Bearer token sent with every request
    pub api_key: String,

    /// Model name
    pub model: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Timeout for requests in seconds
    pub timeout_secs: u64,
}

impl Default for AgentClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 16000,
            timeout_secs: 600,
        }
    }
}

impl AgentClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a client config from the model section of the blog config
    pub fn from_model_config(model: &ModelConfig, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: model.base_url.clone(),
            api_key: api_key.into(),
            model: model.name.clone(),
            temperature: model.temperature,
            max_tokens: model.max_tokens,
            timeout_secs: model.timeout_secs,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}
