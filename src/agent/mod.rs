//! Hosted model client for executing prompts

pub mod client;
pub mod http_client;
pub mod response;

use async_trait::async_trait;
pub use client::AgentClientConfig;
pub use http_client::ChatCompletionsClient;
pub use response::{AgentError, AgentResponse, TokenUsage};

/// A system + user prompt pair sent as one completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for agent execution - allows for different implementations
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Execute a prompt and return the full response
    async fn execute(&self, prompt: &Prompt) -> Result<AgentResponse, AgentError>;
}

#[async_trait]
impl AgentExecutor for ChatCompletionsClient {
    async fn execute(&self, prompt: &Prompt) -> Result<AgentResponse, AgentError> {
        self.complete(prompt).await
    }
}
