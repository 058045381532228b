//! OpenAI-compatible chat completions client

use crate::agent::{AgentClientConfig, AgentError, AgentResponse, Prompt, TokenUsage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for a hosted chat completions endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    config: AgentClientConfig,
    http: Client,
}

impl ChatCompletionsClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `AgentError::Internal` if the underlying HTTP client cannot be built
    /// (e.g. TLS backend initialisation failed).
    pub fn new(config: AgentClientConfig) -> Result<Self, AgentError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AgentClientConfig {
        &self.config
    }

    /// Send one system + user exchange and return the first choice
    ///
    /// # Errors
    /// Returns `AgentError` if:
    /// - the request cannot be sent or times out
    /// - the API answers with a non-success status
    /// - the body is not a chat completion, or carries no choices
    /// - the first choice has no content (e.g. a content filter refusal)
    pub async fn complete(&self, prompt: &Prompt) -> Result<AgentResponse, AgentError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: &prompt.system,
                },
                WireMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            "POST {} (model {}, prompt length {})",
            self.config.completions_url(),
            self.config.model,
            prompt.user.len()
        );

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Hosted model returned {}: {}", status, body.trim());
            return Err(AgentError::Api {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::MalformedResponse("no choices in response".to_string()))?;

        let content = choice.message.content.ok_or_else(|| {
            AgentError::MalformedResponse(format!(
                "choice has no content (finish reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;
        debug!("Hosted model returned {} bytes of output", content.len());

        Ok(AgentResponse {
            content,
            model: body.model,
            usage: body.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::Timeout(self.config.timeout_secs)
        } else {
            AgentError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
