//! Hosted model response types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for hosted model calls
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Response from the hosted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The response content
    pub content: String,

    /// Model that actually served the request, when reported
    pub model: Option<String>,

    /// Token usage information (if available)
    pub usage: Option<TokenUsage>,
}

impl AgentResponse {
    /// Create a response carrying only text
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            usage: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
