//! blog-pipeline - iterative writer/reviewer/SEO blog generation on a hosted LLM

pub mod agent;
pub mod cli;
pub mod core;
pub mod execution;
pub mod format;
pub mod research;

// Re-export commonly used types
pub use agent::{AgentClientConfig, AgentError, AgentExecutor, AgentResponse, ChatCompletionsClient, Prompt};
pub use crate::core::{BlogConfig, BlogState, ExecutionStatus, PipelineError, StepKind};
pub use execution::{ExecutionEngine, ExecutionEvent, ResearchSettings};
pub use format::{export, ExportOptions, MarkdownFormatter};
pub use research::{SearchProvider, TavilyClient};
