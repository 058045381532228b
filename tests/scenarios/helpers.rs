//! Test utility functions for blog-pipeline scenarios

use async_trait::async_trait;
use blog_pipeline::agent::{AgentError, AgentExecutor, AgentResponse, Prompt};
use blog_pipeline::core::{config::ContentTargets, feedback::SearchSource, BlogState, PipelineError};
use blog_pipeline::execution::{prompts, ExecutionEngine, ResearchSettings};
use blog_pipeline::research::{SearchError, SearchProvider};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TOPIC: &str = "Async Rust";

pub const REVIEW_REPLY: &str = "OVERALL_SCORE: 7\n\nSTRENGTHS:\n- Clear examples\n\nIMPROVEMENTS:\n- Add benchmarks\n\nPRIORITY_FIXES:\n- Expand the executor section\n\nDETAILED_FEEDBACK:\nSolid draft.\n";

pub const SEO_REPLY: &str = "SEO_SCORE: 8\n\nPRIMARY_KEYWORDS:\n- async rust\n- tokio\n\nOPTIMIZED_TITLE: Async Rust in Practice\n\nMETA_DESCRIPTION: A practical guide to async Rust.\n";

pub const RESEARCH_REPLY: &str = "KEY_FACTS:\n- Tokio is the most used runtime\n\nSTATISTICS:\n- Most async crates depend on Tokio (2024)\n\nBEST_PRACTICES:\n- Avoid blocking in async code\n\nRECOMMENDED_TOPICS:\n- Cancellation\n\nKEY_SOURCES:\n- Tokio docs: https://tokio.rs\n";

/// Draft returned by the n-th writer call, counting from 1
pub fn writer_reply(n: usize) -> String {
    format!(
        "# Mastering Async Rust\n\nRevision {} of the draft.\n\n## Basics\n\n```rust\nfn main() {{}}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
        n
    )
}

/// Mock agent that answers according to the step's system prompt
///
/// Clones share their call log, so a test can keep one handle while the
/// engine owns another.
#[derive(Clone, Default)]
pub struct MockAgent {
    prompts: Arc<Mutex<Vec<Prompt>>>,
    index: Arc<AtomicUsize>,
    fail_at: Option<usize>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call with this zero-based index
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    /// Every prompt received so far, in order
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls made with the given system prompt
    pub fn calls_to(&self, system: &str) -> usize {
        self.prompts().iter().filter(|p| p.system == system).count()
    }

    /// User prompts sent to the writer, in order
    pub fn writer_prompts(&self) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| p.system == prompts::WRITER_SYSTEM)
            .map(|p| p.user)
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentExecutor for MockAgent {
    async fn execute(&self, prompt: &Prompt) -> Result<AgentResponse, AgentError> {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());

        if self.fail_at == Some(idx) {
            return Err(AgentError::Api {
                status: 500,
                body: format!("MockAgent: scripted failure on request {}", idx + 1),
            });
        }

        let reply = if prompt.system == prompts::WRITER_SYSTEM {
            writer_reply(self.calls_to(prompts::WRITER_SYSTEM))
        } else if prompt.system == prompts::REVIEWER_SYSTEM {
            REVIEW_REPLY.to_string()
        } else if prompt.system == prompts::SEO_SYSTEM {
            SEO_REPLY.to_string()
        } else if prompt.system == prompts::RESEARCHER_SYSTEM {
            RESEARCH_REPLY.to_string()
        } else {
            return Err(AgentError::Internal("MockAgent: unknown system prompt".to_string()));
        };
        Ok(AgentResponse::new(reply))
    }
}

/// Search provider returning one distinct hit per query
#[derive(Clone, Default)]
pub struct StubSearch {
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubSearch {
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<SearchSource>, SearchError> {
        let mut queries = self.queries.lock().unwrap();
        queries.push(query.to_string());
        Ok(vec![SearchSource {
            title: query.to_string(),
            url: format!("https://example.com/{}", queries.len()),
            content: format!("Findings for {}", query),
        }])
    }
}

/// Run a full pipeline with the given agent
pub async fn run_with(agent: MockAgent, iterations: u32) -> Result<BlogState, PipelineError> {
    let engine = ExecutionEngine::new(agent, ContentTargets::default());
    engine.run(BlogState::new(TOPIC, iterations)?).await
}

/// Run a full pipeline with research enabled
pub async fn run_with_research(
    agent: MockAgent,
    search: StubSearch,
    iterations: u32,
) -> Result<BlogState, PipelineError> {
    let engine = ExecutionEngine::new(agent, ContentTargets::default()).with_research(ResearchSettings {
        provider: Box::new(search),
        max_results: 10,
    });
    engine.run(BlogState::new(TOPIC, iterations)?).await
}
