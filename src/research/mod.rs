//! Web research that feeds the first writer pass

pub mod tavily;

use crate::core::feedback::SearchSource;
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

pub use tavily::TavilyClient;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Search request failed: {0}")]
    Transport(String),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// A web search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Name shown in logs and stored in the research context
    fn name(&self) -> &str;

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchSource>, SearchError>;
}

/// Queries run for a topic, one per research angle
pub fn research_queries(topic: &str) -> Vec<String> {
    vec![
        format!("{} comprehensive guide", topic),
        format!("{} best practices", topic),
        format!("{} research paper", topic),
        format!("{} Python implementation example", topic),
        format!("{} industry statistics data", topic),
    ]
}

/// Run every research query and merge the hits
///
/// Results are de-duplicated by URL and capped at `max_results`. A failing
/// query is logged and contributes nothing.
pub async fn gather_sources(
    provider: &dyn SearchProvider,
    topic: &str,
    max_results: usize,
) -> Vec<SearchSource> {
    let queries = research_queries(topic);
    let per_query = (max_results / queries.len()).max(1);

    let mut seen_urls = HashSet::new();
    let mut sources = Vec::new();

    for query in &queries {
        match provider.search(query, per_query).await {
            Ok(results) => {
                debug!("{} returned {} results for '{}'", provider.name(), results.len(), query);
                for result in results {
                    if seen_urls.insert(result.url.clone()) {
                        sources.push(result);
                    }
                }
            }
            Err(e) => warn!("{} search failed for '{}': {}", provider.name(), query, e),
        }
    }

    sources.truncate(max_results);
    sources
}
