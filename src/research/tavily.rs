//! Tavily search API client

use crate::core::feedback::SearchSource;
use crate::research::{SearchError, SearchProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Clone)]
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: TAVILY_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    fn name(&self) -> &str {
        "Tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchSource>, SearchError> {
        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results,
            include_answer: true,
            search_depth: "advanced",
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url.trim_end_matches('/')))
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let mut sources = Vec::with_capacity(body.results.len() + 1);
        if let Some(answer) = body.answer.filter(|a| !a.trim().is_empty()) {
            sources.push(SearchSource {
                title: "Tavily AI Summary".to_string(),
                url: String::new(),
                content: answer,
            });
        }
        sources.extend(body.results.into_iter().map(|r| SearchSource {
            title: r.title.unwrap_or_else(|| "Unknown".to_string()),
            url: r.url.unwrap_or_default(),
            content: r.content.unwrap_or_default(),
        }));
        Ok(sources)
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    include_answer: bool,
    search_depth: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}
