//! Structured reports produced by the advisory steps

use crate::core::sections::SectionedResponse;
use serde::{Deserialize, Serialize};

/// Score used when the model omits one
pub const DEFAULT_SCORE: u8 = 5;

/// Feedback from the reviewer step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFeedback {
    /// Overall quality score, 1-10
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub priority_fixes: Vec<String>,
    /// The full review text as returned by the model
    pub detailed_feedback: String,
}

impl ReviewFeedback {
    /// Parse a reviewer response, filling defaults for missing sections
    pub fn from_response(text: &str) -> Self {
        let parsed = SectionedResponse::new(text);
        Self {
            overall_score: parsed.score("OVERALL_SCORE").unwrap_or(DEFAULT_SCORE),
            strengths: non_empty_or(parsed.list("STRENGTHS"), "Content is well-structured"),
            improvements: non_empty_or(parsed.list("IMPROVEMENTS"), "Consider adding more depth"),
            priority_fixes: non_empty_or(parsed.list("PRIORITY_FIXES"), "Expand key sections"),
            detailed_feedback: text.to_string(),
        }
    }
}

/// SEO analysis from the SEO step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoAnalysis {
    /// SEO optimisation score, 1-10
    pub seo_score: u8,
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    pub optimized_title: String,
    pub meta_description: String,
    pub heading_suggestions: Vec<String>,
    pub content_suggestions: Vec<String>,
    /// The full analysis text as returned by the model
    pub detailed_analysis: String,
}

impl SeoAnalysis {
    /// Parse an SEO response; `topic` and `title` supply the fallbacks
    pub fn from_response(text: &str, topic: &str, title: &str) -> Self {
        let parsed = SectionedResponse::new(text);
        Self {
            seo_score: parsed.score("SEO_SCORE").unwrap_or(DEFAULT_SCORE),
            primary_keywords: non_empty_or(parsed.list("PRIMARY_KEYWORDS"), &topic.to_lowercase()),
            secondary_keywords: parsed.list("SECONDARY_KEYWORDS"),
            optimized_title: parsed
                .value("OPTIMIZED_TITLE")
                .unwrap_or_else(|| title.to_string()),
            meta_description: parsed.value("META_DESCRIPTION").unwrap_or_else(|| {
                format!("Learn about {} in this comprehensive guide.", topic)
            }),
            heading_suggestions: parsed.list("HEADING_SUGGESTIONS"),
            content_suggestions: parsed.list("CONTENT_SUGGESTIONS"),
            detailed_analysis: text.to_string(),
        }
    }
}

/// One web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSource {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Condensed research gathered before the first draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchContext {
    pub sources: Vec<SearchSource>,
    pub search_engine: String,
    pub key_facts: Vec<String>,
    pub statistics: Vec<String>,
    pub best_practices: Vec<String>,
    pub recommended_topics: Vec<String>,
    pub key_sources: Vec<String>,
    /// The full synthesis text as returned by the model
    pub synthesis: String,
}

impl ResearchContext {
    /// Parse a synthesis response over the given sources
    pub fn from_synthesis(text: &str, sources: Vec<SearchSource>, search_engine: &str) -> Self {
        let parsed = SectionedResponse::new(text);
        Self {
            sources,
            search_engine: search_engine.to_string(),
            key_facts: parsed.list("KEY_FACTS"),
            statistics: parsed.list("STATISTICS"),
            best_practices: parsed.list("BEST_PRACTICES"),
            recommended_topics: parsed.list("RECOMMENDED_TOPICS"),
            key_sources: parsed.list("KEY_SOURCES"),
            synthesis: text.to_string(),
        }
    }
}

fn non_empty_or(items: Vec<String>, fallback: &str) -> Vec<String> {
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items
    }
}
