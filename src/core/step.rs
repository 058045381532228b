//! Step identities and the per-step log records kept in the state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The steps of one refinement round, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Research,
    Writer,
    Reviewer,
    Seo,
}

impl StepKind {
    /// Human-readable step name
    pub fn display_name(&self) -> &'static str {
        match self {
            StepKind::Research => "Research",
            StepKind::Writer => "Writer",
            StepKind::Reviewer => "Reviewer",
            StepKind::Seo => "SEO Optimizer",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            StepKind::Research => "research",
            StepKind::Writer => "writer",
            StepKind::Reviewer => "reviewer",
            StepKind::Seo => "seo",
        };
        f.write_str(id)
    }
}

/// What a step reported when it finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDetail {
    Research {
        sources_found: usize,
        facts_extracted: usize,
    },
    ResearchCached,
    Draft {
        word_count: usize,
        content_preview: String,
    },
    Scored {
        score: u8,
    },
}

/// One entry of the state's message log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: StepKind,
    pub iteration: u32,
    pub recorded_at: DateTime<Utc>,
    pub detail: StepDetail,
}

impl StepRecord {
    pub fn new(step: StepKind, iteration: u32, detail: StepDetail) -> Self {
        Self {
            step,
            iteration,
            recorded_at: Utc::now(),
            detail,
        }
    }
}
