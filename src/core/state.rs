//! Pipeline state threaded through every step

use crate::agent::AgentError;
use crate::core::{
    feedback::{ResearchContext, ReviewFeedback, SeoAnalysis},
    metrics::ContentMetrics,
    step::{StepKind, StepRecord},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{step} step failed: {source}")]
    Agent {
        step: StepKind,
        #[source]
        source: AgentError,
    },

    #[error("State is complete; refusing to apply {0} update")]
    StateSealed(StepKind),

    #[error("Invalid pipeline state: {0}")]
    InvalidState(String),
}

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Steps are still being run
    Running,
    /// Controller reached the iteration limit; terminal
    Done,
}

/// A step's contribution, merged into the state by [`BlogState::apply`]
#[derive(Debug, Clone)]
pub enum StateUpdate {
    Research(ResearchContext),
    Draft {
        content: String,
        title: String,
        metrics: ContentMetrics,
    },
    Review(ReviewFeedback),
    Seo(SeoAnalysis),
    /// Nothing changes beyond the log entry
    LogOnly,
}

impl StateUpdate {
    fn step(&self, fallback: StepKind) -> StepKind {
        match self {
            StateUpdate::Research(_) => StepKind::Research,
            StateUpdate::Draft { .. } => StepKind::Writer,
            StateUpdate::Review(_) => StepKind::Reviewer,
            StateUpdate::Seo(_) => StepKind::Seo,
            StateUpdate::LogOnly => fallback,
        }
    }
}

/// The single record threaded through the writer, reviewer and SEO steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogState {
    pub topic: String,

    /// Number of the round in progress, starting at 1
    pub current_iteration: u32,

    pub max_iterations: u32,

    pub draft_content: String,

    pub title: String,

    pub research_context: Option<ResearchContext>,

    pub review_feedback: Option<ReviewFeedback>,

    pub seo_analysis: Option<SeoAnalysis>,

    pub word_count: usize,

    pub code_block_count: usize,

    pub table_count: usize,

    /// Ordered log of step runs
    pub messages: Vec<StepRecord>,

    pub is_complete: bool,

    pub final_review_score: u8,

    pub final_seo_score: u8,

    /// Wall time of the whole run, set by the engine
    pub generation_time_secs: f64,
}

impl BlogState {
    /// Create the initial state for a run
    pub fn new(topic: impl Into<String>, max_iterations: u32) -> Result<Self, PipelineError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(PipelineError::InvalidState("topic must not be empty".to_string()));
        }
        if max_iterations == 0 {
            return Err(PipelineError::InvalidState(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            topic,
            current_iteration: 1,
            max_iterations,
            draft_content: String::new(),
            title: String::new(),
            research_context: None,
            review_feedback: None,
            seo_analysis: None,
            word_count: 0,
            code_block_count: 0,
            table_count: 0,
            messages: Vec::new(),
            is_complete: false,
            final_review_score: 0,
            final_seo_score: 0,
            generation_time_secs: 0.0,
        })
    }

    pub fn status(&self) -> ExecutionStatus {
        if self.is_complete {
            ExecutionStatus::Done
        } else {
            ExecutionStatus::Running
        }
    }

    /// Merge a step's update and append its log record
    ///
    /// Fails without touching any field once the state is complete.
    pub fn apply(&mut self, update: StateUpdate, record: StepRecord) -> Result<(), PipelineError> {
        if self.is_complete {
            return Err(PipelineError::StateSealed(update.step(record.step)));
        }

        match update {
            StateUpdate::Research(context) => self.research_context = Some(context),
            StateUpdate::Draft {
                content,
                title,
                metrics,
            } => {
                self.draft_content = content;
                self.title = title;
                self.word_count = metrics.word_count;
                self.code_block_count = metrics.code_block_count;
                self.table_count = metrics.table_count;
            }
            StateUpdate::Review(feedback) => self.review_feedback = Some(feedback),
            StateUpdate::Seo(analysis) => self.seo_analysis = Some(analysis),
            StateUpdate::LogOnly => {}
        }
        self.messages.push(record);
        Ok(())
    }

    /// Count of log records for a step
    pub fn runs_of(&self, step: StepKind) -> usize {
        self.messages.iter().filter(|m| m.step == step).count()
    }

    /// Approximate reading time at 200 words per minute
    pub fn reading_time_minutes(&self) -> usize {
        self.word_count / 200
    }
}
