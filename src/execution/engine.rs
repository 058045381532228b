//! Main execution engine - orchestrates the entire pipeline run

use crate::{
    agent::AgentExecutor,
    core::{config::ContentTargets, BlogState, PipelineError, StepDetail, StepKind},
    execution::{
        controller::{self, Transition},
        executor::{ResearchSettings, StepExecutor, StepOutput},
    },
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        topic: String,
        max_iterations: u32,
    },
    IterationStarted {
        iteration: u32,
        max_iterations: u32,
    },
    StepStarted {
        step: StepKind,
        iteration: u32,
    },
    StepCompleted {
        step: StepKind,
        iteration: u32,
        summary: String,
    },
    StepFailed {
        step: StepKind,
        error: String,
    },
    PipelineCompleted {
        iterations: u32,
        review_score: u8,
        seo_score: u8,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Runs writer, reviewer and SEO rounds until the controller says stop
pub struct ExecutionEngine<A> {
    executor: StepExecutor<A>,
    event_handlers: Vec<EventHandler>,
}

impl<A: AgentExecutor> ExecutionEngine<A> {
    pub fn new(agent: A, targets: ContentTargets) -> Self {
        Self {
            executor: StepExecutor::new(agent, targets),
            event_handlers: Vec::new(),
        }
    }

    /// Run a research step ahead of the first draft
    pub fn with_research(mut self, settings: ResearchSettings) -> Self {
        self.executor = self.executor.with_research(settings);
        self
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the pipeline to completion
    ///
    /// Any step failure aborts the run; nothing partial is returned.
    pub async fn run(&self, mut state: BlogState) -> Result<BlogState, PipelineError> {
        if state.is_complete {
            return Err(PipelineError::InvalidState(
                "pipeline already completed".to_string(),
            ));
        }

        let started = Instant::now();
        info!(
            "Starting blog generation: '{}' ({} iterations)",
            state.topic, state.max_iterations
        );
        self.emit_event(ExecutionEvent::PipelineStarted {
            topic: state.topic.clone(),
            max_iterations: state.max_iterations,
        });

        loop {
            self.emit_event(ExecutionEvent::IterationStarted {
                iteration: state.current_iteration,
                max_iterations: state.max_iterations,
            });

            if self.executor.research_enabled() {
                self.execute_step(&mut state, StepKind::Research).await?;
            }
            for step in [StepKind::Writer, StepKind::Reviewer, StepKind::Seo] {
                self.execute_step(&mut state, step).await?;
            }

            // Timed before advance, which seals the state on the last round
            state.generation_time_secs = started.elapsed().as_secs_f64();
            match controller::advance(&mut state) {
                Transition::Continue { .. } => continue,
                Transition::Done => break,
            }
        }

        info!(
            "Pipeline finished in {:.1}s",
            state.generation_time_secs
        );
        self.emit_event(ExecutionEvent::PipelineCompleted {
            iterations: state.current_iteration,
            review_score: state.final_review_score,
            seo_score: state.final_seo_score,
        });

        Ok(state)
    }

    /// Execute a single step and merge its output
    async fn execute_step(&self, state: &mut BlogState, step: StepKind) -> Result<(), PipelineError> {
        let iteration = state.current_iteration;
        self.emit_event(ExecutionEvent::StepStarted { step, iteration });

        let result = match step {
            StepKind::Research => self.executor.research(state).await,
            StepKind::Writer => self.executor.write(state).await.map(Some),
            StepKind::Reviewer => self.executor.review(state).await.map(Some),
            StepKind::Seo => self.executor.optimize(state).await.map(Some),
        };

        let StepOutput { update, record } = match result {
            Ok(Some(output)) => output,
            Ok(None) => return Ok(()),
            Err(e) => {
                error!("Step {} failed: {}", step, e);
                self.emit_event(ExecutionEvent::StepFailed {
                    step,
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        let summary = summarize(&record.detail);
        state.apply(update, record)?;
        self.emit_event(ExecutionEvent::StepCompleted {
            step,
            iteration,
            summary,
        });
        Ok(())
    }
}

/// One-line description of a step's outcome
fn summarize(detail: &StepDetail) -> String {
    match detail {
        StepDetail::Research {
            sources_found,
            facts_extracted,
        } => format!("{} sources, {} key facts", sources_found, facts_extracted),
        StepDetail::ResearchCached => "using research from iteration 1".to_string(),
        StepDetail::Draft { word_count, .. } => format!("{} words", word_count),
        StepDetail::Scored { score } => format!("score {}/10", score),
    }
}
