//! Step executor - runs individual steps with the agent

use crate::{
    agent::{AgentExecutor, AgentResponse, Prompt},
    core::{
        config::ContentTargets,
        feedback::{ResearchContext, ReviewFeedback, SeoAnalysis},
        metrics::{extract_title, truncate_chars, ContentMetrics},
        BlogState, PipelineError, StateUpdate, StepDetail, StepKind, StepRecord,
    },
    execution::prompts,
    research::{gather_sources, SearchProvider},
};
use tracing::{debug, info};

/// Characters of the draft kept in the writer's log record
const PREVIEW_CHARS: usize = 200;

/// What a step hands back to the engine
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub update: StateUpdate,
    pub record: StepRecord,
}

/// Search backend plus result cap for the research step
pub struct ResearchSettings {
    pub provider: Box<dyn SearchProvider>,
    pub max_results: usize,
}

/// Executes single steps against the hosted model
pub struct StepExecutor<A> {
    agent: A,
    targets: ContentTargets,
    research: Option<ResearchSettings>,
}

impl<A: AgentExecutor> StepExecutor<A> {
    pub fn new(agent: A, targets: ContentTargets) -> Self {
        Self {
            agent,
            targets,
            research: None,
        }
    }

    pub fn with_research(mut self, settings: ResearchSettings) -> Self {
        self.research = Some(settings);
        self
    }

    pub fn research_enabled(&self) -> bool {
        self.research.is_some()
    }

    async fn call(&self, step: StepKind, prompt: &Prompt) -> Result<AgentResponse, PipelineError> {
        debug!("Prompt for step {}: {} chars", step, prompt.user.len());
        let response = self
            .agent
            .execute(prompt)
            .await
            .map_err(|source| PipelineError::Agent { step, source })?;
        if let Some(usage) = &response.usage {
            debug!(
                "Step {} used {} tokens ({} prompt, {} completion)",
                step, usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }
        Ok(response)
    }

    /// Gather and condense research; reuses the cached context after round 1
    ///
    /// Returns `None` when research is not configured.
    pub async fn research(&self, state: &BlogState) -> Result<Option<StepOutput>, PipelineError> {
        let Some(settings) = &self.research else {
            return Ok(None);
        };
        let iteration = state.current_iteration;

        if state.research_context.is_some() {
            debug!("Using cached research from iteration 1");
            return Ok(Some(StepOutput {
                update: StateUpdate::LogOnly,
                record: StepRecord::new(StepKind::Research, iteration, StepDetail::ResearchCached),
            }));
        }

        info!("Executing step: research ({})", settings.provider.name());
        let sources = gather_sources(settings.provider.as_ref(), &state.topic, settings.max_results).await;
        let prompt = prompts::research_prompt(&state.topic, &sources);
        let response = self.call(StepKind::Research, &prompt).await?;

        let context = ResearchContext::from_synthesis(&response.content, sources, settings.provider.name());
        info!(
            "Research found {} sources, {} key facts",
            context.sources.len(),
            context.key_facts.len()
        );

        let record = StepRecord::new(
            StepKind::Research,
            iteration,
            StepDetail::Research {
                sources_found: context.sources.len(),
                facts_extracted: context.key_facts.len(),
            },
        );
        Ok(Some(StepOutput {
            update: StateUpdate::Research(context),
            record,
        }))
    }

    /// Produce a new draft and its measurements
    pub async fn write(&self, state: &BlogState) -> Result<StepOutput, PipelineError> {
        info!(
            "Executing step: writer (iteration {}/{})",
            state.current_iteration, state.max_iterations
        );
        let prompt = prompts::writer_prompt(state, &self.targets);
        let content = self.call(StepKind::Writer, &prompt).await?.content;

        let metrics = ContentMetrics::measure(&content);
        let title = extract_title(&content, &state.topic);
        info!(
            "Generated {} words, {} code blocks, {} tables",
            metrics.word_count, metrics.code_block_count, metrics.table_count
        );

        let preview = if content.chars().count() > PREVIEW_CHARS {
            format!("{}...", truncate_chars(&content, PREVIEW_CHARS))
        } else {
            content.clone()
        };
        let record = StepRecord::new(
            StepKind::Writer,
            state.current_iteration,
            StepDetail::Draft {
                word_count: metrics.word_count,
                content_preview: preview,
            },
        );

        Ok(StepOutput {
            update: StateUpdate::Draft {
                content,
                title,
                metrics,
            },
            record,
        })
    }

    /// Review the current draft
    pub async fn review(&self, state: &BlogState) -> Result<StepOutput, PipelineError> {
        info!("Executing step: reviewer");
        let prompt = prompts::reviewer_prompt(state, &self.targets);
        let response = self.call(StepKind::Reviewer, &prompt).await?;

        let feedback = ReviewFeedback::from_response(&response.content);
        info!("Review score: {}/10", feedback.overall_score);

        let record = StepRecord::new(
            StepKind::Reviewer,
            state.current_iteration,
            StepDetail::Scored {
                score: feedback.overall_score,
            },
        );
        Ok(StepOutput {
            update: StateUpdate::Review(feedback),
            record,
        })
    }

    /// Analyse the current draft for search optimisation
    pub async fn optimize(&self, state: &BlogState) -> Result<StepOutput, PipelineError> {
        info!("Executing step: seo");
        let prompt = prompts::seo_prompt(state);
        let response = self.call(StepKind::Seo, &prompt).await?;

        let analysis = SeoAnalysis::from_response(&response.content, &state.topic, &state.title);
        info!("SEO score: {}/10", analysis.seo_score);

        let record = StepRecord::new(
            StepKind::Seo,
            state.current_iteration,
            StepDetail::Scored {
                score: analysis.seo_score,
            },
        );
        Ok(StepOutput {
            update: StateUpdate::Seo(analysis),
            record,
        })
    }
}
