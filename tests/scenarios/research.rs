//! Test: Research - one search round feeds the first draft

use crate::helpers::*;
use blog_pipeline::core::{StepDetail, StepKind};
use blog_pipeline::execution::prompts;

/// Research runs once no matter how many iterations follow
#[tokio::test]
async fn test_research_runs_once() {
    for n in [1u32, 3] {
        let agent = MockAgent::new();
        let search = StubSearch::default();
        let state = run_with_research(agent.clone(), search.clone(), n).await.unwrap();

        assert_eq!(search.queries().len(), 5);
        assert_eq!(agent.calls_to(prompts::RESEARCHER_SYSTEM), 1);
        assert_eq!(agent.calls_to(prompts::WRITER_SYSTEM), n as usize);
        assert_eq!(state.runs_of(StepKind::Research), n as usize);
    }
}

/// The first call is the synthesis, and later rounds log a cached record
#[tokio::test]
async fn test_research_records() {
    let agent = MockAgent::new();
    let state = run_with_research(agent.clone(), StubSearch::default(), 2).await.unwrap();

    assert_eq!(agent.prompts()[0].system, prompts::RESEARCHER_SYSTEM);

    let research: Vec<&StepDetail> = state
        .messages
        .iter()
        .filter(|m| m.step == StepKind::Research)
        .map(|m| &m.detail)
        .collect();
    assert_eq!(
        research,
        vec![
            &StepDetail::Research {
                sources_found: 5,
                facts_extracted: 1
            },
            &StepDetail::ResearchCached,
        ]
    );

    let context = state.research_context.unwrap();
    assert_eq!(context.search_engine, "stub");
    assert_eq!(context.best_practices, vec!["Avoid blocking in async code"]);
}

/// The first writer prompt quotes the research; refinements do not repeat it
#[tokio::test]
async fn test_research_reaches_first_draft() {
    let agent = MockAgent::new();
    run_with_research(agent.clone(), StubSearch::default(), 2).await.unwrap();

    let writer = agent.writer_prompts();
    assert!(writer[0].contains("Research Context"));
    assert!(writer[0].contains("- Tokio is the most used runtime"));
    assert!(!writer[1].contains("Research Context"));

    let synthesis = &agent.prompts()[0].user;
    assert!(synthesis.contains("Findings for Async Rust best practices"));
}

/// Without research configured no synthesis call is made
#[tokio::test]
async fn test_research_disabled_by_default() {
    let agent = MockAgent::new();
    let state = run_with(agent.clone(), 2).await.unwrap();

    assert_eq!(agent.calls_to(prompts::RESEARCHER_SYSTEM), 0);
    assert_eq!(state.runs_of(StepKind::Research), 0);
    assert!(state.research_context.is_none());
}

/// A synthesis failure is fatal
#[tokio::test]
async fn test_synthesis_failure_aborts() {
    let agent = MockAgent::failing_at(0);
    let err = run_with_research(agent.clone(), StubSearch::default(), 2).await.unwrap_err();

    assert!(err.to_string().starts_with("research step failed"));
    assert_eq!(agent.total_calls(), 1);
}
