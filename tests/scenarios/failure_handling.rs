//! Test: Failure Handling - any model error aborts the run

use crate::helpers::*;
use blog_pipeline::core::{
    config::ContentTargets, BlogState, PipelineError, StateUpdate, StepDetail, StepKind, StepRecord,
};
use blog_pipeline::execution::ExecutionEngine;

/// A writer failure on the first call stops everything
#[tokio::test]
async fn test_writer_failure_aborts() {
    let agent = MockAgent::failing_at(0);
    let err = run_with(agent.clone(), 3).await.unwrap_err();

    assert!(matches!(err, PipelineError::Agent { step: StepKind::Writer, .. }));
    assert_eq!(agent.total_calls(), 1);
}

/// A reviewer failure in a later round stops the run without further calls
#[tokio::test]
async fn test_reviewer_failure_in_second_round() {
    let agent = MockAgent::failing_at(4);
    let err = run_with(agent.clone(), 3).await.unwrap_err();

    assert!(matches!(err, PipelineError::Agent { step: StepKind::Reviewer, .. }));
    assert_eq!(agent.total_calls(), 5);
    assert!(err.to_string().contains("reviewer"));
}

/// The SEO step fails like any other
#[tokio::test]
async fn test_seo_failure_aborts() {
    let agent = MockAgent::failing_at(2);
    let err = run_with(agent.clone(), 1).await.unwrap_err();
    assert!(matches!(err, PipelineError::Agent { step: StepKind::Seo, .. }));
}

/// A completed state rejects further updates
#[tokio::test]
async fn test_completed_state_is_sealed() {
    let mut state = run_with(MockAgent::new(), 1).await.unwrap();
    let messages = state.messages.len();

    let err = state
        .apply(
            StateUpdate::LogOnly,
            StepRecord::new(StepKind::Writer, 2, StepDetail::Scored { score: 1 }),
        )
        .unwrap_err();

    assert!(matches!(err, PipelineError::StateSealed(StepKind::Writer)));
    assert_eq!(state.messages.len(), messages);
}

/// A finished state cannot be run again
#[tokio::test]
async fn test_completed_state_cannot_rerun() {
    let state = run_with(MockAgent::new(), 1).await.unwrap();
    let agent = MockAgent::new();
    let engine = ExecutionEngine::new(agent.clone(), ContentTargets::default());

    assert!(engine.run(state).await.is_err());
    assert_eq!(agent.total_calls(), 0);
}

/// Invalid initial input is rejected before any call
#[test]
fn test_invalid_initial_state() {
    assert!(matches!(BlogState::new("   ", 3), Err(PipelineError::InvalidState(_))));
    assert!(matches!(BlogState::new(TOPIC, 0), Err(PipelineError::InvalidState(_))));
}
