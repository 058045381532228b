//! Test: Iteration Loop - writer, reviewer and SEO rounds until the limit

use crate::helpers::*;
use blog_pipeline::core::{ExecutionStatus, StepKind};
use blog_pipeline::execution::prompts;

/// Every iteration count runs exactly that many rounds
#[tokio::test]
async fn test_n_iterations_run_n_rounds() {
    for n in 1..=5u32 {
        let agent = MockAgent::new();
        let state = run_with(agent.clone(), n).await.unwrap();

        assert!(state.is_complete);
        assert_eq!(state.status(), ExecutionStatus::Done);
        assert_eq!(state.current_iteration, n);

        let n = n as usize;
        assert_eq!(agent.calls_to(prompts::WRITER_SYSTEM), n);
        assert_eq!(agent.calls_to(prompts::REVIEWER_SYSTEM), n);
        assert_eq!(agent.calls_to(prompts::SEO_SYSTEM), n);
        assert_eq!(agent.total_calls(), 3 * n);

        assert_eq!(state.runs_of(StepKind::Writer), n);
        assert_eq!(state.runs_of(StepKind::Reviewer), n);
        assert_eq!(state.runs_of(StepKind::Seo), n);
        assert_eq!(state.messages.len(), 3 * n);
    }
}

/// A single iteration runs each step once, in order
#[tokio::test]
async fn test_single_iteration() {
    let agent = MockAgent::new();
    let state = run_with(agent.clone(), 1).await.unwrap();

    let systems: Vec<String> = agent.prompts().into_iter().map(|p| p.system).collect();
    assert_eq!(
        systems,
        vec![prompts::WRITER_SYSTEM, prompts::REVIEWER_SYSTEM, prompts::SEO_SYSTEM]
    );

    let steps: Vec<StepKind> = state.messages.iter().map(|m| m.step).collect();
    assert_eq!(steps, vec![StepKind::Writer, StepKind::Reviewer, StepKind::Seo]);
    assert_eq!(state.final_review_score, 7);
    assert_eq!(state.final_seo_score, 8);
}

/// The final state holds the last draft and its measurements
#[tokio::test]
async fn test_final_draft_and_metrics() {
    let state = run_with(MockAgent::new(), 3).await.unwrap();

    assert_eq!(state.draft_content, writer_reply(3));
    assert_eq!(state.title, "Mastering Async Rust");
    assert_eq!(state.word_count, state.draft_content.split_whitespace().count());
    assert_eq!(state.code_block_count, 1);
    assert_eq!(state.table_count, 1);
    assert!(state.generation_time_secs >= 0.0);
}

/// Later writer passes see the previous draft and both reports
#[tokio::test]
async fn test_refinement_prompts_carry_feedback() {
    let agent = MockAgent::new();
    run_with(agent.clone(), 3).await.unwrap();

    let writer = agent.writer_prompts();
    assert_eq!(writer.len(), 3);

    assert!(writer[0].contains(TOPIC));
    assert!(!writer[0].contains("Reviewer Feedback"));

    assert!(writer[1].contains("iteration 2 of 3"));
    assert!(writer[1].contains("Revision 1 of the draft."));
    assert!(writer[1].contains("Score: 7/10"));
    assert!(writer[1].contains("- Add benchmarks"));
    assert!(writer[1].contains("Suggested Title: Async Rust in Practice"));
    assert!(writer[1].contains("expanding content depth"));

    assert!(writer[2].contains("Revision 2 of the draft."));
    assert!(writer[2].contains("final polish"));
}

/// Reviewer and SEO steps see the draft written in the same round
#[tokio::test]
async fn test_advisory_steps_see_current_draft() {
    let agent = MockAgent::new();
    run_with(agent.clone(), 2).await.unwrap();

    let prompts = agent.prompts();
    assert!(prompts[1].user.contains("Revision 1 of the draft."));
    assert!(prompts[2].user.contains("Revision 1 of the draft."));
    assert!(prompts[4].user.contains("Revision 2 of the draft."));
    assert!(prompts[5].user.contains("Revision 2 of the draft."));
}
