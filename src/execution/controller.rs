//! Iteration controller - decides whether another round runs

use crate::core::{BlogState, ExecutionStatus};
use tracing::info;

/// Outcome of a controller decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Another writer/reviewer/SEO round follows
    Continue { next_iteration: u32 },
    /// Iteration limit reached; the state is now sealed
    Done,
}

/// Advance the iteration counter or seal the state
///
/// Below the limit the counter moves up by one. At the limit the state is
/// marked complete and the last review and SEO scores are captured, 0 where a
/// report is missing. Calling this on a completed state is a no-op that
/// returns [`Transition::Done`].
pub fn advance(state: &mut BlogState) -> Transition {
    if state.status() == ExecutionStatus::Done {
        return Transition::Done;
    }

    if state.current_iteration < state.max_iterations {
        state.current_iteration += 1;
        info!(
            "Continuing to iteration {}/{}",
            state.current_iteration, state.max_iterations
        );
        return Transition::Continue {
            next_iteration: state.current_iteration,
        };
    }

    state.is_complete = true;
    state.final_review_score = state
        .review_feedback
        .as_ref()
        .map(|f| f.overall_score)
        .unwrap_or(0);
    state.final_seo_score = state.seo_analysis.as_ref().map(|s| s.seo_score).unwrap_or(0);
    info!(
        "Completed after {} iterations (review {}/10, SEO {}/10)",
        state.current_iteration, state.final_review_score, state.final_seo_score
    );
    Transition::Done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feedback::ReviewFeedback;

    #[test]
    fn test_continue_below_limit() {
        let mut state = BlogState::new("topic", 3).unwrap();
        assert_eq!(advance(&mut state), Transition::Continue { next_iteration: 2 });
        assert_eq!(advance(&mut state), Transition::Continue { next_iteration: 3 });
        assert!(!state.is_complete);
    }

    #[test]
    fn test_done_at_limit_captures_scores() {
        let mut state = BlogState::new("topic", 1).unwrap();
        state.review_feedback = Some(ReviewFeedback::from_response("OVERALL_SCORE: 8"));

        assert_eq!(advance(&mut state), Transition::Done);
        assert!(state.is_complete);
        assert_eq!(state.current_iteration, 1);
        assert_eq!(state.final_review_score, 8);
        assert_eq!(state.final_seo_score, 0);
    }

    #[test]
    fn test_done_is_terminal() {
        let mut state = BlogState::new("topic", 1).unwrap();
        advance(&mut state);
        state.review_feedback = Some(ReviewFeedback::from_response("OVERALL_SCORE: 2"));

        assert_eq!(advance(&mut state), Transition::Done);
        assert_eq!(state.current_iteration, 1);
        assert_eq!(state.final_review_score, 0);
    }
}
