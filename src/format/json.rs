//! JSON summary export

use crate::core::{feedback::SeoAnalysis, BlogState};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BlogExport<'a> {
    title: &'a str,
    topic: &'a str,
    word_count: usize,
    code_blocks: usize,
    tables: usize,
    review_score: u8,
    seo_score: u8,
    seo_analysis: Option<&'a SeoAnalysis>,
    iterations: u32,
    generation_time: f64,
}

/// Metadata and scores of a finished run as pretty-printed JSON
pub fn to_json(state: &BlogState) -> Result<String, serde_json::Error> {
    let export = BlogExport {
        title: &state.title,
        topic: &state.topic,
        word_count: state.word_count,
        code_blocks: state.code_block_count,
        tables: state.table_count,
        review_score: state.final_review_score,
        seo_score: state.final_seo_score,
        seo_analysis: state.seo_analysis.as_ref(),
        iterations: state.current_iteration,
        generation_time: state.generation_time_secs,
    };
    serde_json::to_string_pretty(&export)
}
