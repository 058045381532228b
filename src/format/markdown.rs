//! Publish-ready markdown

use crate::core::{metrics::is_table_row, BlogState};
use crate::format::{tags, thousands};
use chrono::{DateTime, Local};
use regex::Regex;

/// Renders the final state as markdown with a metadata header and footer
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    generated_at: DateTime<Local>,
}

impl MarkdownFormatter {
    pub fn new(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }

    pub fn format(&self, state: &BlogState) -> String {
        let mut out = [
            self.meta_block(state),
            clean_content(&state.draft_content),
            footer(state),
        ]
        .join("\n\n");
        out.push('\n');
        out
    }

    fn meta_block(&self, state: &BlogState) -> String {
        let (meta_description, keywords) = match &state.seo_analysis {
            Some(seo) => (seo.meta_description.as_str(), seo.primary_keywords.join(", ")),
            None => ("", String::new()),
        };

        format!(
            "<!--\n\
             BLOG METADATA (Remove before publishing)\n\
             ========================================\n\
             Topic: {}\n\
             Title: {}\n\
             Meta Description: {}\n\
             Primary Keywords: {}\n\
             Word Count: {}\n\
             Code Examples: {}\n\
             Tables: {}\n\
             Review Score: {}/10\n\
             SEO Score: {}/10\n\
             Generated: {}\n\
             -->",
            state.topic,
            state.title,
            meta_description,
            keywords,
            thousands(state.word_count),
            state.code_block_count,
            state.table_count,
            state.final_review_score,
            state.final_seo_score,
            self.generated_at.format("%Y-%m-%d %H:%M"),
        )
    }
}

fn footer(state: &BlogState) -> String {
    format!(
        "---\n\n\
         *📖 Reading time: ~{} minutes | 📝 {} words*\n\n\
         **Tags:** {}\n\n\
         ---\n\n\
         *This article was generated with AI assistance and reviewed for quality and accuracy.*",
        state.reading_time_minutes(),
        thousands(state.word_count),
        tags(state).join(", "),
    )
}

fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(char::is_whitespace)
}

/// Normalise spacing around headings and tables
///
/// Outside code fences, headings get a blank line before them and tables a
/// blank line on each side. Runs of four or more newlines collapse to three.
pub fn clean_content(content: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut prev_table = false;

    for line in content.trim().lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            if prev_table {
                lines.push("");
            }
            in_fence = !in_fence;
            prev_table = false;
            lines.push(line);
            continue;
        }
        if in_fence {
            lines.push(line);
            continue;
        }

        let table = is_table_row(trimmed);
        let prev_blank = lines.last().map_or(true, |l| l.trim().is_empty());
        let needs_gap = !trimmed.is_empty()
            && !prev_blank
            && (is_heading(trimmed) || table != prev_table);
        if needs_gap {
            lines.push("");
        }

        lines.push(line);
        prev_table = table;
    }

    let joined = lines.join("\n");
    match Regex::new(r"\n{4,}") {
        Ok(runs) => runs.replace_all(&joined, "\n\n\n").into_owned(),
        Err(_) => joined,
    }
}
