//! Prompt construction for each step

use crate::agent::Prompt;
use crate::core::{
    config::ContentTargets,
    feedback::{ResearchContext, SearchSource},
    metrics::truncate_chars,
    BlogState,
};
use std::fmt::Write;

// System prompts loaded at compile time
pub const WRITER_SYSTEM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/writer_system.md"));
pub const REVIEWER_SYSTEM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/reviewer_system.md"));
pub const SEO_SYSTEM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/seo_system.md"));
pub const RESEARCHER_SYSTEM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/researcher_system.md"));

/// Draft characters the SEO step sees
pub const SEO_CONTENT_LIMIT: usize = 15_000;

/// Characters of each search result passed to the synthesis prompt
const SOURCE_EXCERPT_LIMIT: usize = 500;

/// Search results passed to the synthesis prompt
const SYNTHESIS_SOURCE_LIMIT: usize = 8;

/// Writer prompt: an initial draft on round 1, a refinement afterwards
pub fn writer_prompt(state: &BlogState, targets: &ContentTargets) -> Prompt {
    let user = if state.current_iteration <= 1 {
        initial_draft_prompt(state, targets)
    } else {
        refinement_prompt(state, targets)
    };
    Prompt::new(WRITER_SYSTEM, user)
}

fn initial_draft_prompt(state: &BlogState, targets: &ContentTargets) -> String {
    let research = state
        .research_context
        .as_ref()
        .map(research_section)
        .unwrap_or_default();

    format!(
        r#"Write a comprehensive, industry-grade blog post about:

**Topic:** {topic}
{research}
Requirements:
1. **Length**: at least {min_words} words
2. **Structure**: at least {sections} major sections, each with subsections
3. **Code Examples**: {code} practical Python examples with detailed explanations
4. **Tables**: {tables} data tables (comparisons, feature matrices, statistics)
5. **Real Data**: industry statistics, research findings and real-world examples
6. **Citations**: reference the research context above where it applies

Structure the article as: an engaging introduction with a clear thesis, the main sections, practical examples and case studies, common pitfalls, best practices, actionable takeaways, and a strong conclusion.

Format the whole post in clean Markdown suitable for Medium. Use ```python fences for code and | tables for structured comparisons.

Begin writing the complete blog post now:"#,
        topic = state.topic,
        research = research,
        min_words = targets.min_words,
        sections = targets.sections,
        code = targets.code_examples,
        tables = targets.tables,
    )
}

fn refinement_prompt(state: &BlogState, targets: &ContentTargets) -> String {
    let iteration = state.current_iteration;
    let mut feedback = String::new();

    if let Some(review) = &state.review_feedback {
        let _ = write!(
            feedback,
            "\n## Reviewer Feedback (Score: {}/10)\n\n### Strengths:\n{}\n\n### Areas to Improve:\n{}\n\n### Priority Fixes:\n{}\n\n### Detailed Feedback:\n{}\n",
            review.overall_score,
            bullets(&review.strengths),
            bullets(&review.improvements),
            bullets(&review.priority_fixes),
            review.detailed_feedback.trim(),
        );
    }

    if let Some(seo) = &state.seo_analysis {
        let _ = write!(
            feedback,
            "\n## SEO Optimization Suggestions (Score: {}/10)\n\n### Primary Keywords: {}\n### Suggested Title: {}\n### Meta Description: {}\n\n### Heading Suggestions:\n{}\n\n### Content Suggestions:\n{}\n",
            seo.seo_score,
            seo.primary_keywords.join(", "),
            seo.optimized_title,
            seo.meta_description,
            bullets(&seo.heading_suggestions),
            bullets(&seo.content_suggestions),
        );
    }

    let focus = if iteration == 2 {
        "Focus on: expanding content depth, adding code examples, improving explanations, and addressing every reviewer concern."
    } else {
        "Focus on: final polish, SEO optimization, filling any missing components, and maximizing reader value."
    };

    format!(
        r#"You are refining a blog post in iteration {iteration} of {max}.

**Original Topic:** {topic}

**Current Draft:**
{draft}

---

**Feedback to Address:**
{feedback}
---

**Your Task for Iteration {iteration}:**

{focus}

Requirements:
1. Address ALL feedback points systematically
2. Expand sections that need more depth
3. Reach at least {code} code examples and {tables} tables
4. Improve flow and transitions
5. Strengthen the introduction and conclusion
6. Keep the article above {min_words} words
7. Apply the SEO suggestions naturally

Write the complete improved blog post in Markdown format:"#,
        iteration = iteration,
        max = state.max_iterations,
        topic = state.topic,
        draft = state.draft_content,
        feedback = feedback,
        focus = focus,
        code = targets.code_examples,
        tables = targets.tables,
        min_words = targets.min_words,
    )
}

fn research_section(context: &ResearchContext) -> String {
    format!(
        "\n## Research Context (use these facts and cite sources)\n\n### Key Facts:\n{}\n\n### Industry Statistics:\n{}\n\n### Best Practices to Cover:\n{}\n\n### Key Sources to Reference:\n{}\n",
        bullets(&context.key_facts),
        bullets(&context.statistics),
        bullets(&context.best_practices),
        bullets(&context.key_sources),
    )
}

/// Reviewer prompt over the current draft
pub fn reviewer_prompt(state: &BlogState, targets: &ContentTargets) -> Prompt {
    let user = format!(
        r#"Please review the following blog post draft (Iteration {iteration}/{max}).

**Topic:** {topic}
**Current Statistics:**
- Word Count: {words} words (Target: {min_words}+)
- Code Blocks: {code} (Target: {target_code}+)
- Tables: {tables} (Target: {target_tables}+)

---

**BLOG CONTENT:**

{draft}

---

**REVIEW REQUIREMENTS:**

Provide a comprehensive review in this EXACT format:

OVERALL_SCORE: [1-10]

STRENGTHS:
- [strength 1]
- [strength 2]

IMPROVEMENTS:
- [improvement 1]
- [improvement 2]

PRIORITY_FIXES:
- [fix 1]
- [fix 2]

DETAILED_FEEDBACK:
[Your detailed feedback here]

Be constructive and specific."#,
        iteration = state.current_iteration,
        max = state.max_iterations,
        topic = state.topic,
        words = state.word_count,
        min_words = targets.min_words,
        code = state.code_block_count,
        target_code = targets.code_examples,
        tables = state.table_count,
        target_tables = targets.tables,
        draft = state.draft_content,
    );
    Prompt::new(REVIEWER_SYSTEM, user)
}

/// SEO prompt over the (truncated) current draft
pub fn seo_prompt(state: &BlogState) -> Prompt {
    let user = format!(
        r#"Analyze and optimize the following blog post for SEO (Iteration {iteration}/{max}).

**Topic:** {topic}
**Current Title:** {title}

---

**BLOG CONTENT:**

{draft}

---

**SEO OPTIMIZATION REQUIREMENTS:**

Provide your analysis in this EXACT format:

SEO_SCORE: [1-10]

PRIMARY_KEYWORDS:
- [keyword 1]
- [keyword 2]

SECONDARY_KEYWORDS:
- [keyword 1]
- [keyword 2]

OPTIMIZED_TITLE: [Your optimized title here]

META_DESCRIPTION: [150-160 character meta description]

HEADING_SUGGESTIONS:
- [heading change 1]
- [heading change 2]

CONTENT_SUGGESTIONS:
- [suggestion 1]
- [suggestion 2]

DETAILED_ANALYSIS:
[Your detailed SEO analysis here]

Balance SEO optimization with natural, engaging writing."#,
        iteration = state.current_iteration,
        max = state.max_iterations,
        topic = state.topic,
        title = state.title,
        draft = truncate_chars(&state.draft_content, SEO_CONTENT_LIMIT),
    );
    Prompt::new(SEO_SYSTEM, user)
}

/// Synthesis prompt condensing search results into research sections
pub fn research_prompt(topic: &str, sources: &[SearchSource]) -> Prompt {
    let sources_text = sources
        .iter()
        .take(SYNTHESIS_SOURCE_LIMIT)
        .map(|s| {
            format!(
                "**Source:** {}\n**URL:** {}\n**Content:** {}...",
                s.title,
                s.url,
                truncate_chars(&s.content, SOURCE_EXCERPT_LIMIT)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let user = format!(
        r#"Based on the following research results about "{topic}", extract and organize:

{sources_text}

---

Provide a structured research summary in this EXACT format:

KEY_FACTS:
- [fact with source]

STATISTICS:
- [statistic with year and source]

BEST_PRACTICES:
- [practice]

RECOMMENDED_TOPICS:
- [subtopic to cover]

KEY_SOURCES:
- [source name]: [url]

Focus on factual, verifiable information from authoritative sources."#,
    );
    Prompt::new(RESEARCHER_SYSTEM, user)
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
