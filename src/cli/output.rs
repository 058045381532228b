//! CLI output formatting

use crate::{
    core::{BlogConfig, BlogState},
    execution::ExecutionEvent,
    format::ExportedFiles,
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static PAGE: Emoji<'_, '_> = Emoji("📄 ", "");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static STAR: Emoji<'_, '_> = Emoji("⭐ ", "");

/// Create a spinner for long model calls
pub fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
        spinner.set_style(template);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Event handler that drives a spinner and prints step results above it
pub fn progress_handler(spinner: ProgressBar) -> impl Fn(ExecutionEvent) + Send + Sync + 'static {
    move |event| match &event {
        ExecutionEvent::StepStarted { .. } => {
            spinner.set_message(format_execution_event(&event));
        }
        ExecutionEvent::PipelineCompleted { .. } => {
            spinner.finish_and_clear();
            println!("{}", format_execution_event(&event));
        }
        _ => spinner.println(format_execution_event(&event)),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            topic,
            max_iterations,
        } => format!(
            "{} Generating {} ({} iterations)",
            ROCKET,
            style(topic).bold(),
            max_iterations
        ),
        ExecutionEvent::IterationStarted {
            iteration,
            max_iterations,
        } => format!(
            "{}",
            style(format!("── Iteration {}/{} ──", iteration, max_iterations)).cyan()
        ),
        ExecutionEvent::StepStarted { step, .. } => {
            format!("{} {} working...", SPINNER, style(step.display_name()).cyan())
        }
        ExecutionEvent::StepCompleted { step, summary, .. } => format!(
            "{} {}: {}",
            CHECK,
            style(step.display_name()).green(),
            style(summary).dim()
        ),
        ExecutionEvent::StepFailed { step, error } => format!(
            "{} {}: {}",
            CROSS,
            style(step.display_name()).red(),
            style(error).dim()
        ),
        ExecutionEvent::PipelineCompleted {
            iterations,
            review_score,
            seo_score,
        } => format!(
            "{} Completed {} iterations (review {}/10, SEO {}/10)",
            INFO, iterations, review_score, seo_score
        ),
    }
}

/// Run settings shown before generation starts
pub fn format_config_panel(topic: &str, config: &BlogConfig, output_path: &Path) -> String {
    let research = if config.research.enabled {
        style("enabled").green()
    } else {
        style("disabled").dim()
    };
    [
        format!("{}", style("Blog Generation Configuration").bold().blue()),
        format!("  Topic: {}", style(topic).bold()),
        format!("  Iterations: {}", style(config.iterations).cyan()),
        format!("  Model: {}", style(&config.model.name).cyan()),
        format!("  Research: {}", research),
        format!("  Output: {}", style(output_path.display()).dim()),
    ]
    .join("\n")
}

/// Saved file locations
pub fn format_saved_files(files: &ExportedFiles) -> String {
    let mut lines = vec![format!(
        "{} Blog saved to: {}",
        CHECK,
        style(files.markdown.display()).cyan()
    )];
    if let Some(html) = &files.html {
        lines.push(format!("{} HTML saved to: {}", CHECK, style(html.display()).cyan()));
    }
    if let Some(json) = &files.json {
        lines.push(format!("{} JSON saved to: {}", CHECK, style(json.display()).cyan()));
    }
    lines.join("\n")
}

/// Final statistics for a finished run
pub fn format_summary(state: &BlogState) -> String {
    [
        format!("{}", style("Blog generation complete!").bold().green()),
        format!("  {}Word Count: {}", PAGE, crate::format::thousands(state.word_count)),
        format!("  Code Examples: {}", state.code_block_count),
        format!("  Tables: {}", state.table_count),
        format!("  {}Review Score: {}/10", STAR, state.final_review_score),
        format!("  {}SEO Score: {}/10", SEARCH, state.final_seo_score),
        format!("  Generation Time: {:.1}s", state.generation_time_secs),
    ]
    .join("\n")
}
