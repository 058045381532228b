//! Test: Output - formatted files from a finished run

use crate::helpers::*;
use blog_pipeline::core::{config::ContentTargets, BlogState};
use blog_pipeline::execution::ExecutionEngine;
use blog_pipeline::format::{export, to_html, to_json, ExportOptions, MarkdownFormatter};
use chrono::{DateTime, Local, TimeZone};

fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
}

/// Same canned replies and timestamp give byte-identical markdown
#[tokio::test]
async fn test_markdown_is_deterministic() {
    let first = run_with(MockAgent::new(), 2).await.unwrap();
    let second = run_with(MockAgent::new(), 2).await.unwrap();

    let formatter = MarkdownFormatter::new(fixed_time());
    assert_eq!(formatter.format(&first), formatter.format(&second));
}

/// Every output format mentions the topic
#[tokio::test]
async fn test_outputs_contain_topic() {
    let state = run_with(MockAgent::new(), 1).await.unwrap();

    let markdown = MarkdownFormatter::new(fixed_time()).format(&state);
    assert!(markdown.contains(TOPIC));
    assert!(markdown.contains("Generated: 2025-01-15 09:30"));
    assert!(markdown.contains("**Tags:** async rust, tokio"));
    assert!(markdown.contains("Meta Description: A practical guide to async Rust."));

    assert!(to_json(&state).unwrap().contains(TOPIC));
    assert!(to_html(&state).contains("<h1>Mastering Async Rust</h1>"));
}

/// The topic appears even when neither the title nor the SEO reply mention it
#[tokio::test]
async fn test_outputs_contain_unrelated_topic() {
    let topic = "Runtime Internals";
    let engine = ExecutionEngine::new(MockAgent::new(), ContentTargets::default());
    let state = engine.run(BlogState::new(topic, 1).unwrap()).await.unwrap();
    assert_eq!(state.title, "Mastering Async Rust");

    let markdown = MarkdownFormatter::new(fixed_time()).format(&state);
    assert!(markdown.contains("**Tags:** async rust, tokio"));
    assert!(markdown.contains(topic));
    assert!(to_html(&state).contains(topic));
    assert!(to_json(&state).unwrap().contains(topic));
}

/// Export writes all three files side by side
#[tokio::test]
async fn test_export_all_formats() {
    let state = run_with(MockAgent::new(), 1).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async_rust_20250115_0930.md");

    let files = export(
        &state,
        &path,
        ExportOptions { html: true, json: true },
        fixed_time(),
    )
    .unwrap();

    let html = std::fs::read_to_string(files.html.unwrap()).unwrap();
    assert!(html.contains("<table>"));
    assert!(html.contains("<pre><code class=\"language-rust\">"));
    assert!(html.contains("content=\"A practical guide to async Rust.\""));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(files.json.unwrap()).unwrap()).unwrap();
    assert_eq!(json["word_count"], state.word_count);
    assert_eq!(json["review_score"], 7);
    assert_eq!(json["seo_score"], 8);
    assert_eq!(json["iterations"], 1);

    let markdown = std::fs::read_to_string(&path).unwrap();
    assert!(markdown.contains("Revision 1 of the draft."));
}
