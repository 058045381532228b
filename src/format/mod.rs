//! Rendering the finished state to markdown, HTML and JSON

pub mod html;
pub mod json;
pub mod markdown;

use crate::core::BlogState;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub use html::to_html;
pub use json::to_json;
pub use markdown::MarkdownFormatter;

/// Maximum slug length in characters
pub const SLUG_MAX_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which extra files to write next to the markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub html: bool,
    pub json: bool,
}

/// Paths written by [`export`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub markdown: PathBuf,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Turn a topic into a file-name friendly slug
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_gap = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            in_gap = true;
        } else {
            if in_gap {
                slug.push('_');
            }
            in_gap = false;
            slug.push(c);
        }
    }

    let slug = slug.trim_matches('_');
    slug.chars().take(SLUG_MAX_LEN).collect()
}

/// `<slug>_<YYYYmmdd_HHMM>.md`, with `blog` standing in for an empty slug
pub fn default_output_name(topic: &str, now: &DateTime<Local>) -> String {
    let slug = slugify(topic);
    let slug = if slug.is_empty() { "blog".to_string() } else { slug };
    format!("{}_{}.md", slug, now.format("%Y%m%d_%H%M"))
}

/// Write the markdown file plus any requested HTML and JSON siblings
pub fn export(
    state: &BlogState,
    path: &Path,
    options: ExportOptions,
    generated_at: DateTime<Local>,
) -> Result<ExportedFiles, ExportError> {
    let markdown = MarkdownFormatter::new(generated_at).format(state);
    write_file(path, &markdown)?;

    let html = if options.html {
        let html_path = path.with_extension("html");
        write_file(&html_path, &to_html(state))?;
        Some(html_path)
    } else {
        None
    };

    let json = if options.json {
        let json_path = path.with_extension("json");
        write_file(&json_path, &to_json(state)?)?;
        Some(json_path)
    } else {
        None
    };

    Ok(ExportedFiles {
        markdown: path.to_path_buf(),
        html,
        json,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Render an integer with comma thousands separators
pub(crate) fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Up to five tags: the primary keywords, or the topic when there are none
pub(crate) fn tags(state: &BlogState) -> Vec<String> {
    match &state.seo_analysis {
        Some(seo) if !seo.primary_keywords.is_empty() => {
            seo.primary_keywords.iter().take(5).cloned().collect()
        }
        _ => vec![state.topic.clone()],
    }
}
