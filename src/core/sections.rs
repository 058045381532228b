//! Extraction of `KEY: value` and `KEY:` bullet-list sections from model text
//!
//! The reviewer, SEO and research prompts ask the model to answer in a fixed
//! layout:
//!
//! ```text
//! OVERALL_SCORE: 7
//!
//! STRENGTHS:
//! - clear structure
//! - good examples
//! ```
//!
//! Models do not always follow it, so every accessor returns an empty value
//! rather than an error when a section is missing.

use regex::Regex;

/// Parsed view over a structured model response
#[derive(Debug, Clone)]
pub struct SectionedResponse<'a> {
    text: &'a str,
}

impl<'a> SectionedResponse<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Bullet items (`-`, `•` or `* `) directly following `KEY:`
    ///
    /// A `*` only opens an item when followed by whitespace, so a bold
    /// `**NEXT_KEY:**` line ends the list.
    pub fn list(&self, key: &str) -> Vec<String> {
        let pattern = format!(
            r"(?im)^[ \t]*\**{}\**:\**[ \t]*\r?\n((?:[ \t]*(?:[-•]|\*[ \t])[ \t]*[^\n]+\n?)+)",
            regex::escape(key)
        );
        let Ok(re) = Regex::new(&pattern) else {
            return Vec::new();
        };
        let Some(block) = re.captures(self.text).and_then(|c| c.get(1)) else {
            return Vec::new();
        };

        block
            .as_str()
            .lines()
            .filter_map(|line| {
                let item = line
                    .trim_start()
                    .trim_start_matches(['-', '•', '*'])
                    .trim();
                (!item.is_empty()).then(|| item.to_string())
            })
            .collect()
    }

    /// Single-line value after `KEY:`
    pub fn value(&self, key: &str) -> Option<String> {
        let pattern = format!(
            r"(?im)^[ \t]*\**{}\**:\**[ \t]*([^\n]+)",
            regex::escape(key)
        );
        let re = Regex::new(&pattern).ok()?;
        re.captures(self.text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().trim_matches('*').trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Integer score after `KEY:`, clamped to 1..=10
    pub fn score(&self, key: &str) -> Option<u8> {
        let pattern = format!(r"(?i){}\**:[ \t]*\**[ \t]*(\d+)", regex::escape(key));
        let re = Regex::new(&pattern).ok()?;
        let raw: u64 = re.captures(self.text)?.get(1)?.as_str().parse().ok()?;
        Some(raw.clamp(1, 10) as u8)
    }
}
