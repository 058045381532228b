//! Draft measurements recomputed after every writer pass

use serde::{Deserialize, Serialize};

/// Counts derived from a markdown draft
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub code_block_count: usize,
    pub table_count: usize,
}

impl ContentMetrics {
    pub fn measure(content: &str) -> Self {
        Self {
            word_count: count_words(content),
            code_block_count: count_code_blocks(content),
            table_count: count_tables(content),
        }
    }
}

/// Whitespace-separated word count
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Number of fenced code blocks (opening fences only)
pub fn count_code_blocks(content: &str) -> usize {
    let mut in_fence = false;
    let mut count = 0;
    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            if !in_fence {
                count += 1;
            }
            in_fence = !in_fence;
        }
    }
    count
}

/// Number of markdown tables: runs of `|`-delimited rows that contain a
/// header separator row, ignoring anything inside code fences
pub fn count_tables(content: &str) -> usize {
    let mut in_fence = false;
    let mut count = 0;
    let mut run_has_separator = false;
    let mut run_len = 0;

    let mut close_run = |run_len: &mut usize, has_sep: &mut bool| {
        if *run_len >= 2 && *has_sep {
            count += 1;
        }
        *run_len = 0;
        *has_sep = false;
    };

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            close_run(&mut run_len, &mut run_has_separator);
            continue;
        }
        if !in_fence && is_table_row(trimmed) {
            run_len += 1;
            if is_separator_row(trimmed) {
                run_has_separator = true;
            }
        } else {
            close_run(&mut run_len, &mut run_has_separator);
        }
    }
    close_run(&mut run_len, &mut run_has_separator);
    count
}

pub(crate) fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

pub(crate) fn is_separator_row(trimmed: &str) -> bool {
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Title from the first `# ` heading, or the title-cased fallback
pub fn extract_title(content: &str, fallback: &str) -> String {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| title_case(fallback))
}

/// Uppercase the first letter of every word and lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Longest prefix of `text` with at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = "# Rust Async\n\nIntro text here.\n\n```python\nprint('hi')\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nMore words.\n\n```rust\nfn main() {}\n```\n";

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_count_code_blocks() {
        assert_eq!(count_code_blocks(DRAFT), 2);
        assert_eq!(count_code_blocks("no code"), 0);
    }

    #[test]
    fn test_count_tables() {
        assert_eq!(count_tables(DRAFT), 1);
        let two = "| a |\n|---|\n| 1 |\n\ntext\n\n| b | c |\n| :-: | --- |\n| x | y |\n";
        assert_eq!(count_tables(two), 2);
    }

    #[test]
    fn test_table_rows_without_separator_are_not_tables() {
        assert_eq!(count_tables("| just | pipes |\n| more | pipes |\n"), 0);
    }

    #[test]
    fn test_tables_inside_code_fences_are_ignored() {
        let content = "```\n| a |\n|---|\n| 1 |\n```\n";
        assert_eq!(count_tables(content), 0);
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title(DRAFT, "fallback"), "Rust Async");
        assert_eq!(extract_title("## Not h1\nbody", "async rust tips"), "Async Rust Tips");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("machine LEARNING best-practices"), "Machine Learning Best-Practices");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_measure() {
        let metrics = ContentMetrics::measure(DRAFT);
        assert_eq!(metrics.word_count, count_words(DRAFT));
        assert_eq!(metrics.code_block_count, 2);
        assert_eq!(metrics.table_count, 1);
    }
}
