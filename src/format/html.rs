//! Standalone HTML rendering of the draft
//!
//! Covers the markdown subset the writer produces: fenced code, `#` to `###`
//! headings, tables, bullet lists, paragraphs, and bold/italic/inline code.

use crate::core::{
    metrics::{is_separator_row, is_table_row},
    BlogState,
};
use regex::Regex;

const STYLE: &str = "\
        body { font-family: 'Georgia', serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.8; }
        h1, h2, h3 { font-family: 'Helvetica', sans-serif; }
        pre { background: #f4f4f4; padding: 15px; border-radius: 5px; overflow-x: auto; }
        code { background: #f4f4f4; padding: 2px 6px; border-radius: 3px; }
        table { border-collapse: collapse; width: 100%; margin: 20px 0; }
        th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
        th { background: #f8f8f8; }";

/// Render the state's draft as a complete HTML document
pub fn to_html(state: &BlogState) -> String {
    let title = if state.title.is_empty() {
        "Blog Post"
    } else {
        state.title.as_str()
    };
    let description = state
        .seo_analysis
        .as_ref()
        .map(|s| s.meta_description.as_str())
        .unwrap_or("");

    let body = render_body(&state.draft_content, &Inline::new());

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n    \
         <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <meta name=\"description\" content=\"{}\">\n    \
         <meta name=\"keywords\" content=\"{}\">\n    \
         <meta name=\"topic\" content=\"{}\">\n    \
         <title>{}</title>\n    \
         <style>\n{}\n    </style>\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(description),
        escape(&crate::format::tags(state).join(", ")),
        escape(&state.topic),
        escape(title),
        STYLE,
        body,
    )
}

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline span rules, compiled once per document
struct Inline {
    bold: Option<Regex>,
    italic: Option<Regex>,
}

impl Inline {
    fn new() -> Self {
        Self {
            bold: Regex::new(r"\*\*(.+?)\*\*").ok(),
            italic: Regex::new(r"\*([^*]+)\*").ok(),
        }
    }

    /// Escape and convert one line's inline markup
    fn render(&self, text: &str) -> String {
        let escaped = escape(text);
        let parts: Vec<&str> = escaped.split('`').collect();
        let unmatched_tick = parts.len() % 2 == 0;

        let mut out = String::with_capacity(escaped.len());
        for (i, part) in parts.iter().enumerate() {
            if i % 2 == 0 {
                out.push_str(&self.emphasis(part));
            } else if unmatched_tick && i == parts.len() - 1 {
                out.push('`');
                out.push_str(&self.emphasis(part));
            } else {
                out.push_str("<code>");
                out.push_str(part);
                out.push_str("</code>");
            }
        }
        out
    }

    fn emphasis(&self, text: &str) -> String {
        let mut out = text.to_string();
        if let Some(bold) = &self.bold {
            out = bold.replace_all(&out, "<strong>$1</strong>").into_owned();
        }
        if let Some(italic) = &self.italic {
            out = italic.replace_all(&out, "<em>$1</em>").into_owned();
        }
        out
    }
}

fn heading_level(line: &str) -> Option<(usize, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    line[hashes..]
        .strip_prefix(' ')
        .map(|rest| (hashes, rest.trim()))
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))
}

fn render_body(markdown: &str, inline: &Inline) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            i += 1;
        } else if let Some(lang) = trimmed.strip_prefix("```") {
            let lang = lang.trim();
            let mut code = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                code.push(lines[i]);
                i += 1;
            }
            // skip the closing fence
            i += 1;
            blocks.push(format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                escape(lang),
                escape(&code.join("\n"))
            ));
        } else if let Some((level, text)) = heading_level(trimmed) {
            blocks.push(format!("<h{0}>{1}</h{0}>", level, inline.render(text)));
            i += 1;
        } else if is_table_row(trimmed) {
            let start = i;
            while i < lines.len() && is_table_row(lines[i].trim()) {
                i += 1;
            }
            blocks.push(render_table(&lines[start..i], inline));
        } else if list_item(trimmed).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                match list_item(lines[i].trim()) {
                    Some(item) => items.push(format!("<li>{}</li>", inline.render(item))),
                    None => break,
                }
                i += 1;
            }
            blocks.push(format!("<ul>\n{}\n</ul>", items.join("\n")));
        } else {
            let mut para = Vec::new();
            while i < lines.len() {
                let t = lines[i].trim();
                if t.is_empty()
                    || t.starts_with("```")
                    || heading_level(t).is_some()
                    || is_table_row(t)
                    || list_item(t).is_some()
                {
                    break;
                }
                para.push(inline.render(t));
                i += 1;
            }
            blocks.push(format!("<p>{}</p>", para.join("\n")));
        }
    }

    blocks.join("\n")
}

fn split_cells(row: &str) -> Vec<&str> {
    row.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(str::trim)
        .collect()
}

fn render_table(rows: &[&str], inline: &Inline) -> String {
    let has_header = rows.len() > 1 && is_separator_row(rows[1].trim());
    let mut html = vec!["<table>".to_string()];

    for (idx, row) in rows.iter().enumerate() {
        if is_separator_row(row.trim()) {
            continue;
        }
        let tag = if has_header && idx == 0 { "th" } else { "td" };
        let cells: Vec<String> = split_cells(row)
            .into_iter()
            .map(|cell| format!("<{0}>{1}</{0}>", tag, inline.render(cell)))
            .collect();
        html.push(format!("<tr>{}</tr>", cells.join("")));
    }

    html.push("</table>".to_string());
    html.join("\n")
}
