// HTML output for rendered annotations and span diffs

use crate::annotation::{RenderedTranscript, Tag};
use crate::config::RenderConfig;
use crate::constants::classes;
use crate::span_diff::DiffSegment;

/// Escape text for safe inclusion in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn tagged_span(tag: Tag, text: &str, config: &RenderConfig) -> String {
    if config.inline_styles {
        format!(r#"<span style="color: {};">{}</span>"#, tag.color(), escape(text))
    } else {
        format!(r#"<span class="{}">{}</span>"#, tag.class(), escape(text))
    }
}

/// Actual row: one colored span per slot, tokens separated by spaces
pub fn render_highlighted(rendered: &RenderedTranscript, config: &RenderConfig) -> String {
    rendered
        .tokens
        .iter()
        .map(|token| {
            token
                .slots
                .iter()
                .map(|slot| tagged_span(slot.actual.tag, &slot.actual.text, config))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expected row: corrections, or the blank placeholder for correct slots
pub fn render_expected(rendered: &RenderedTranscript, config: &RenderConfig) -> String {
    rendered
        .tokens
        .iter()
        .map(|token| {
            token
                .slots
                .iter()
                .map(|slot| {
                    let content = match &slot.expected {
                        Some(text) => escape(text),
                        // placeholder is already markup
                        None => config.blank_placeholder.clone(),
                    };
                    format!(r#"<span class="{}">{}</span>"#, classes::EXPECTED, content)
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Both rows in a monospaced table so slots line up column for column
pub fn render_table(rendered: &RenderedTranscript, config: &RenderConfig) -> String {
    format!(
        concat!(
            r#"<table style="border-spacing: 0px; font-family: monospace;">"#,
            "\n    <tr><td>{}</td></tr>",
            "\n    <tr><td>{}</td></tr>",
            "\n</table>"
        ),
        render_highlighted(rendered, config),
        render_expected(rendered, config)
    )
}

/// Reference text with disagreeing spans highlighted as substituted
pub fn render_span_diff(segments: &[DiffSegment], config: &RenderConfig) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.matched {
                escape(&segment.text)
            } else {
                tagged_span(Tag::Substituted, &segment.text, config)
            }
        })
        .collect()
}

/// Reference words colored letter by letter from per-word `0`/`1` status strings.
///
/// `status` holds one whitespace-separated status string per word. A `1` marks
/// the letter correct; a `0` or a missing status character marks it wrong.
/// Words past the last status string are emitted unstyled.
pub fn render_letter_status(reference: &str, status: &str, config: &RenderConfig) -> String {
    let statuses: Vec<Vec<char>> = status.split_whitespace().map(|s| s.chars().collect()).collect();

    reference
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| match statuses.get(index) {
            None => escape(word),
            Some(flags) => word
                .chars()
                .enumerate()
                .map(|(j, letter)| {
                    let tag = if flags.get(j) == Some(&'1') {
                        Tag::Correct
                    } else {
                        Tag::Substituted
                    };
                    tagged_span(tag, &letter.to_string(), config)
                })
                .collect(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
