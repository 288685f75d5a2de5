// Conversion between highlight markup and a normalized run list.
//
// A display layer gets either the HTML produced by [`crate::html`] or a list
// of `{text, type}` runs, where adjacent runs of the same type are merged and
// text outside any highlight span is typed `normal`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{classes, markers};

/// Highlight span emitted by the class-based renderer.
static HIGHLIGHT_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="(highlight-.*?)">(.*?)</span>"#).expect("static highlight pattern")
});

/// Inline color span emitted when class-based styling is turned off.
static COLOR_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span style="color:\s*(green|red|yellow);">"#).expect("static color pattern")
});

/// Entities produced by [`crate::html::escape`], plus the blank placeholder.
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(amp|lt|gt|quot|#x27|nbsp);").expect("static entity pattern"));

/// Words and the whitespace between them, both kept.
static WORD_OR_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+|\S+").expect("static word pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupRun {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MarkupRun {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, classes::NORMAL)
    }
}

/// Merge adjacent runs of the same type. Empty runs are dropped.
pub fn merge_runs(runs: impl IntoIterator<Item = MarkupRun>) -> Vec<MarkupRun> {
    let mut merged: Vec<MarkupRun> = Vec::new();

    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.kind == run.kind => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }

    merged
}

/// Single pass, so `&amp;lt;` decodes to `&lt;` and not `<`.
fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| match &caps[1] {
            "amp" => "&".to_string(),
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "quot" => "\"".to_string(),
            "#x27" => "'".to_string(),
            _ => markers::TEXT_BLANK.to_string(),
        })
        .into_owned()
}

fn push_plain(runs: &mut Vec<MarkupRun>, text: &str) {
    let text = decode_entities(text);
    runs.extend(WORD_OR_SPACE_RE.find_iter(&text).map(|m| MarkupRun::normal(m.as_str())));
}

/// Parse class-based highlight markup into merged runs.
///
/// Escaped text is decoded, so runs carry the characters the renderer was given.
pub fn parse_highlighted(markup: &str) -> Vec<MarkupRun> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for caps in HIGHLIGHT_SPAN_RE.captures_iter(markup) {
        let (Some(whole), Some(kind), Some(text)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        push_plain(&mut runs, &markup[cursor..whole.start()]);
        runs.push(MarkupRun::new(decode_entities(text.as_str()), kind.as_str()));
        cursor = whole.end();
    }
    push_plain(&mut runs, &markup[cursor..]);

    merge_runs(runs)
}

/// Serialize runs as `{"<key>": [...]}`, pretty-printed with non-ASCII kept as is.
pub fn to_json(runs: &[MarkupRun], key: &str) -> serde_json::Result<String> {
    let mut document = serde_json::Map::new();
    document.insert(key.to_string(), serde_json::to_value(runs)?);
    serde_json::to_string_pretty(&serde_json::Value::Object(document))
}

/// Rewrite `<span style="color: X;">` as `<span class="highlight-X">`.
pub fn normalize_color_styles(markup: &str) -> String {
    COLOR_STYLE_RE
        .replace_all(markup, r#"<span class="highlight-$1">"#)
        .into_owned()
}
