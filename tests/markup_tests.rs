// Tests for the display collaborators: markup <-> run conversion and
// pause marker preservation

use pronounce_diff::annotation::render_annotations;
use pronounce_diff::config::RenderConfig;
use pronounce_diff::html;
use pronounce_diff::markup::{MarkupRun, normalize_color_styles, parse_highlighted, to_json};
use pronounce_diff::omission::detect_omissions;
use pronounce_diff::separators::reinsert_separators;
use pronounce_diff::substitution::recognized_errors;
use pronounce_diff::transcript::Transcript;

#[test]
fn test_parse_groups_spans_and_plain_text() {
    let markup = concat!(
        r#"<span class="highlight-green">k</span>"#,
        r#"<span class="highlight-green">æ</span>"#,
        r#"<span class="highlight-red">d</span>"#,
        " ɪz  ",
        r#"<span class="highlight-yellow">ə</span>"#
    );

    assert_eq!(
        parse_highlighted(markup),
        vec![
            MarkupRun::new("kæ", "highlight-green"),
            MarkupRun::new("d", "highlight-red"),
            MarkupRun::normal(" ɪz  "),
            MarkupRun::new("ə", "highlight-yellow"),
        ]
    );
}

#[test]
fn test_rendered_html_parses_back_to_runs() {
    let reference = Transcript::parse("bæd rizənəbəl");
    let recognized = Transcript::parse("bæt riznəbəl");
    let subs = recognized_errors(&reference, &recognized);
    let omissions = detect_omissions(&reference, &recognized);

    let rendered = render_annotations(&recognized, &subs.records, &omissions.records);
    let markup = html::render_highlighted(&rendered, &RenderConfig::default());

    assert_eq!(parse_highlighted(&markup), rendered.runs());
}

#[test]
fn test_escaped_text_parses_back_to_runs() {
    let rendered = render_annotations(&Transcript::parse("a&b"), &[], &[]);
    let markup = html::render_highlighted(&rendered, &RenderConfig::default());
    assert!(markup.contains("&amp;"));
    assert_eq!(parse_highlighted(&markup), rendered.runs());
}

#[test]
fn test_ascii_stress_marks_survive_markup() {
    let reference = Transcript::parse("\"kæt ˈdɔg");
    let recognized = Transcript::parse("'kæt 'dɔg");
    let subs = recognized_errors(&reference, &recognized);
    let rendered = render_annotations(&recognized, &subs.records, &[]);
    let markup = html::render_highlighted(&rendered, &RenderConfig::default());

    let runs = parse_highlighted(&markup);
    assert_eq!(runs, rendered.runs());
    assert_eq!(runs[0], MarkupRun::new("'", "highlight-red"));
}

#[test]
fn test_inline_styles_normalize_to_classes() {
    let reference = Transcript::parse("bæd");
    let recognized = Transcript::parse("bæt");
    let subs = recognized_errors(&reference, &recognized);
    let rendered = render_annotations(&recognized, &subs.records, &[]);

    let inline = RenderConfig {
        inline_styles: true,
        ..RenderConfig::default()
    };
    let styled = html::render_highlighted(&rendered, &inline);
    let classed = html::render_highlighted(&rendered, &RenderConfig::default());

    assert_eq!(normalize_color_styles(&styled), classed);
}

#[test]
fn test_json_document_shape() {
    let runs = vec![MarkupRun::new("ðə", "highlight-green"), MarkupRun::normal(" ")];
    let json = to_json(&runs, "words").unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["words"][0]["text"], "ðə");
    assert_eq!(value["words"][0]["type"], "highlight-green");
    assert_eq!(value["words"][1]["type"], "normal");
    assert!(json.contains("ðə"), "non-ASCII text must not be escaped");
}

#[test]
fn test_separators_round_trip_with_compare_input() {
    let restored = reinsert_separators("Not - on my friends last -", "nɑt ɔn maɪ frɛndz læst", "-");
    assert_eq!(restored, "nɑt - ɔn maɪ frɛndz læst -");

    // markers survive as their own tokens in the transcript
    let transcript = Transcript::parse(&restored);
    assert_eq!(transcript.tokens()[1].text(), "-");
}
