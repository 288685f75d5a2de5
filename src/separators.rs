// Carry pause markers from an original sentence over to its phonetic form.
//
// The phonetic transcript has one word per original word but lost the pause
// markers. Markers are put back by walking the original tokens in order and
// substituting each word with the next phonetic word.

enum Piece<'a> {
    Word(&'a str),
    Marker,
}

/// Whitespace tokens with every marker occurrence split into its own piece
fn pieces<'a>(text: &'a str, marker: &str) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();

    for chunk in text.split_whitespace() {
        let mut rest = chunk;
        while let Some(at) = rest.find(marker) {
            if at > 0 {
                pieces.push(Piece::Word(&rest[..at]));
            }
            pieces.push(Piece::Marker);
            rest = &rest[at + marker.len()..];
        }
        if !rest.is_empty() {
            pieces.push(Piece::Word(rest));
        }
    }

    pieces
}

/// Reinsert `marker` into `matched` at the positions it holds in `original`.
///
/// Original words left over once `matched` runs out are dropped, and so are
/// matched words beyond the original's word count. An empty `marker` returns
/// `matched` re-joined with single spaces.
pub fn reinsert_separators(original: &str, matched: &str, marker: &str) -> String {
    if marker.is_empty() {
        return matched.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let mut words = pieces(matched, marker).into_iter().filter_map(|piece| match piece {
        Piece::Word(word) => Some(word),
        Piece::Marker => None,
    });

    let mut result = Vec::new();
    for piece in pieces(original, marker) {
        match piece {
            Piece::Marker => result.push(marker),
            Piece::Word(_) => {
                if let Some(word) = words.next() {
                    result.push(word);
                }
            }
        }
    }

    result.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinserts_dashes() {
        assert_eq!(
            reinsert_separators("Not - on my friends last -", "nɑt  ɔn maɪ frɛndz læst", "-"),
            "nɑt - ɔn maɪ frɛndz læst -"
        );
    }

    #[test]
    fn test_attached_marker_is_split() {
        assert_eq!(reinsert_separators("wait- now", "weɪt naʊ", "-"), "weɪt - naʊ");
    }

    #[test]
    fn test_leading_marker() {
        assert_eq!(reinsert_separators("- hi", "haɪ", "-"), "- haɪ");
    }

    #[test]
    fn test_short_matched_drops_words_keeps_markers() {
        assert_eq!(reinsert_separators("a - b c -", "eɪ", "-"), "eɪ - -");
    }

    #[test]
    fn test_multi_character_marker() {
        assert_eq!(
            reinsert_separators("one <p> two", "wʌn tu", "<p>"),
            "wʌn <p> tu"
        );
    }

    #[test]
    fn test_markers_in_matched_are_ignored() {
        assert_eq!(reinsert_separators("a - b", "eɪ - bi", "-"), "eɪ - bi");
    }
}
