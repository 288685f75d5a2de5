// Splice omitted runs back into a recognized transcript.
//
// Record positions are expressed in the *original* token's coordinates. Each
// token is rebuilt by sorting its records by position and folding them into a
// character arena, shifting every later insertion by the characters already
// inserted before it.

use std::collections::BTreeMap;

use crate::error::FeedbackError;
use crate::omission::OmissionRecord;
use crate::transcript::Transcript;

/// Rebuild one token from its omission records.
///
/// `records` may arrive in any order. Every record's `position` must lie within
/// `0..=token.len()` in original coordinates.
pub fn reinsert_token(token: &str, records: &[&OmissionRecord]) -> Result<String, FeedbackError> {
    let mut ordered = records.to_vec();
    ordered.sort_by_key(|record| record.position);

    let mut arena: Vec<char> = token.chars().collect();
    let original_len = arena.len();
    let mut offset = 0;

    for record in ordered {
        if record.position > original_len {
            return Err(FeedbackError::out_of_range(token, record.position, original_len));
        }

        let at = record.position + offset;
        let inserted = arena.len();
        arena.splice(at..at, record.expected.chars());
        offset += arena.len() - inserted;
    }

    Ok(arena.into_iter().collect())
}

/// Reinsert every omission into `transcript`.
///
/// Records are grouped by `position_word`, and each record's `word` must equal
/// the token found there. Tokens without records pass through unchanged.
pub fn reinsert_omissions(transcript: &Transcript, records: &[OmissionRecord]) -> Result<String, FeedbackError> {
    let mut by_token: BTreeMap<usize, Vec<&OmissionRecord>> = BTreeMap::new();
    for record in records {
        by_token.entry(record.position_word).or_default().push(record);
    }

    let mut words = Vec::with_capacity(transcript.len());
    for token in transcript.tokens() {
        let Some(corrections) = by_token.remove(&token.index()) else {
            words.push(token.text().to_string());
            continue;
        };

        if let Some(stray) = corrections.iter().find(|record| record.word != token.text()) {
            return Err(FeedbackError::record_mismatch(&stray.word, token.text(), token.index()));
        }

        words.push(reinsert_token(token.text(), &corrections)?);
    }

    if let Some((position_word, corrections)) = by_token.into_iter().next() {
        return Err(FeedbackError::missing_token(&corrections[0].word, position_word));
    }

    tracing::debug!(records = records.len(), "omissions reinserted");
    Ok(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word: &str, position: usize, expected: &str, position_word: usize) -> OmissionRecord {
        OmissionRecord {
            word: word.to_string(),
            correct_word: String::new(),
            position,
            expected: expected.to_string(),
            position_word,
        }
    }

    #[test]
    fn test_single_insertion() {
        let r = record("riznəbəl", 3, "ə", 0);
        assert_eq!(reinsert_token("riznəbəl", &[&r]).unwrap(), "rizənəbəl");
    }

    #[test]
    fn test_offsets_accumulate_in_any_order() {
        let late = record("riznəbl", 6, "ə", 0);
        let early = record("riznəbl", 3, "ə", 0);
        assert_eq!(reinsert_token("riznəbl", &[&late, &early]).unwrap(), "rizənəbəl");
    }

    #[test]
    fn test_multi_character_runs_shift_by_characters() {
        let first = record("ri", 0, "ən", 0);
        let second = record("ri", 2, "z", 0);
        assert_eq!(reinsert_token("ri", &[&first, &second]).unwrap(), "ənriz");
    }

    #[test]
    fn test_out_of_range_position() {
        let r = record("ri", 3, "z", 0);
        assert_eq!(
            reinsert_token("ri", &[&r]),
            Err(FeedbackError::out_of_range("ri", 3, 2))
        );
    }

    #[test]
    fn test_transcript_keeps_untouched_tokens() {
        let transcript = Transcript::parse("tɑmz rɪkwɛst ɪz riznəbəl");
        let records = vec![record("riznəbəl", 3, "ə", 3)];
        assert_eq!(
            reinsert_omissions(&transcript, &records).unwrap(),
            "tɑmz rɪkwɛst ɪz rizənəbəl"
        );
    }

    #[test]
    fn test_repeated_token_uses_sentence_position() {
        let transcript = Transcript::parse("kt kt");
        let records = vec![record("kt", 1, "æ", 1)];
        assert_eq!(reinsert_omissions(&transcript, &records).unwrap(), "kt kæt");
    }

    #[test]
    fn test_record_for_wrong_token() {
        let transcript = Transcript::parse("kt dg");
        let records = vec![record("kt", 1, "æ", 1)];
        assert!(matches!(
            reinsert_omissions(&transcript, &records),
            Err(FeedbackError::RecordMismatch { position_word: 1, .. })
        ));
    }

    #[test]
    fn test_record_past_last_token() {
        let transcript = Transcript::parse("kt");
        let records = vec![record("dg", 1, "ɔ", 4)];
        assert_eq!(
            reinsert_omissions(&transcript, &records),
            Err(FeedbackError::missing_token("dg", 4))
        );
    }
}
