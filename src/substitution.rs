// Character-level substitution detection over positionally paired tokens.
//
// The detector walks the *ground* token of each pair and compares every
// character against the same index of the other token. When the other token is
// shorter, its last character is held and compared against the remaining
// positions. Nothing is reported past the ground token's own length.

use serde::{Deserialize, Serialize};

use crate::transcript::{Token, Transcript, pair_tokens};

/// One mismatching character position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRecord {
    /// Token (from the ground-truth side) in which the mismatch occurs
    pub word: String,
    /// Character offset within `word`
    pub position: usize,
    /// Character the other token has at this position
    pub expected: char,
    /// Character `word` has at this position
    pub actual: char,
    /// Sentence position of `word`
    pub position_word: usize,
    /// The token `word` was compared against
    pub paired_word: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionReport {
    pub records: Vec<SubstitutionRecord>,
    pub error_count: usize,
}

/// Bounded character accessor.
///
/// Returns `word[j]` when in range. Past the end it returns the last character
/// if `clamp_to_last` is set, otherwise `None`. An empty word always yields `None`.
pub fn char_at(word: &[char], j: usize, clamp_to_last: bool) -> Option<char> {
    match word.get(j) {
        Some(c) => Some(*c),
        None if clamp_to_last => word.last().copied(),
        None => None,
    }
}

/// Compare a single token pair, reporting positions of `ground`.
pub fn compare_tokens(ground: &Token, other: &Token, position_word: usize) -> Vec<SubstitutionRecord> {
    let mut records = Vec::new();

    // max(len) iterations, but positions past the ground token are never reported
    for (position, &actual) in ground.chars().iter().enumerate() {
        let Some(expected) = char_at(other.chars(), position, true) else {
            break;
        };

        if expected != actual {
            records.push(SubstitutionRecord {
                word: ground.text().to_string(),
                position,
                expected,
                actual,
                position_word,
                paired_word: other.text().to_string(),
            });
        }
    }

    records
}

fn summarize(pairs: impl Iterator<Item = (usize, Vec<SubstitutionRecord>)>) -> SubstitutionReport {
    let mut report = SubstitutionReport::default();
    for (index, records) in pairs {
        if !records.is_empty() {
            tracing::trace!(token = index, mismatches = records.len(), "substitutions");
        }
        report.records.extend(records);
    }
    report.error_count = report.records.len();
    report
}

/// Substitutions with the canonical reference as ground truth.
///
/// Records point into reference tokens; `expected` holds the recognized character.
pub fn reference_errors(reference: &Transcript, recognized: &Transcript) -> SubstitutionReport {
    let report = summarize(
        pair_tokens(reference, recognized)
            .into_iter()
            .map(|pair| (pair.index, compare_tokens(pair.reference, pair.recognized, pair.index))),
    );
    tracing::debug!(errors = report.error_count, "reference substitution pass");
    report
}

/// Substitutions with the recognized transcript as ground truth.
///
/// Records point into recognized tokens; `expected` holds the reference character.
pub fn recognized_errors(reference: &Transcript, recognized: &Transcript) -> SubstitutionReport {
    let report = summarize(
        pair_tokens(reference, recognized)
            .into_iter()
            .map(|pair| (pair.index, compare_tokens(pair.recognized, pair.reference, pair.index))),
    );
    tracing::debug!(errors = report.error_count, "recognized substitution pass");
    report
}
