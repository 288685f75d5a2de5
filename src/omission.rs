// Omission detection: which reference characters did the speaker drop?
//
// Only attempted when the recognized token is an ordered subsequence of the
// reference token. Anything else (reordering, substitution plus deletion) is
// reported as *unaligned* rather than guessed at, so callers can tell a clean
// token apart from one the detector declined to explain.

use serde::{Deserialize, Serialize};

use crate::transcript::{Token, Transcript, pair_tokens};

/// A contiguous run of reference characters missing from a recognized token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmissionRecord {
    /// The (shorter) recognized token
    pub word: String,
    /// The reference token it was compared against
    pub correct_word: String,
    /// Insertion point in `word`'s own character coordinates
    pub position: usize,
    /// The missing run, one or more characters
    pub expected: String,
    /// Sentence position of `word`
    pub position_word: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmissionReport {
    pub records: Vec<OmissionRecord>,
    /// Token indices whose recognized token is not a subsequence of the reference
    pub unaligned: Vec<usize>,
}

/// Single forward scan with two cursors.
pub fn is_subsequence(candidate: &[char], of: &[char]) -> bool {
    let mut j = 0;
    for &c in of {
        if j < candidate.len() && c == candidate[j] {
            j += 1;
        }
    }
    j == candidate.len()
}

/// Missing runs as `(position, text)` pairs, or `None` when the gate rejects the pair.
///
/// Positions are in `recognized` coordinates and strictly ascending. A run left
/// over after `recognized` is exhausted sits at `recognized.len()`.
pub fn missing_runs(reference: &[char], recognized: &[char]) -> Option<Vec<(usize, String)>> {
    if !is_subsequence(recognized, reference) {
        return None;
    }

    let mut runs = Vec::new();
    let mut missing = String::new();
    let (mut i, mut j) = (0, 0);

    while i < reference.len() && j < recognized.len() {
        if reference[i] == recognized[j] {
            if !missing.is_empty() {
                runs.push((j, std::mem::take(&mut missing)));
            }
            i += 1;
            j += 1;
        } else {
            // hold the recognized cursor until the match resumes
            missing.push(reference[i]);
            i += 1;
        }
    }

    missing.extend(&reference[i..]);
    if !missing.is_empty() {
        runs.push((j, missing));
    }

    Some(runs)
}

/// Omission records for one token pair, `None` if the pair is not alignable.
pub fn find_missing(reference: &Token, recognized: &Token, position_word: usize) -> Option<Vec<OmissionRecord>> {
    let runs = missing_runs(reference.chars(), recognized.chars())?;

    Some(
        runs.into_iter()
            .map(|(position, expected)| OmissionRecord {
                word: recognized.text().to_string(),
                correct_word: reference.text().to_string(),
                position,
                expected,
                position_word,
            })
            .collect(),
    )
}

/// Run the omission pass over every paired token.
pub fn detect_omissions(reference: &Transcript, recognized: &Transcript) -> OmissionReport {
    let mut report = OmissionReport::default();

    for pair in pair_tokens(reference, recognized) {
        match find_missing(pair.reference, pair.recognized, pair.index) {
            Some(records) => report.records.extend(records),
            None => {
                tracing::debug!(
                    token = pair.index,
                    reference = pair.reference.text(),
                    recognized = pair.recognized.text(),
                    "not a subsequence, omission alignment skipped"
                );
                report.unaligned.push(pair.index);
            }
        }
    }

    tracing::debug!(
        omissions = report.records.len(),
        unaligned = report.unaligned.len(),
        "omission pass"
    );
    report
}
