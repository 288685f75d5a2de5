use pronounce_diff::annotation::{Tag, render_annotations};
use pronounce_diff::omission::{detect_omissions, is_subsequence, missing_runs};
use pronounce_diff::reinsert::reinsert_omissions;
use pronounce_diff::span_diff::{OpTag, opcodes};
use pronounce_diff::substitution::{char_at, recognized_errors, reference_errors};
use pronounce_diff::transcript::Transcript;
use proptest::prelude::*;

const PHONES: &[char] = &['t', 'k', 'n', 'ə', 'ɪ', 'æ', 'ʃ', 'ð'];

fn word(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PHONES), 1..max)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A reference word and a non-empty subsequence of it
fn word_with_subsequence() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec((prop::sample::select(PHONES), any::<bool>()), 1..10).prop_map(|picks| {
        let reference: String = picks.iter().map(|(c, _)| *c).collect();
        let mut kept: String = picks.iter().filter(|(_, keep)| *keep).map(|(c, _)| *c).collect();
        if kept.is_empty() {
            kept.push(picks[0].0);
        }
        (reference, kept)
    })
}

fn expected_mismatches(ground: &str, other: &str) -> usize {
    let ground: Vec<char> = ground.chars().collect();
    let other: Vec<char> = other.chars().collect();
    (0..ground.len())
        .filter(|&j| char_at(&other, j, true) != Some(ground[j]))
        .count()
}

// ── Omission round-trip ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn reinserting_omissions_restores_reference((reference, recognized) in word_with_subsequence()) {
        let ref_t = Transcript::parse(&reference);
        let rec_t = Transcript::parse(&recognized);
        let report = detect_omissions(&ref_t, &rec_t);
        prop_assert!(report.unaligned.is_empty());
        prop_assert_eq!(reinsert_omissions(&rec_t, &report.records).unwrap(), reference);
    }

    #[test]
    fn omission_positions_ascend_within_token((reference, recognized) in word_with_subsequence()) {
        let ref_chars: Vec<char> = reference.chars().collect();
        let rec_chars: Vec<char> = recognized.chars().collect();
        let runs = missing_runs(&ref_chars, &rec_chars).unwrap();
        for pair in runs.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0);
        }
        for (position, text) in &runs {
            prop_assert!(*position <= rec_chars.len());
            prop_assert!(!text.is_empty());
        }
    }
}

// ── Omission gate ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn non_subsequences_yield_no_omissions(reference in word(8), recognized in word(8)) {
        let ref_chars: Vec<char> = reference.chars().collect();
        let rec_chars: Vec<char> = recognized.chars().collect();
        prop_assume!(!is_subsequence(&rec_chars, &ref_chars));

        let report = detect_omissions(&Transcript::parse(&reference), &Transcript::parse(&recognized));
        prop_assert!(report.records.is_empty());
        prop_assert_eq!(report.unaligned, vec![0]);
    }
}

// ── Substitution coverage ────────────────────────────────────────────────

proptest! {
    #[test]
    fn substitution_count_matches_hold_last_policy(reference in word(8), recognized in word(8)) {
        let ref_t = Transcript::parse(&reference);
        let rec_t = Transcript::parse(&recognized);

        let forward = reference_errors(&ref_t, &rec_t);
        prop_assert_eq!(forward.error_count, expected_mismatches(&reference, &recognized));
        prop_assert_eq!(forward.records.len(), forward.error_count);
        prop_assert!(forward.records.iter().all(|r| r.position < reference.chars().count()));

        let backward = recognized_errors(&ref_t, &rec_t);
        prop_assert_eq!(backward.error_count, expected_mismatches(&recognized, &reference));

        // stable under re-invocation
        prop_assert_eq!(reference_errors(&ref_t, &rec_t), forward);
    }
}

// ── Renderer alignment and priority ──────────────────────────────────────

proptest! {
    #[test]
    fn rendered_rows_have_equal_slots(reference in word(8), recognized in word(8)) {
        let ref_t = Transcript::parse(&reference);
        let rec_t = Transcript::parse(&recognized);
        let subs = recognized_errors(&ref_t, &rec_t);
        let omissions = detect_omissions(&ref_t, &rec_t);

        let rendered = render_annotations(&rec_t, &subs.records, &omissions.records);
        for token in &rendered.tokens {
            prop_assert_eq!(token.actual_slots().len(), token.expected_slots().len());
        }
    }

    #[test]
    fn omission_wins_over_substitution((reference, recognized) in word_with_subsequence()) {
        let ref_t = Transcript::parse(&reference);
        let rec_t = Transcript::parse(&recognized);
        let subs = recognized_errors(&ref_t, &rec_t);
        let omissions = detect_omissions(&ref_t, &rec_t);

        let rendered = render_annotations(&rec_t, &subs.records, &omissions.records);
        let slots = &rendered.tokens[0].slots;
        let len = rec_t.tokens()[0].len();

        // walk slots back to original character indices
        let mut index = 0;
        let mut i = 0;
        while i < slots.len() && index <= len {
            let at_omission = omissions.records.iter().any(|o| o.position == index);
            let at_substitution = subs.records.iter().any(|s| s.position == index);
            if at_omission {
                prop_assert_eq!(slots[i].actual.tag, Tag::Omitted);
                i += 1;
                if at_substitution {
                    // original character at this index is suppressed entirely
                    index += 1;
                    continue;
                }
                if index < len {
                    prop_assert_eq!(slots[i].actual.tag, Tag::Correct);
                    i += 1;
                }
            } else if index < len {
                prop_assert_ne!(slots[i].actual.tag, Tag::Omitted);
                i += 1;
            }
            index += 1;
        }
    }
}

// ── Span differ ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn opcodes_cover_both_strings(a in "[abəɪ ]{0,12}", b in "[abəɪ ]{0,12}") {
        let ops = opcodes(&a, &b);
        let (mut i, mut j) = (0, 0);
        for op in &ops {
            prop_assert_eq!(op.a_start, i);
            prop_assert_eq!(op.b_start, j);
            i = op.a_end;
            j = op.b_end;
        }
        prop_assert_eq!(i, a.chars().count());
        prop_assert_eq!(j, b.chars().count());
    }

    #[test]
    fn equal_opcodes_span_identical_text(a in "[abəɪ]{0,12}", b in "[abəɪ]{0,12}") {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        for op in opcodes(&a, &b).into_iter().filter(|op| op.tag == OpTag::Equal) {
            prop_assert_eq!(&a_chars[op.a_start..op.a_end], &b_chars[op.b_start..op.b_end]);
        }
    }
}
