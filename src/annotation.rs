// Annotation rendering of a transcript from substitution and omission records.
//
// Each token is rendered as a sequence of slots. A slot pairs what goes on the
// "actual" row with what goes on the "expected" row underneath it, so the two
// rows can never drift out of alignment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{classes, colors, markers};
use crate::markup::{MarkupRun, merge_runs};
use crate::omission::OmissionRecord;
use crate::substitution::SubstitutionRecord;
use crate::transcript::{Token, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Correct,
    Substituted,
    Omitted,
}

impl Tag {
    pub fn class(self) -> &'static str {
        match self {
            Tag::Correct => classes::CORRECT,
            Tag::Substituted => classes::SUBSTITUTED,
            Tag::Omitted => classes::OMITTED,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tag::Correct => colors::CORRECT,
            Tag::Substituted => colors::SUBSTITUTED,
            Tag::Omitted => colors::OMITTED,
        }
    }

    /// Terminal marker used by [`RenderedTranscript::tag_row`]
    pub fn marker(self) -> char {
        match self {
            Tag::Correct => '.',
            Tag::Substituted => '^',
            Tag::Omitted => '+',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCharacter {
    pub text: String,
    pub tag: Tag,
}

/// One rendered column: the displayed text and its correction, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub actual: AnnotatedCharacter,
    /// `None` renders as a blank placeholder
    pub expected: Option<String>,
}

impl Slot {
    fn correct(c: char) -> Self {
        Self {
            actual: AnnotatedCharacter {
                text: c.to_string(),
                tag: Tag::Correct,
            },
            expected: None,
        }
    }

    fn substituted(actual: char, expected: char) -> Self {
        Self {
            actual: AnnotatedCharacter {
                text: actual.to_string(),
                tag: Tag::Substituted,
            },
            expected: Some(expected.to_string()),
        }
    }

    fn omitted(run: &str) -> Self {
        Self {
            actual: AnnotatedCharacter {
                text: run.to_string(),
                tag: Tag::Omitted,
            },
            expected: Some(run.to_string()),
        }
    }

    fn width(&self) -> usize {
        self.actual.text.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedToken {
    pub slots: Vec<Slot>,
}

impl RenderedToken {
    pub fn actual_slots(&self) -> Vec<&AnnotatedCharacter> {
        self.slots.iter().map(|slot| &slot.actual).collect()
    }

    pub fn expected_slots(&self) -> Vec<Option<&str>> {
        self.slots.iter().map(|slot| slot.expected.as_deref()).collect()
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.slots.iter().any(|slot| slot.actual.tag == tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTranscript {
    pub tokens: Vec<RenderedToken>,
}

impl RenderedTranscript {
    fn row(&self, cell: impl Fn(&Slot) -> String) -> String {
        self.tokens
            .iter()
            .map(|token| token.slots.iter().map(&cell).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Displayed text, omitted runs included
    pub fn actual_row(&self) -> String {
        self.row(|slot| slot.actual.text.clone())
    }

    /// Corrections under their slots, blanks elsewhere
    pub fn expected_row(&self) -> String {
        self.row(|slot| match &slot.expected {
            Some(text) => text.clone(),
            None => markers::TEXT_BLANK.to_string().repeat(slot.width()),
        })
    }

    /// One marker per displayed character
    pub fn tag_row(&self) -> String {
        self.row(|slot| slot.actual.tag.marker().to_string().repeat(slot.width()))
    }

    /// Merged `{text, type}` runs of the actual row
    pub fn runs(&self) -> Vec<MarkupRun> {
        let mut runs = Vec::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                runs.push(MarkupRun::normal(" "));
            }
            for slot in &token.slots {
                runs.push(MarkupRun::new(&slot.actual.text, slot.actual.tag.class()));
            }
        }
        merge_runs(runs)
    }
}

#[derive(Default)]
struct TokenRecords<'a> {
    substitutions: HashMap<usize, &'a SubstitutionRecord>,
    omissions: HashMap<usize, &'a OmissionRecord>,
}

/// Index records by `(token text, sentence position)`; text alone is ambiguous
/// whenever a word repeats.
fn index_records<'a>(
    substitutions: &'a [SubstitutionRecord],
    omissions: &'a [OmissionRecord],
) -> HashMap<(&'a str, usize), TokenRecords<'a>> {
    let mut index: HashMap<(&str, usize), TokenRecords> = HashMap::new();

    for record in substitutions {
        index
            .entry((record.word.as_str(), record.position_word))
            .or_default()
            .substitutions
            .insert(record.position, record);
    }
    for record in omissions {
        index
            .entry((record.word.as_str(), record.position_word))
            .or_default()
            .omissions
            .insert(record.position, record);
    }

    index
}

fn render_token(token: &Token, records: &TokenRecords) -> RenderedToken {
    let chars = token.chars();
    let mut slots = Vec::with_capacity(chars.len() + 1);

    // one slot past the end so a trailing omission has somewhere to go
    for i in 0..=chars.len() {
        let original = chars.get(i).copied();
        let substitution = records.substitutions.get(&i);

        if let Some(omission) = records.omissions.get(&i) {
            slots.push(Slot::omitted(&omission.expected));
            // omission wins: a substitution at the same index hides the original character
            if substitution.is_some() {
                continue;
            }
            if let Some(c) = original {
                slots.push(Slot::correct(c));
            }
        } else if let Some(c) = original {
            match substitution {
                Some(record) => slots.push(Slot::substituted(record.actual, record.expected)),
                None => slots.push(Slot::correct(c)),
            }
        }
    }

    RenderedToken { slots }
}

/// Render every token of `transcript`.
///
/// Records are matched to tokens by `word` and `position_word`. Tokens without
/// records, including trailing unpaired ones, render fully correct.
pub fn render_annotations(
    transcript: &Transcript,
    substitutions: &[SubstitutionRecord],
    omissions: &[OmissionRecord],
) -> RenderedTranscript {
    let index = index_records(substitutions, omissions);
    let empty = TokenRecords::default();

    let tokens = transcript
        .tokens()
        .iter()
        .map(|token| {
            let records = index.get(&(token.text(), token.index())).unwrap_or(&empty);
            render_token(token, records)
        })
        .collect();

    RenderedTranscript { tokens }
}
