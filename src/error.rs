use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("omission record for '{record_word}' does not match token '{token}' at index {position_word}")]
    RecordMismatch {
        record_word: String,
        token: String,
        position_word: usize,
    },
    #[error("omission record for '{record_word}' points at token {position_word}, which does not exist")]
    MissingToken {
        record_word: String,
        position_word: usize,
    },
    #[error("insertion at {position} is past the end of '{token}' (length {len})")]
    PositionOutOfRange {
        token: String,
        position: usize,
        len: usize,
    },
}

impl FeedbackError {
    pub(crate) fn record_mismatch(
        record_word: impl Into<String>,
        token: impl Into<String>,
        position_word: usize,
    ) -> Self {
        Self::RecordMismatch {
            record_word: record_word.into(),
            token: token.into(),
            position_word,
        }
    }

    pub(crate) fn missing_token(record_word: impl Into<String>, position_word: usize) -> Self {
        Self::MissingToken {
            record_word: record_word.into(),
            position_word,
        }
    }

    pub(crate) fn out_of_range(token: impl Into<String>, position: usize, len: usize) -> Self {
        Self::PositionOutOfRange {
            token: token.into(),
            position,
            len,
        }
    }
}
