// Transcript tokenization and positional word pairing
//
// A transcript is split on whitespace into tokens. Tokens keep their characters
// as a `Vec<char>` so every position reported by the detectors counts phonetic
// symbols, never UTF-8 bytes (IPA is almost entirely multi-byte).

use std::fmt;

/// One whitespace-delimited phonetic word and its index within the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    chars: Vec<char>,
    index: usize,
}

impl Token {
    fn new(text: String, index: usize) -> Self {
        let chars = text.chars().collect();
        Self { text, chars, index }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Sentence position of this token
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Immutable ordered token sequence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    tokens: Vec<Token>,
}

impl Transcript {
    pub fn parse(text: &str) -> Self {
        Self::normalized(text, "")
    }

    /// Tokenize after removing every character listed in `ignored`.
    ///
    /// Tokens that consist solely of ignored characters disappear, and the
    /// remaining tokens are re-indexed.
    pub fn normalized(text: &str, ignored: &str) -> Self {
        let tokens = text
            .split_whitespace()
            .map(|word| word.chars().filter(|c| !ignored.contains(*c)).collect::<String>())
            .filter(|word| !word.is_empty())
            .enumerate()
            .map(|(index, word)| Token::new(word, index))
            .collect();

        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

/// Two tokens sharing a sentence position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPair<'a> {
    pub index: usize,
    pub reference: &'a Token,
    pub recognized: &'a Token,
}

/// Pair tokens by position.
///
/// Only `min(len(a), len(b))` pairs are produced. Trailing tokens of the longer
/// transcript are left to the caller; no attempt is made to realign merged or
/// split words.
pub fn pair_tokens<'a>(reference: &'a Transcript, recognized: &'a Transcript) -> Vec<TokenPair<'a>> {
    reference
        .tokens
        .iter()
        .zip(recognized.tokens.iter())
        .enumerate()
        .map(|(index, (reference, recognized))| TokenPair {
            index,
            reference,
            recognized,
        })
        .collect()
}
