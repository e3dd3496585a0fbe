//! Word Tokenizer
//!
//! Fast, simple tokenization for case checking. Splits on whitespace and
//! keeps punctuation attached to tokens; hyphenated compounds stay a
//! single token ("Multi-Cloud" is one unit, not two).

use crate::terms::registry::token_core;

/// A whitespace-delimited token with its 0-based position in the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub text: String,
    pub position: usize,
}

impl WordToken {
    /// The token with attached punctuation trimmed from both ends.
    /// Internal hyphens and slashes are preserved.
    pub fn core(&self) -> &str {
        token_core(&self.text)
    }

    /// Whether the token contains anything a case rule can apply to.
    pub fn has_alphabetic(&self) -> bool {
        self.core().chars().any(|c| c.is_alphabetic())
    }

    /// Whether the token ends a sentence, per the given terminator set.
    pub fn ends_sentence(&self, terminators: &[char]) -> bool {
        self.text
            .trim_end()
            .chars()
            .next_back()
            .is_some_and(|c| terminators.contains(&c))
    }
}

/// Tokenize a line of text into positioned word tokens.
pub fn tokenize(text: &str) -> Vec<WordToken> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, word)| WordToken {
            text: word.to_string(),
            position,
        })
        .collect()
}
