//! Word-level tokenizer.
//!
//! Splits text into alternating runs of whitespace and non-whitespace. The
//! split is lossless: concatenating every token reproduces the input.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a maximal whitespace run or a maximal non-whitespace run.
const TOKEN_PATTERN: &str = r"\s+|\S+";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("valid regex"));

/// A single diffing unit borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Split `text` into whitespace and non-whitespace tokens.
///
/// Empty input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| Token(m.as_str()))
        .collect()
}
