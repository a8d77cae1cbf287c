//! Word-level text diffing.
//!
//! The pipeline is tokenize -> LCS table -> backtrack -> align/coalesce:
//!
//! ```text
//! compute_word_diff("The quick fox", "The quick brown fox", limit)
//!   => [Equal("The quick "), Insert("brown "), Equal("fox")]
//! ```
//!
//! Every stage is a pure function over owned or borrowed values, so diffs can
//! be computed concurrently without coordination.

pub mod builder;
pub mod lcs;
pub mod render;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use render::{escape_html, render_html, ADDED_CLASS, REMOVED_CLASS};
pub use tokenizer::{tokenize, Token};

/// Default ceiling on the combined token count of the differing middle of
/// both inputs, after the shared prefix and suffix are set aside.
///
/// The LCS table has `(m + 1) * (n + 1)` cells, which peaks when the middle is
/// split evenly: 8 000 tokens allocate at most 4 001² ≈ 16M cells (64 MiB).
pub const DEFAULT_MAX_DIFF_TOKENS: usize = 8_000;

/// The kind of a [`DiffOp`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOpKind {
    Equal,
    Insert,
    Delete,
}

impl DiffOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for DiffOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diff operation carrying the text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "text", rename_all = "snake_case")]
pub enum DiffOp {
    /// Text present on both sides.
    Equal(String),
    /// Text present only on the new side.
    Insert(String),
    /// Text present only on the old side.
    Delete(String),
}

impl DiffOp {
    pub fn kind(&self) -> DiffOpKind {
        match self {
            Self::Equal(_) => DiffOpKind::Equal,
            Self::Insert(_) => DiffOpKind::Insert,
            Self::Delete(_) => DiffOpKind::Delete,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Equal(t) | Self::Insert(t) | Self::Delete(t) => t,
        }
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        match self {
            Self::Equal(t) | Self::Insert(t) | Self::Delete(t) => t,
        }
    }
}

/// Ordered, coalesced diff covering the whole comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffResult {
    ops: Vec<DiffOp>,
}

impl DiffResult {
    pub fn new(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// `true` when the result contains no inserts or deletes.
    pub fn is_unchanged(&self) -> bool {
        self.ops.iter().all(|op| matches!(op, DiffOp::Equal(_)))
    }

    /// Reassemble the old text from `Equal` and `Delete` spans.
    pub fn old_text(&self) -> String {
        self.collect_text(|op| !matches!(op, DiffOp::Insert(_)))
    }

    /// Reassemble the new text from `Equal` and `Insert` spans.
    pub fn new_text(&self) -> String {
        self.collect_text(|op| !matches!(op, DiffOp::Delete(_)))
    }

    fn collect_text(&self, keep: impl Fn(&DiffOp) -> bool) -> String {
        self.ops
            .iter()
            .filter(|op| keep(op))
            .map(DiffOp::text)
            .collect()
    }
}

/// Reject token runs whose combined length exceeds `max_tokens`.
pub fn check_token_limit(
    old: &[Token<'_>],
    new: &[Token<'_>],
    max_tokens: usize,
) -> Result<(), CoreError> {
    let tokens = old.len() + new.len();
    if tokens > max_tokens {
        return Err(CoreError::InputTooLarge {
            tokens,
            limit: max_tokens,
        });
    }
    Ok(())
}

/// Compute a coalesced word-level diff between `old` and `new`.
///
/// Tokens shared at the start and end of both inputs are emitted as `Equal`
/// without entering the LCS table, so only the differing middle counts toward
/// `max_tokens`. Fails with [`CoreError::InputTooLarge`] before the table is
/// allocated when that middle is too long.
pub fn compute_word_diff(
    old: &str,
    new: &str,
    max_tokens: usize,
) -> Result<DiffResult, CoreError> {
    let a = tokenize(old);
    let b = tokenize(new);

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];
    check_token_limit(a_mid, b_mid, max_tokens)?;

    let equal = |tokens: &[Token<'_>]| {
        tokens
            .iter()
            .map(|t| DiffOp::Equal(t.as_str().to_string()))
            .collect::<Vec<_>>()
    };

    let mut ops = equal(&a[..prefix]);
    if !a_mid.is_empty() || !b_mid.is_empty() {
        let table = lcs::LcsTable::build(a_mid, b_mid);
        ops.extend(builder::build_ops(a_mid, b_mid, &table));
    }
    ops.extend(equal(&a[a.len() - suffix..]));

    render::align_to_word_starts(&mut ops);
    Ok(render::coalesce(ops))
}
