//! Field-by-field comparison of two document snapshots.

use serde::{Deserialize, Serialize};

use crate::diff::{compute_word_diff, render_html, DiffResult};
use crate::document::EditableFields;
use crate::error::CoreError;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_BODY: &str = "body";
pub const FIELD_EXCERPT: &str = "excerpt";

/// Compared fields, in response order.
pub const COMPARED_FIELDS: &[&str] = &[FIELD_TITLE, FIELD_BODY, FIELD_EXCERPT];

/// Whether a compared field differs between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Changed,
    Unchanged,
}

impl FieldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diff of one field, with both the structured ops and the rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    pub field: &'static str,
    pub status: FieldStatus,
    pub ops: DiffResult,
    pub html: String,
}

impl FieldDiff {
    fn build(
        field: &'static str,
        old: &str,
        new: &str,
        max_tokens: usize,
    ) -> Result<Self, CoreError> {
        let ops = compute_word_diff(old, new, max_tokens)?;
        let status = if ops.is_unchanged() {
            FieldStatus::Unchanged
        } else {
            FieldStatus::Changed
        };
        let html = render_html(&ops);
        Ok(Self {
            field,
            status,
            ops,
            html,
        })
    }

    pub fn is_changed(&self) -> bool {
        self.status == FieldStatus::Changed
    }
}

/// Diff title, body and excerpt of `left` (old) against `right` (new).
///
/// The token ceiling applies to each field separately; the first field over
/// the ceiling fails the whole comparison.
pub fn compare_fields(
    left: &EditableFields,
    right: &EditableFields,
    max_tokens: usize,
) -> Result<Vec<FieldDiff>, CoreError> {
    COMPARED_FIELDS
        .iter()
        .map(|&field| {
            let (old, new) = match field {
                FIELD_TITLE => (&left.title, &right.title),
                FIELD_BODY => (&left.body, &right.body),
                _ => (&left.excerpt, &right.excerpt),
            };
            FieldDiff::build(field, old, new, max_tokens)
        })
        .collect()
}
