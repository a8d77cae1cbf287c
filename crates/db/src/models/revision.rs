//! Revision model and comparison/restore DTOs.
//!
//! Revisions are immutable snapshots of a document's editable fields, created
//! on every save and removed only by retention pruning or document deletion.

use folio_core::compare::FieldDiff;
use folio_core::document::EditableFields;
use folio_core::revision::TargetSummary;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::document::Document;

/// A row from the `revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub document_id: DbId,
    pub revision_number: i32,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl Revision {
    pub fn fields(&self) -> EditableFields {
        EditableFields::new(&self.title, &self.body, &self.excerpt)
    }

    pub fn summary(&self) -> TargetSummary {
        TargetSummary::Stored {
            revision_id: self.id,
            revision_number: self.revision_number,
        }
    }
}

/// Query params for comparing two sides of a document's history.
///
/// Both are revision ids; `0` means the live document. A missing `left`
/// defaults to the oldest retained revision, a missing `right` to live.
#[derive(Debug, Default, Deserialize)]
pub struct CompareParams {
    pub left: Option<DbId>,
    pub right: Option<DbId>,
}

/// Response for a comparison.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub document_id: DbId,
    pub left: TargetSummary,
    pub right: TargetSummary,
    pub fields: Vec<FieldDiff>,
}

/// Optional request body for snapshot and restore requests.
#[derive(Debug, Default, Deserialize)]
pub struct RevisionRequest {
    pub author_id: Option<DbId>,
}

/// Result of a restore.
#[derive(Debug, Serialize)]
pub struct RestoreOutcome {
    /// The document after its fields were overwritten.
    pub document: Document,
    /// Snapshot of the pre-restore state. `None` only when history is disabled.
    pub snapshot: Option<Revision>,
    /// The revision that was restored (unchanged).
    pub restored_from: Revision,
}
