//! Document model and DTOs.

use folio_core::document::EditableFields;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub entity_type: String,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// Snapshot of the live editable fields.
    pub fn fields(&self) -> EditableFields {
        EditableFields::new(&self.title, &self.body, &self.excerpt)
    }
}

/// DTO for creating a new document.
#[derive(Debug, Deserialize)]
pub struct CreateDocument {
    pub entity_type: String,
    pub title: String,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    /// Recorded on the initial revision.
    pub author_id: Option<DbId>,
}

impl CreateDocument {
    pub fn fields(&self) -> EditableFields {
        EditableFields::new(
            &self.title,
            self.body.as_deref().unwrap_or_default(),
            self.excerpt.as_deref().unwrap_or_default(),
        )
    }
}

/// DTO for saving a document. Omitted fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub author_id: Option<DbId>,
}

impl UpdateDocument {
    /// Overlay the provided fields onto `current`.
    pub fn apply(&self, current: &EditableFields) -> EditableFields {
        EditableFields {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            body: self.body.clone().unwrap_or_else(|| current.body.clone()),
            excerpt: self
                .excerpt
                .clone()
                .unwrap_or_else(|| current.excerpt.clone()),
        }
    }
}
