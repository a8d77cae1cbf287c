//! Document field types and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entity type constants
// ---------------------------------------------------------------------------

pub const ENTITY_TYPE_POST: &str = "post";
pub const ENTITY_TYPE_PAGE: &str = "page";
pub const ENTITY_TYPE_ARTICLE: &str = "article";

/// All entity types that carry revision history.
pub const VALID_ENTITY_TYPES: &[&str] =
    &[ENTITY_TYPE_POST, ENTITY_TYPE_PAGE, ENTITY_TYPE_ARTICLE];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 100_000;
pub const MAX_EXCERPT_LENGTH: usize = 1_000;

// ---------------------------------------------------------------------------
// Editable fields
// ---------------------------------------------------------------------------

/// The versioned fields of a document, shared by live rows and revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableFields {
    pub title: String,
    pub body: String,
    pub excerpt: String,
}

impl EditableFields {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        excerpt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            excerpt: excerpt.into(),
        }
    }

    /// Validate every field against its length limits.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_body(&self.body)?;
        validate_excerpt(&self.excerpt)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an entity type against the known set.
pub fn validate_entity_type(entity_type: &str) -> Result<(), CoreError> {
    if !VALID_ENTITY_TYPES.contains(&entity_type) {
        return Err(CoreError::Validation(format!(
            "Invalid entity type '{}'. Valid types: {}",
            entity_type,
            VALID_ENTITY_TYPES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a document title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate document body length.
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Body must be at most {MAX_BODY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate excerpt length.
pub fn validate_excerpt(excerpt: &str) -> Result<(), CoreError> {
    if excerpt.chars().count() > MAX_EXCERPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Excerpt must be at most {MAX_EXCERPT_LENGTH} characters"
        )));
    }
    Ok(())
}
