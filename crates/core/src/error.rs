use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Revision history is disabled for this entity type, or its storage is absent.
    #[error("Feature unavailable: {0}")]
    FeatureUnavailable(String),

    /// A diff input exceeded the configured token ceiling.
    #[error("Input too large: {tokens} tokens exceeds the limit of {limit}")]
    InputTooLarge { tokens: usize, limit: usize },
}
