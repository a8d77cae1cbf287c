//! Request handlers.
//!
//! Handlers delegate to the repositories in `folio_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod documents;
pub mod revisions;

use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::document::Document;
use folio_db::repositories::DocumentRepo;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Fetch a document by id or return 404.
pub(crate) async fn ensure_document(pool: &sqlx::PgPool, id: DbId) -> AppResult<Document> {
    DocumentRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
}

/// Parse an optional JSON body. An empty body yields `T::default()`.
pub(crate) fn parse_optional_body<T>(body: &[u8]) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}
