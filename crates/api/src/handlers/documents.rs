//! Handlers for the `/documents` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use folio_core::document::{
    validate_body, validate_entity_type, validate_excerpt, validate_title,
};
use folio_core::error::CoreError;
use folio_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use folio_core::types::DbId;
use folio_db::models::document::{CreateDocument, UpdateDocument};
use folio_db::repositories::DocumentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_document;
use crate::query::ListDocumentsParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/documents
///
/// List documents, optionally filtered by entity type.
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListDocumentsParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref entity_type) = params.entity_type {
        validate_entity_type(entity_type)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let documents =
        DocumentRepo::list(&state.pool, params.entity_type.as_deref(), limit, offset).await?;

    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/v1/documents
///
/// Create a document. Its initial state becomes revision #1 unless history is
/// disabled for the entity type.
pub async fn create_document(
    State(state): State<AppState>,
    Json(input): Json<CreateDocument>,
) -> AppResult<impl IntoResponse> {
    validate_entity_type(&input.entity_type)?;
    input.fields().validate()?;

    let retention = state.config.retention.limit_for(&input.entity_type);
    let document = DocumentRepo::create(&state.pool, &input, retention).await?;

    tracing::info!(
        document_id = document.id,
        entity_type = %document.entity_type,
        "Document created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /api/v1/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = ensure_document(&state.pool, id).await?;
    Ok(Json(DataResponse { data: document }))
}

/// PUT /api/v1/documents/{id}
///
/// Save the provided fields. Every save records a revision of the saved
/// state in the same transaction.
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref body) = input.body {
        validate_body(body)?;
    }
    if let Some(ref excerpt) = input.excerpt {
        validate_excerpt(excerpt)?;
    }

    let existing = ensure_document(&state.pool, id).await?;
    let retention = state.config.retention.limit_for(&existing.entity_type);

    let document = DocumentRepo::update(&state.pool, id, &input, retention)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    tracing::info!(document_id = id, retention, "Document saved");

    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/documents/{id}
///
/// Delete a document together with its revision history.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DocumentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }));
    }

    tracing::info!(document_id = id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}
