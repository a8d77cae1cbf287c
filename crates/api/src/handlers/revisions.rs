//! Handlers for document revision history: listing, snapshots, comparison,
//! and restore.
//!
//! When history is disabled for a document's entity type (retention `0`),
//! every handler here answers `303 See Other` pointing back at the document
//! instead of failing.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use folio_core::compare::compare_fields;
use folio_core::document::EditableFields;
use folio_core::error::CoreError;
use folio_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use folio_core::revision::{RevisionTarget, TargetSummary};
use folio_core::types::DbId;
use folio_db::models::document::Document;
use folio_db::models::revision::{CompareParams, CompareResponse, Revision, RevisionRequest};
use folio_db::repositories::{DocumentRepo, RevisionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_document, parse_optional_body};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Retention for the document's entity type.
///
/// `FeatureUnavailable` degrades to a redirect to the document itself.
fn history_retention(state: &AppState, document: &Document) -> Result<usize, Response> {
    state
        .config
        .retention
        .require_history(&document.entity_type)
        .map_err(|err| {
            tracing::debug!(
                document_id = document.id,
                error = %err,
                "Revision history unavailable, redirecting"
            );
            Redirect::to(&format!("/api/v1/documents/{}", document.id)).into_response()
        })
}

/// Fetch a revision that belongs to `document_id` or return 404.
///
/// A revision owned by another document is reported exactly like a missing one.
async fn ensure_revision(
    pool: &sqlx::PgPool,
    document_id: DbId,
    revision_id: DbId,
) -> AppResult<Revision> {
    RevisionRepo::find_for_document(pool, revision_id, document_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Revision",
            id: revision_id,
        }))
}

/// Resolve one side of a comparison to its summary and field values.
async fn resolve_target(
    pool: &sqlx::PgPool,
    document: &Document,
    target: RevisionTarget,
) -> AppResult<(TargetSummary, EditableFields)> {
    match target {
        RevisionTarget::Live => Ok((TargetSummary::Live, document.fields())),
        RevisionTarget::Stored(revision_id) => {
            let revision = ensure_revision(pool, document.id, revision_id).await?;
            Ok((revision.summary(), revision.fields()))
        }
    }
}

/* --------------------------------------------------------------------------
History
-------------------------------------------------------------------------- */

/// GET /api/v1/documents/{id}/revisions
///
/// List retained revisions, newest first. Accepts `?limit=&offset=`.
pub async fn list_revisions(
    State(state): State<AppState>,
    Path(document_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Response> {
    let document = ensure_document(&state.pool, document_id).await?;
    if let Err(redirect) = history_retention(&state, &document) {
        return Ok(redirect);
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let revisions =
        RevisionRepo::list_by_document(&state.pool, document_id, limit, offset).await?;

    Ok(Json(DataResponse { data: revisions }).into_response())
}

/// GET /api/v1/documents/{id}/revisions/{revision_id}
pub async fn get_revision(
    State(state): State<AppState>,
    Path((document_id, revision_id)): Path<(DbId, DbId)>,
) -> AppResult<Response> {
    let document = ensure_document(&state.pool, document_id).await?;
    if let Err(redirect) = history_retention(&state, &document) {
        return Ok(redirect);
    }

    let revision = ensure_revision(&state.pool, document_id, revision_id).await?;
    Ok(Json(DataResponse { data: revision }).into_response())
}

/// POST /api/v1/documents/{id}/revisions
///
/// Record the live state as a new revision without changing the document.
/// Body `{ "author_id": … }` is optional.
pub async fn create_snapshot(
    State(state): State<AppState>,
    Path(document_id): Path<DbId>,
    body: Bytes,
) -> AppResult<Response> {
    let request: RevisionRequest = parse_optional_body(&body)?;
    let document = ensure_document(&state.pool, document_id).await?;
    let retention = match history_retention(&state, &document) {
        Ok(retention) => retention,
        Err(redirect) => return Ok(redirect),
    };

    let revision =
        RevisionRepo::record_for_document(&state.pool, document_id, request.author_id, retention)
            .await?
            .ok_or_else(|| {
                CoreError::FeatureUnavailable(format!(
                    "Snapshot of document {document_id} recorded nothing"
                ))
            })?;

    tracing::info!(
        document_id,
        revision_id = revision.id,
        revision_number = revision.revision_number,
        "Revision snapshot recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: revision })).into_response())
}

/* --------------------------------------------------------------------------
Comparison
-------------------------------------------------------------------------- */

/// GET /api/v1/documents/{id}/compare?left=&right=
///
/// Word-level diff of title, body and excerpt between two sides. `0` means
/// the live document. Without `left` the oldest retained revision is used
/// (or live when there is none); without `right` the live document is used.
pub async fn compare_revisions(
    State(state): State<AppState>,
    Path(document_id): Path<DbId>,
    Query(params): Query<CompareParams>,
) -> AppResult<Response> {
    let document = ensure_document(&state.pool, document_id).await?;
    if let Err(redirect) = history_retention(&state, &document) {
        return Ok(redirect);
    }

    let left = match RevisionTarget::from_param(params.left) {
        Some(target) => target,
        None => RevisionRepo::find_oldest(&state.pool, document_id)
            .await?
            .map_or(RevisionTarget::Live, |oldest| RevisionTarget::Stored(oldest.id)),
    };
    let right = RevisionTarget::from_param(params.right).unwrap_or(RevisionTarget::Live);

    let (left_summary, left_fields) = resolve_target(&state.pool, &document, left).await?;
    let (right_summary, right_fields) = resolve_target(&state.pool, &document, right).await?;

    // The LCS table is O(m*n); keep it off the async workers.
    let max_tokens = state.config.diff_max_tokens;
    let fields =
        tokio::task::spawn_blocking(move || compare_fields(&left_fields, &right_fields, max_tokens))
            .await
            .map_err(|e| AppError::InternalError(format!("Diff task failed: {e}")))??;

    tracing::debug!(
        document_id,
        left = left.as_param(),
        right = right.as_param(),
        changed = fields.iter().filter(|f| f.is_changed()).count(),
        "Compared revisions"
    );

    Ok(Json(DataResponse {
        data: CompareResponse {
            document_id,
            left: left_summary,
            right: right_summary,
            fields,
        },
    })
    .into_response())
}

/* --------------------------------------------------------------------------
Restore
-------------------------------------------------------------------------- */

/// POST /api/v1/documents/{id}/revisions/{revision_id}/restore
///
/// Overwrite the live fields with a stored revision. The pre-restore state is
/// recorded first, so restoring that snapshot undoes the operation.
pub async fn restore_revision(
    State(state): State<AppState>,
    Path((document_id, revision_id)): Path<(DbId, DbId)>,
    body: Bytes,
) -> AppResult<Response> {
    let request: RevisionRequest = parse_optional_body(&body)?;
    let document = ensure_document(&state.pool, document_id).await?;
    let retention = match history_retention(&state, &document) {
        Ok(retention) => retention,
        Err(redirect) => return Ok(redirect),
    };

    let outcome = DocumentRepo::restore_revision(
        &state.pool,
        document_id,
        revision_id,
        request.author_id,
        retention,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Revision",
        id: revision_id,
    }))?;

    tracing::info!(
        document_id,
        revision_id,
        restored_number = outcome.restored_from.revision_number,
        snapshot_id = outcome.snapshot.as_ref().map(|s| s.id),
        "Revision restored"
    );

    Ok(Json(DataResponse { data: outcome }).into_response())
}
