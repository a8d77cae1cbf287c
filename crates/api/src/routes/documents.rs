//! Route definitions for documents and their revision history.
//!
//! Registered under `/documents`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{documents, revisions};
use crate::state::AppState;

/// Document routes, registered as `/documents`.
///
/// ```text
/// GET    /                                      list_documents
/// POST   /                                      create_document
/// GET    /{id}                                  get_document
/// PUT    /{id}                                  update_document
/// DELETE /{id}                                  delete_document
/// GET    /{id}/revisions                        list_revisions
/// POST   /{id}/revisions                        create_snapshot
/// GET    /{id}/revisions/{revision_id}          get_revision
/// POST   /{id}/revisions/{revision_id}/restore  restore_revision
/// GET    /{id}/compare                          compare_revisions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route(
            "/{id}/revisions",
            get(revisions::list_revisions).post(revisions::create_snapshot),
        )
        .route(
            "/{id}/revisions/{revision_id}",
            get(revisions::get_revision),
        )
        .route(
            "/{id}/revisions/{revision_id}/restore",
            post(revisions::restore_revision),
        )
        .route("/{id}/compare", get(revisions::compare_revisions))
}
