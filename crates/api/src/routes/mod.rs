pub mod documents;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /documents                                       list, create
/// /documents/{id}                                  get, update, delete
/// /documents/{id}/revisions                        list, snapshot
/// /documents/{id}/revisions/{revision_id}          get
/// /documents/{id}/revisions/{revision_id}/restore  restore
/// /documents/{id}/compare                          field diffs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/documents", documents::router())
}
