//! `GET /health`: database reachability, revision storage, and the diff and
//! retention settings the server is running with.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` (no revision storage) or `unavailable` (no database).
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub revision_storage: bool,
    pub diff_max_tokens: usize,
    pub default_retention: i32,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = folio_db::health_check(&state.pool).await.is_ok();
    let revision_storage = database
        && folio_db::revision_storage_present(&state.pool)
            .await
            .unwrap_or(false);

    let (code, status) = match (database, revision_storage) {
        (true, true) => (StatusCode::OK, "ok"),
        (true, false) => (StatusCode::OK, "degraded"),
        (false, _) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
    };
    if !revision_storage {
        tracing::warn!(database, revision_storage, "Health check failing");
    }

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        revision_storage,
        diff_max_tokens: state.config.diff_max_tokens,
        default_retention: state.config.retention.default_limit.max(0),
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
