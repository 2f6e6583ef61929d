use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Router};

#[utoipa::path(get, path = "/api/health", responses((status = 200, description = "Process is up")))]
pub async fn health() -> &'static str {
    "ok"
}

/// Ready once the database answers a read.
#[utoipa::path(
    get,
    path = "/api/readyz",
    responses((status = 200, description = "Ready"), (status = 500, description = "Database unavailable"))
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.reserve_service.get_totals()?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/readyz", get(readyz))
}
