use std::sync::Arc;

use crate::{api::shared::ApiJson, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use budgetpace_core::reserves::{NewReserve, ReserveTotals, ReserveUpdate, ReserveWithProgress};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AmountRequest {
    amount: Decimal,
}

#[utoipa::path(get, path = "/api/reserves", responses((status = 200, description = "All reserves, newest first")))]
pub async fn get_reserves(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ReserveWithProgress>>> {
    let reserves = state.reserve_service.get_reserves()?;
    Ok(Json(reserves))
}

#[utoipa::path(
    post,
    path = "/api/reserves",
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid reserve"))
)]
pub async fn create_reserve(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewReserve>,
) -> ApiResult<(StatusCode, Json<ReserveWithProgress>)> {
    let created = state.reserve_service.create_reserve(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/reserves/{id}",
    params(("id" = String, Path, description = "Reserve id")),
    responses((status = 200, description = "The reserve"), (status = 404, description = "Unknown id"))
)]
pub async fn get_reserve(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReserveWithProgress>> {
    let reserve = state.reserve_service.get_reserve(&id)?;
    Ok(Json(reserve))
}

#[utoipa::path(
    put,
    path = "/api/reserves/{id}",
    params(("id" = String, Path, description = "Reserve id")),
    responses((status = 200, description = "Updated"), (status = 404, description = "Unknown id"))
)]
pub async fn update_reserve(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ReserveUpdate>,
) -> ApiResult<Json<ReserveWithProgress>> {
    let updated = state.reserve_service.update_reserve(&id, payload).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/reserves/{id}",
    params(("id" = String, Path, description = "Reserve id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Unknown id"))
)]
pub async fn delete_reserve(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.reserve_service.delete_reserve(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/reserves/{id}/allocate",
    params(("id" = String, Path, description = "Reserve id")),
    responses((status = 200, description = "Balance increased"), (status = 400, description = "Amount not positive"))
)]
pub async fn allocate(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AmountRequest>,
) -> ApiResult<Json<ReserveWithProgress>> {
    let reserve = state.reserve_service.allocate(&id, request.amount).await?;
    Ok(Json(reserve))
}

#[utoipa::path(
    post,
    path = "/api/reserves/{id}/withdraw",
    params(("id" = String, Path, description = "Reserve id")),
    responses((status = 200, description = "Balance decreased"), (status = 400, description = "Amount not positive or above balance"))
)]
pub async fn withdraw(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AmountRequest>,
) -> ApiResult<Json<ReserveWithProgress>> {
    let reserve = state.reserve_service.withdraw(&id, request.amount).await?;
    Ok(Json(reserve))
}

#[utoipa::path(get, path = "/api/reserves/summary/totals", responses((status = 200, description = "Funding totals across reserves")))]
pub async fn get_totals(State(state): State<Arc<AppState>>) -> ApiResult<Json<ReserveTotals>> {
    let totals = state.reserve_service.get_totals()?;
    Ok(Json(totals))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reserves", get(get_reserves).post(create_reserve))
        .route("/reserves/summary/totals", get(get_totals))
        .route(
            "/reserves/{id}",
            get(get_reserve).put(update_reserve).delete(delete_reserve),
        )
        .route("/reserves/{id}/allocate", post(allocate))
        .route("/reserves/{id}/withdraw", post(withdraw))
}
