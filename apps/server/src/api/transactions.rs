use std::sync::Arc;

use crate::{
    api::shared::{ApiJson, ApiQuery},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use budgetpace_core::transactions::{
    NewTransaction, Transaction, TransactionSearchFilters, TransactionSearchResponse,
    TransactionUpdate,
};

#[utoipa::path(
    get,
    path = "/api/transactions",
    responses((status = 200, description = "One page of matching transactions"), (status = 400, description = "Invalid filters or paging"))
)]
pub async fn search_transactions(
    State(state): State<Arc<AppState>>,
    ApiQuery(filters): ApiQuery<TransactionSearchFilters>,
) -> ApiResult<Json<TransactionSearchResponse>> {
    let page = state.transaction_service.search_transactions(filters)?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid transaction"))
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state.transaction_service.create_transaction(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses((status = 200, description = "The transaction"), (status = 404, description = "Unknown id"))
)]
pub async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(&id)?;
    Ok(Json(transaction))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses((status = 200, description = "Updated"), (status = 404, description = "Unknown id"))
)]
pub async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let updated = state
        .transaction_service
        .update_transaction(&id, payload)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Unknown id"))
)]
pub async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.transaction_service.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(search_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
