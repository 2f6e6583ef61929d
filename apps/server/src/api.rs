use std::sync::Arc;

use crate::{config::Config, main_lib::AppState};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

mod analytics;
mod budget;
mod health;
mod reserves;
pub mod shared;
mod transactions;

#[derive(OpenApi)]
#[openapi(
    info(title = "Budgetpace API", description = "Monthly budget plans, daily pace correction and spending analytics"),
    paths(
        health::health,
        health::readyz,
        budget::get_monthly_budget,
        budget::get_daily_budget,
        budget::adjust_daily_budget,
        budget::get_spending_summary,
        analytics::get_expenses_by_category,
        analytics::get_expenses_by_priority,
        analytics::get_spending_trends,
        analytics::get_income_vs_expense,
        analytics::get_category_trends,
        analytics::get_monthly_summary,
        transactions::search_transactions,
        transactions::create_transaction,
        transactions::get_transaction,
        transactions::update_transaction,
        transactions::delete_transaction,
        reserves::get_reserves,
        reserves::create_reserve,
        reserves::get_reserve,
        reserves::update_reserve,
        reserves::delete_reserve,
        reserves::allocate,
        reserves::withdraw,
        reserves::get_totals,
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    if config.cors_allow.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_allow
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .merge(health::router())
        .merge(budget::router())
        .merge(analytics::router())
        .merge(transactions::router())
        .merge(reserves::router());

    Router::new()
        .nest("/api", api)
        .route("/openapi.json", get(move || async move { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
