//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        CatalogQuery, CatalogResponse, ErrorResponse, HealthResponse, RestockResponse,
        SimulateRequest, SimulateResponse, ValueResponse,
    },
};
use crate::runner;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelfsim_core::ApprovalPolicy;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CATALOG HANDLERS
// =============================================================================

/// List products, optionally by category and name.
pub async fn catalog_handler(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let store = state.store.read().await;
    let products = store.catalog.select(&query.to_filter());
    (StatusCode::OK, Json(CatalogResponse::from_products(products)))
}

/// Products at or below the configured low-stock threshold.
pub async fn low_stock_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let threshold = store.config.inventory.low_stock_threshold;
    let mut products = store.catalog.low_stock(threshold);
    products.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.name.cmp(&b.name)));
    (StatusCode::OK, Json(CatalogResponse::from_products(products)))
}

/// Total inventory value.
pub async fn value_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let response = ValueResponse {
        total_value: store.catalog.total_value(),
        total_quantity: store.catalog.total_quantity(),
        products: store.catalog.len(),
    };
    (StatusCode::OK, Json(response))
}

/// Bucket statistics of both catalog stores.
pub async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    (StatusCode::OK, Json(store.catalog.collision_stats()))
}

// =============================================================================
// REPORT HANDLER
// =============================================================================

/// The most recent simulated week.
pub async fn report_handler(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    match &store.report {
        Some(report) => (StatusCode::OK, Json(report.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No week has been simulated yet")),
        )
            .into_response(),
    }
}

// =============================================================================
// SIMULATE HANDLER
// =============================================================================

/// Run a week against the served catalog.
///
/// The write lock is held for the whole run, so weeks never interleave and
/// readers see either the old or the new catalog.
pub async fn simulate_handler(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> impl IntoResponse {
    let seed = request.seed.unwrap_or_else(rand::random);
    let policy = ApprovalPolicy {
        clearance: request.approve_clearance,
        surge: request.approve_surge,
    };

    let mut store = state.store.write().await;
    let outcome =
        runner::run_with_policy(store.config.clone(), store.catalog.clone(), seed, policy).await;

    match outcome {
        Ok((report, catalog)) => {
            tracing::info!(
                seed,
                revenue = report.total_revenue,
                customers = report.total_customers,
                "Week simulated over HTTP"
            );
            store.catalog = catalog;
            store.report = Some(report.clone());
            (StatusCode::OK, Json(SimulateResponse::success(seed, report)))
        }
        Err(e) => {
            tracing::error!(seed, "Simulation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SimulateResponse::error(seed, format!("Simulation failed: {}", e))),
            )
        }
    }
}

// =============================================================================
// RESTOCK HANDLER
// =============================================================================

/// Restock every low product to the configured target.
pub async fn restock_low_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut store = state.store.write().await;
    let threshold = store.config.inventory.low_stock_threshold;
    let target = store.config.inventory.restock_target;
    let restocked = store.catalog.restock_low_to_target(threshold, target);
    let units = restocked.iter().map(|l| l.added).sum();
    (StatusCode::OK, Json(RestockResponse { restocked, units }))
}
