//! # Shelfsim HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /catalog` - List products (`?category=`, `?search=`)
//! - `GET /catalog/low-stock` - Products at or below the low-stock threshold
//! - `GET /catalog/value` - Total inventory value
//! - `GET /stats` - Bucket statistics of the catalog stores
//! - `GET /report` - Most recent simulated week (404 until one has run)
//! - `POST /simulate` - Run a week against the served catalog
//! - `POST /restock-low` - Restock every low product to target
//!
//! ## Configuration (Environment Variables)
//!
//! - `SHELFSIM_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `shelfsim::api::*`)
pub use handlers::{
    catalog_handler, health_handler, low_stock_handler, report_handler, restock_low_handler,
    simulate_handler, stats_handler, value_handler,
};
pub use types::{
    CatalogQuery, CatalogResponse, ErrorResponse, HealthResponse, RestockResponse,
    SimulateRequest, SimulateResponse, ValueResponse,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use shelfsim_core::{Catalog, ShelfError, SimConfig, WeekReport};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// The store behind the API: one catalog and the last week run against it.
#[derive(Debug)]
pub struct StoreState {
    pub config: SimConfig,
    pub catalog: Catalog,
    pub report: Option<WeekReport>,
}

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<StoreState>>,
}

impl AppState {
    /// Create new app state over a catalog.
    #[must_use]
    pub fn new(config: SimConfig, catalog: Catalog) -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreState {
                config,
                catalog,
                report: None,
            })),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Methods the API answers cross-origin.
const API_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// Origins of a local dashboard, allowed when nothing else is configured.
const DEV_ORIGINS: &str =
    "http://localhost:3000,http://localhost:8080,http://127.0.0.1:3000,http://127.0.0.1:8080";

/// Largest accepted request body.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Parse a comma-separated origin list, dropping entries that are not valid
/// header values.
fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// CORS for an explicit set of origins.
fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(API_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

/// CORS policy for a `SHELFSIM_CORS_ORIGINS` value.
///
/// `"*"` opens the API to every origin. An unset or unusable value falls
/// back to the local dashboard origins.
fn cors_policy(configured: Option<&str>) -> CorsLayer {
    if configured == Some("*") {
        tracing::warn!("CORS open to all origins");
        return CorsLayer::permissive();
    }
    let origins = configured.map(parse_origins).unwrap_or_default();
    if origins.is_empty() {
        tracing::info!(origins = DEV_ORIGINS, "CORS limited to local origins");
        return cors_for(parse_origins(DEV_ORIGINS));
    }
    tracing::info!(count = origins.len(), "CORS origins configured");
    cors_for(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner): tracing, CORS, body limit.
pub fn create_router(state: AppState) -> Router {
    let configured = std::env::var("SHELFSIM_CORS_ORIGINS").ok();
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_policy(configured.as_deref()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/catalog", get(handlers::catalog_handler))
        .route("/catalog/low-stock", get(handlers::low_stock_handler))
        .route("/catalog/value", get(handlers::value_handler))
        .route("/stats", get(handlers::stats_handler))
        .route("/report", get(handlers::report_handler))
        .route("/simulate", post(handlers::simulate_handler))
        .route("/restock-low", post(handlers::restock_low_handler))
        .layer(middleware)
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, config: SimConfig, catalog: Catalog) -> Result<(), ShelfError> {
    let state = AppState::new(config, catalog);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ShelfError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Shelfsim HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ShelfError::Io(format!("Server error: {}", e)))
}

/// Resolve on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

// =============================================================================
// TESTS
// =============================================================================
