//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use shelfsim_core::{Product, ProductFilter, RestockLine, WeekReport};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Query string of `GET /catalog`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CatalogQuery {
    /// Convert to a catalog filter. Blank values match everything.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        let non_blank = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        ProductFilter {
            category: non_blank(&self.category),
            search: non_blank(&self.search),
            max_quantity: None,
        }
    }
}

/// A list of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub count: usize,
    pub products: Vec<Product>,
}

impl CatalogResponse {
    #[must_use]
    pub fn from_products(products: Vec<&Product>) -> Self {
        Self {
            count: products.len(),
            products: products.into_iter().cloned().collect(),
        }
    }
}

/// Inventory value response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueResponse {
    pub total_value: f64,
    pub total_quantity: u64,
    pub products: usize,
}

// =============================================================================
// SIMULATE REQUEST/RESPONSE
// =============================================================================

/// Week simulation request. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulateRequest {
    /// Scheduler seed; random when omitted.
    pub seed: Option<u64>,
    pub approve_clearance: bool,
    pub approve_surge: bool,
}

/// Week simulation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub success: bool,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<WeekReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulateResponse {
    #[must_use]
    pub fn success(seed: u64, report: WeekReport) -> Self {
        Self {
            success: true,
            seed,
            report: Some(report),
            error: None,
        }
    }

    #[must_use]
    pub fn error(seed: u64, message: impl Into<String>) -> Self {
        Self {
            success: false,
            seed,
            report: None,
            error: Some(message.into()),
        }
    }
}

// =============================================================================
// RESTOCK RESPONSE
// =============================================================================

/// Restock-to-target response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockResponse {
    pub restocked: Vec<RestockLine>,
    pub units: u32,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of non-2xx responses without a richer type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
