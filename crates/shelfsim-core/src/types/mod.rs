//! # Core Type Definitions
//!
//! This module contains the shared types of the Shelfsim engine:
//! - Product identity and records (`ProductId`, `Product`)
//! - The outcome of a successful purchase (`PurchaseReceipt`)
//! - Error types (`ShelfError`)
//!
//! ## Ownership
//!
//! Products are owned exclusively by the `Catalog`. Everything outside the
//! catalog sees `&Product` views or `ProductId`s, never detached copies that
//! could drift from the live record.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// PRODUCT IDENTITY
// =============================================================================

/// Store-generated product identifier, e.g. `MM-K4R2W9`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    /// Create an identifier from any string-like value.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PRODUCT
// =============================================================================

/// A single grocery product on the shelves.
///
/// `price` is a unit price in dollars and is never negative.
/// `quantity` is the number of units on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
}

impl Product {
    /// Create a new product record.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            category: category.into(),
        }
    }

    /// Shelf value of this product (`price × quantity`).
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Whether the product is at or below `threshold` units.
    #[must_use]
    pub fn is_low(&self, threshold: u32) -> bool {
        self.quantity <= threshold
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} | {:<20} | ${:<8.2} | Qty: {:<5} | {}",
            self.id, self.name, self.price, self.quantity, self.category
        )
    }
}

/// Round a dollar amount to whole cents.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// PURCHASE RECEIPT
// =============================================================================

/// Result of a successful `Catalog::purchase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price charged at the moment of sale.
    pub unit_price: f64,
    /// Units left on the shelf after the sale.
    pub remaining: u32,
    /// True when `remaining` is at or below the catalog's low-stock threshold.
    pub low_stock: bool,
}

impl PurchaseReceipt {
    /// Total charged for this line.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Shelfsim engine.
///
/// - No silent failures
/// - Use `Result<T, ShelfError>` for fallible operations
/// - The engine never panics; every error is recoverable by the caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShelfError {
    /// A price below zero was supplied.
    #[error("Price must be non-negative, got {0}")]
    NegativePrice(f64),

    /// A price that is not a finite number was supplied.
    #[error("Price must be a finite number, got {0}")]
    InvalidPrice(f64),

    /// A stock quantity below zero was supplied.
    #[error("Quantity must be non-negative, got {0}")]
    NegativeQuantity(i64),

    /// A quantity or amount larger than a shelf can hold.
    #[error("Quantity {0} exceeds the maximum of {max} units", max = u32::MAX)]
    QuantityOutOfRange(i64),

    /// A purchase or restock amount was zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// The product id is not present in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The shelf holds fewer units than requested.
    #[error("Insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The simulation configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred at the application boundary.
    #[error("I/O error: {0}")]
    Io(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShelfError {
    /// Whether this error belongs to the caller-correctable validation family.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NegativePrice(_)
                | Self::InvalidPrice(_)
                | Self::NegativeQuantity(_)
                | Self::QuantityOutOfRange(_)
                | Self::InvalidAmount(_)
                | Self::InvalidConfig(_)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
