//! # Catalog
//!
//! Owns every `Product` of the store.
//!
//! The catalog is built on two `AssociativeStore` instances:
//! - `by_id`: `ProductId -> Product`
//! - `by_category`: category label -> ordered list of product ids
//!
//! Every id in a category list exists in `by_id` under that same category.
//! Add, remove and recategorize update both stores before returning, so no
//! caller can observe a half-applied change.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{InventoryConfig, SimConfig};
use crate::store::{AssociativeStore, CollisionStats, DEFAULT_BUCKETS};
use crate::types::{Product, ProductId, PurchaseReceipt, ShelfError};

/// Characters used in the random part of a product id.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random part of a product id.
const ID_LENGTH: usize = 6;

// =============================================================================
// OPTIONS
// =============================================================================

/// Construction parameters of a `Catalog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    pub catalog_buckets: usize,
    pub category_buckets: usize,
    /// Purchases leaving a product at or below this quantity flag low stock.
    pub low_stock_threshold: u32,
    pub id_prefix: String,
    /// Seed of the id generator.
    pub id_seed: u64,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::from_inventory(&InventoryConfig::default(), rand::random())
    }
}

impl CatalogOptions {
    /// Options matching an inventory configuration section.
    #[must_use]
    pub fn from_inventory(inventory: &InventoryConfig, id_seed: u64) -> Self {
        Self {
            catalog_buckets: inventory.catalog_buckets,
            category_buckets: inventory.category_buckets,
            low_stock_threshold: inventory.low_stock_threshold,
            id_prefix: inventory.id_prefix.clone(),
            id_seed,
        }
    }
}

/// One product touched by `Catalog::restock_low_to_target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockLine {
    pub id: ProductId,
    pub name: String,
    pub added: u32,
    pub quantity: u32,
}

/// Criteria for `Catalog::select`. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    /// Exact category label.
    pub category: Option<String>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Keep only products at or below this many units.
    pub max_quantity: Option<u32>,
}

/// Collision statistics of both backing stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub products: CollisionStats,
    pub categories: CollisionStats,
}

// =============================================================================
// CATALOG
// =============================================================================

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    by_id: AssociativeStore<ProductId, Product>,
    by_category: AssociativeStore<String, Vec<ProductId>>,
    low_stock_threshold: u32,
    id_prefix: String,
    id_rng: StdRng,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with default sizes and a random id seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CatalogOptions::default())
    }

    /// Create an empty catalog.
    #[must_use]
    pub fn with_options(options: CatalogOptions) -> Self {
        let catalog_buckets = if options.catalog_buckets == 0 {
            DEFAULT_BUCKETS
        } else {
            options.catalog_buckets
        };
        Self {
            by_id: AssociativeStore::with_buckets(catalog_buckets),
            by_category: AssociativeStore::with_buckets(options.category_buckets.max(1)),
            low_stock_threshold: options.low_stock_threshold,
            id_prefix: options.id_prefix,
            id_rng: StdRng::seed_from_u64(options.id_seed),
        }
    }

    /// Build a catalog holding every seed product of `config`.
    pub fn seeded(config: &SimConfig, seed: u64) -> Result<Self, ShelfError> {
        let mut catalog = Self::with_options(CatalogOptions::from_inventory(&config.inventory, seed));
        for item in &config.seed_products {
            catalog.add_product(
                &item.name,
                item.price,
                i64::from(item.quantity),
                &item.category,
            )?;
        }
        tracing::debug!(
            target: "shelfsim_core::catalog",
            products = catalog.len(),
            "Seeded catalog"
        );
        Ok(catalog)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Low-stock threshold used to flag purchases.
    #[must_use]
    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Add a product and return its freshly generated id.
    ///
    /// Ids are re-rolled until unused, so an add never overwrites an
    /// existing product.
    pub fn add_product(
        &mut self,
        name: &str,
        price: f64,
        quantity: i64,
        category: &str,
    ) -> Result<ProductId, ShelfError> {
        let price = validate_price(price)?;
        let quantity = validate_quantity(quantity)?;

        let id = self.fresh_id();
        let product = Product::new(id.clone(), name, price, quantity, category);
        self.by_id.set(id.clone(), product);
        self.index_insert(category, id.clone());

        tracing::debug!(
            target: "shelfsim_core::catalog",
            id = %id,
            name,
            category,
            "Product added"
        );
        Ok(id)
    }

    /// Sell `amount` units of a product.
    pub fn purchase(&mut self, id: &ProductId, amount: i64) -> Result<PurchaseReceipt, ShelfError> {
        let requested = positive_amount(amount)?;
        let threshold = self.low_stock_threshold;
        let product = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;

        if requested > product.quantity {
            return Err(ShelfError::InsufficientStock {
                id: id.clone(),
                requested,
                available: product.quantity,
            });
        }
        product.quantity -= requested;

        let low_stock = product.is_low(threshold);
        if low_stock {
            tracing::warn!(
                target: "shelfsim_core::catalog",
                id = %id,
                name = %product.name,
                remaining = product.quantity,
                "Low stock"
            );
        }
        Ok(PurchaseReceipt {
            id: id.clone(),
            name: product.name.clone(),
            quantity: requested,
            unit_price: product.price,
            remaining: product.quantity,
            low_stock,
        })
    }

    /// Add `amount` units to a product and return the new quantity.
    pub fn restock(&mut self, id: &ProductId, amount: i64) -> Result<u32, ShelfError> {
        let added = positive_amount(amount)?;
        let product = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;
        let current = product.quantity;
        product.quantity = current
            .checked_add(added)
            .ok_or_else(|| ShelfError::QuantityOutOfRange(i64::from(current) + i64::from(added)))?;
        Ok(product.quantity)
    }

    /// Restock every product at or below `threshold` up to `target`.
    ///
    /// Products already at or above `target` are left alone.
    pub fn restock_low_to_target(&mut self, threshold: u32, target: u32) -> Vec<RestockLine> {
        let mut lines = Vec::new();
        for product in self.by_id.values_mut() {
            if !product.is_low(threshold) || product.quantity >= target {
                continue;
            }
            let added = target - product.quantity;
            product.quantity = target;
            lines.push(RestockLine {
                id: product.id.clone(),
                name: product.name.clone(),
                added,
                quantity: product.quantity,
            });
        }
        lines
    }

    /// Remove a product from both stores.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<Product, ShelfError> {
        let product = self
            .by_id
            .remove(id)
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;
        self.index_remove(&product.category, id);
        Ok(product)
    }

    /// Set a new unit price and return the previous one.
    pub fn update_price(&mut self, id: &ProductId, price: f64) -> Result<f64, ShelfError> {
        let price = validate_price(price)?;
        let product = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;
        Ok(std::mem::replace(&mut product.price, price))
    }

    /// Move a product to another category.
    pub fn recategorize(&mut self, id: &ProductId, category: &str) -> Result<(), ShelfError> {
        let product = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;
        if product.category == category {
            return Ok(());
        }
        let old = std::mem::replace(&mut product.category, category.to_string());
        self.index_remove(&old, id);
        self.index_insert(category, id.clone());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id)
    }

    /// Look up a product, failing with `ProductNotFound`.
    pub fn product(&self, id: &ProductId) -> Result<&Product, ShelfError> {
        self.get(id)
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))
    }

    /// Every product, in store order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.by_id.values()
    }

    /// Products with at least one unit on the shelf.
    #[must_use]
    pub fn in_stock(&self) -> Vec<&Product> {
        self.products().filter(|p| p.quantity > 0).collect()
    }

    /// Ids filed under `category`, in insertion order.
    #[must_use]
    pub fn category_ids(&self, category: &str) -> &[ProductId] {
        self.by_category
            .get(&category.to_string())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Products filed under `category`, in insertion order.
    #[must_use]
    pub fn products_by_category(&self, category: &str) -> Vec<&Product> {
        self.category_ids(category)
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    /// Category labels currently holding at least one product, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_category.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Products whose name contains `needle`.
    #[must_use]
    pub fn search_by_name(&self, needle: &str, case_insensitive: bool) -> Vec<&Product> {
        if case_insensitive {
            let needle = needle.to_lowercase();
            self.products()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .collect()
        } else {
            self.products().filter(|p| p.name.contains(needle)).collect()
        }
    }

    /// Products matching `filter`, sorted by category then name.
    #[must_use]
    pub fn select(&self, filter: &ProductFilter) -> Vec<&Product> {
        let mut picked: Vec<&Product> = match &filter.category {
            Some(category) => self.products_by_category(category),
            None => self.products().collect(),
        };
        if let Some(needle) = &filter.search {
            let needle = needle.to_lowercase();
            picked.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        if let Some(max) = filter.max_quantity {
            picked.retain(|p| p.quantity <= max);
        }
        picked.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        picked
    }

    /// Products at or below `threshold` units.
    #[must_use]
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.products().filter(|p| p.is_low(threshold)).collect()
    }

    /// Sum of `price × quantity` over all products.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.products().map(Product::stock_value).sum()
    }

    /// Sum of quantities over all products.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.products().map(|p| u64::from(p.quantity)).sum()
    }

    /// Collision statistics of both backing stores.
    #[must_use]
    pub fn collision_stats(&self) -> CatalogStats {
        CatalogStats {
            products: self.by_id.collision_stats(),
            categories: self.by_category.collision_stats(),
        }
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn fresh_id(&mut self) -> ProductId {
        loop {
            let suffix: String = (0..ID_LENGTH)
                .map(|_| char::from(ID_ALPHABET[self.id_rng.random_range(0..ID_ALPHABET.len())]))
                .collect();
            let id = ProductId::new(format!("{}-{}", self.id_prefix, suffix));
            if !self.by_id.contains_key(&id) {
                return id;
            }
            tracing::debug!(target: "shelfsim_core::catalog", id = %id, "Id collision, re-rolling");
        }
    }

    fn index_insert(&mut self, category: &str, id: ProductId) {
        let key = category.to_string();
        if let Some(ids) = self.by_category.get_mut(&key) {
            ids.push(id);
        } else {
            self.by_category.set(key, vec![id]);
        }
    }

    fn index_remove(&mut self, category: &str, id: &ProductId) {
        let key = category.to_string();
        let now_empty = match self.by_category.get_mut(&key) {
            Some(ids) => {
                ids.retain(|existing| existing != id);
                ids.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.by_category.delete(&key);
        }
    }
}

fn validate_price(price: f64) -> Result<f64, ShelfError> {
    if !price.is_finite() {
        Err(ShelfError::InvalidPrice(price))
    } else if price < 0.0 {
        Err(ShelfError::NegativePrice(price))
    } else {
        Ok(price)
    }
}

fn validate_quantity(quantity: i64) -> Result<u32, ShelfError> {
    if quantity < 0 {
        return Err(ShelfError::NegativeQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| ShelfError::QuantityOutOfRange(quantity))
}

fn positive_amount(amount: i64) -> Result<u32, ShelfError> {
    if amount <= 0 {
        return Err(ShelfError::InvalidAmount(amount));
    }
    u32::try_from(amount).map_err(|_| ShelfError::QuantityOutOfRange(amount))
}

// =============================================================================
// TESTS
// =============================================================================
