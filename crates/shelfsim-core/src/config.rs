//! # Simulation Configuration
//!
//! The typed configuration consumed by the engine at startup.
//!
//! Every table the simulation reads lives here as a named field: stock
//! thresholds, the weekly schedule, time blocks, shopper profiles, identity
//! pools, purchase tiers, warehouse allotments and the seed inventory.
//!
//! `SimConfig::default()` describes the reference store. `SimConfig::validate`
//! must run once after loading; the engine assumes a validated configuration
//! and does not re-check shapes at run time.
//!
//! All sections deserialize with `#[serde(default)]`, so a configuration file
//! only needs the fields it overrides.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::ShelfError;

// =============================================================================
// INVENTORY THRESHOLDS
// =============================================================================

/// Stock thresholds, pricing constants and store sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// At or below this quantity a product is "low stock".
    pub low_stock_threshold: u32,
    /// Overnight restock fills low products up to this quantity.
    pub restock_target: u32,
    /// Deliveries only go to products at or below this quantity.
    pub delivery_ceiling: u32,
    /// Clearance candidates hold at least this many units.
    pub high_stock_threshold: u32,
    /// Fraction taken off the price in a clearance sale (0.5 = half off).
    pub clearance_discount: f64,
    /// Maximum number of clearance candidates proposed at once.
    pub clearance_limit: usize,
    /// Category whose prices surge on surge days.
    pub volatile_category: String,
    /// Prefix of generated product ids.
    pub id_prefix: String,
    /// Initial bucket count of the product store.
    pub catalog_buckets: usize,
    /// Initial bucket count of the category index.
    pub category_buckets: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            restock_target: 50,
            delivery_ceiling: 25,
            high_stock_threshold: 50,
            clearance_discount: 0.50,
            clearance_limit: 5,
            volatile_category: "Alcohol".to_string(),
            id_prefix: "MM".to_string(),
            catalog_buckets: 97,
            category_buckets: 31,
        }
    }
}

// =============================================================================
// WEEK SCHEDULE
// =============================================================================

/// One day in the weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayConfig {
    pub name: String,
    /// Customer-count multiplier applied to every time block.
    pub traffic: f64,
}

impl DayConfig {
    fn new(name: &str, traffic: f64) -> Self {
        Self {
            name: name.to_string(),
            traffic,
        }
    }
}

/// Explicit customer count and cart cap for one time block.
///
/// Used verbatim (not traffic-scaled) on days that carry overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOverride {
    pub customers: u32,
    pub max_cart: u32,
}

/// The ordered week and its per-day event tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekConfig {
    pub days: Vec<DayConfig>,
    /// Days on which the warehouse truck arrives before opening.
    pub delivery_days: Vec<String>,
    /// Day on which overstocked products are proposed for clearance.
    pub clearance_day: Option<String>,
    /// Day name -> surge rate (0.25 = +25%) for the volatile category.
    pub surge_rates: BTreeMap<String, f64>,
    /// Day name -> one override per time block, in block order.
    pub overrides: BTreeMap<String, Vec<BlockOverride>>,
}

impl Default for WeekConfig {
    fn default() -> Self {
        Self {
            days: vec![
                DayConfig::new("Monday", 0.8),
                DayConfig::new("Tuesday", 0.9),
                DayConfig::new("Wednesday", 0.85),
                DayConfig::new("Thursday", 0.95),
                DayConfig::new("Friday", 1.1),
                DayConfig::new("Saturday", 1.4),
                DayConfig::new("Sunday", 1.2),
            ],
            delivery_days: strings(&["Tuesday", "Friday"]),
            clearance_day: Some("Friday".to_string()),
            surge_rates: BTreeMap::from([
                ("Saturday".to_string(), 0.25),
                ("Sunday".to_string(), 0.15),
            ]),
            overrides: BTreeMap::new(),
        }
    }
}

// =============================================================================
// TIME BLOCKS, TIERS, WAREHOUSE
// =============================================================================

/// A segment of the trading day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub label: String,
    pub hours: String,
    /// Nominal customer count before traffic scaling.
    pub customers: u32,
    /// Largest cart a shopper in this block may fill.
    pub max_cart: u32,
}

impl TimeBlock {
    fn new(label: &str, hours: &str, customers: u32, max_cart: u32) -> Self {
        Self {
            label: label.to_string(),
            hours: hours.to_string(),
            customers,
            max_cart,
        }
    }
}

/// One tier of the purchase-quantity distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTier {
    /// Percent chance of this tier; all tiers sum to 100.
    pub chance: u32,
    pub min: u32,
    pub max: u32,
}

/// Units per delivery for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseAllotment {
    pub category: String,
    pub units: u32,
}

// =============================================================================
// SHOPPER PROFILES
// =============================================================================

/// A demographic archetype that biases when a shopper visits and what they buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopperProfile {
    pub name: String,
    /// Inclusive age range.
    pub age_range: (u32, u32),
    /// Relative likelihood per time block, in block order.
    pub time_weights: Vec<u32>,
    /// Inclusive basket-size range.
    pub basket_size: (u32, u32),
    /// Items priced above this are less attractive.
    pub price_threshold: f64,
    /// Probability of skipping an item priced above the threshold outright.
    pub skip_chance: f64,
    /// Category -> preference weight.
    pub category_weights: BTreeMap<String, u32>,
}

impl ShopperProfile {
    /// Sum of all time weights; zero means the profile never appears.
    #[must_use]
    pub fn total_time_weight(&self) -> u32 {
        self.time_weights.iter().sum()
    }
}

// =============================================================================
// IDENTITY POOLS & SEED INVENTORY
// =============================================================================

/// Pools sampled when synthesizing a shopper identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamePools {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub races: Vec<String>,
    pub professions: Vec<String>,
}

/// A product loaded into the catalog at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
}

impl SeedProduct {
    fn new(name: &str, price: f64, quantity: u32, category: &str) -> Self {
        Self {
            name: name.to_string(),
            price,
            quantity,
            category: category.to_string(),
        }
    }
}

// =============================================================================
// SIM CONFIG
// =============================================================================

/// Complete configuration of one simulated store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub inventory: InventoryConfig,
    pub week: WeekConfig,
    pub time_blocks: Vec<TimeBlock>,
    pub purchase_tiers: Vec<PurchaseTier>,
    pub warehouse: Vec<WarehouseAllotment>,
    pub profiles: Vec<ShopperProfile>,
    pub profession_to_profile: BTreeMap<String, String>,
    pub names: NamePools,
    pub seed_products: Vec<SeedProduct>,
}

impl SimConfig {
    /// Check every cross-field constraint the engine relies on.
    pub fn validate(&self) -> Result<(), ShelfError> {
        let inv = &self.inventory;
        if inv.restock_target < inv.low_stock_threshold {
            return invalid(format!(
                "restock_target {} is below low_stock_threshold {}",
                inv.restock_target, inv.low_stock_threshold
            ));
        }
        if !(0.0..1.0).contains(&inv.clearance_discount) {
            return invalid(format!(
                "clearance_discount {} must be in [0, 1)",
                inv.clearance_discount
            ));
        }
        if inv.catalog_buckets == 0 || inv.category_buckets == 0 {
            return invalid("store bucket counts must be positive".to_string());
        }
        if inv.id_prefix.is_empty() {
            return invalid("id_prefix must not be empty".to_string());
        }

        self.validate_week()?;
        self.validate_blocks_and_tiers()?;
        self.validate_profiles()?;

        for seed in &self.seed_products {
            if seed.price < 0.0 || !seed.price.is_finite() {
                return invalid(format!("seed product '{}' has invalid price", seed.name));
            }
        }
        Ok(())
    }

    fn validate_week(&self) -> Result<(), ShelfError> {
        let week = &self.week;
        if week.days.is_empty() {
            return invalid("week.days must not be empty".to_string());
        }
        let mut names = BTreeSet::new();
        for day in &week.days {
            if !names.insert(day.name.as_str()) {
                return invalid(format!("day '{}' appears twice", day.name));
            }
            if !(day.traffic > 0.0 && day.traffic.is_finite()) {
                return invalid(format!("day '{}' needs a positive traffic", day.name));
            }
        }
        let known = |d: &str| names.contains(d);
        for day in &week.delivery_days {
            if !known(day) {
                return invalid(format!("delivery day '{}' is not in week.days", day));
            }
        }
        if let Some(day) = &week.clearance_day
            && !known(day)
        {
            return invalid(format!("clearance day '{}' is not in week.days", day));
        }
        for (day, rate) in &week.surge_rates {
            if !known(day) {
                return invalid(format!("surge day '{}' is not in week.days", day));
            }
            if *rate < 0.0 || !rate.is_finite() {
                return invalid(format!("surge rate for '{}' must be non-negative", day));
            }
        }
        for (day, blocks) in &week.overrides {
            if !known(day) {
                return invalid(format!("override day '{}' is not in week.days", day));
            }
            if blocks.len() != self.time_blocks.len() {
                return invalid(format!(
                    "override for '{}' has {} blocks, expected {}",
                    day,
                    blocks.len(),
                    self.time_blocks.len()
                ));
            }
        }
        Ok(())
    }

    fn validate_blocks_and_tiers(&self) -> Result<(), ShelfError> {
        if self.time_blocks.is_empty() {
            return invalid("time_blocks must not be empty".to_string());
        }
        if self.purchase_tiers.is_empty() {
            return invalid("purchase_tiers must not be empty".to_string());
        }
        let total: u32 = self.purchase_tiers.iter().map(|t| t.chance).sum();
        if total != 100 {
            return invalid(format!("purchase tier chances sum to {}, expected 100", total));
        }
        for tier in &self.purchase_tiers {
            if tier.min == 0 || tier.min > tier.max {
                return invalid(format!(
                    "purchase tier {}..={} is not a positive range",
                    tier.min, tier.max
                ));
            }
        }
        Ok(())
    }

    fn validate_profiles(&self) -> Result<(), ShelfError> {
        if self.profiles.is_empty() {
            return invalid("profiles must not be empty".to_string());
        }
        let blocks = self.time_blocks.len();
        for profile in &self.profiles {
            if profile.time_weights.len() != blocks {
                return invalid(format!(
                    "profile '{}' has {} time weights, expected {}",
                    profile.name,
                    profile.time_weights.len(),
                    blocks
                ));
            }
            if profile.age_range.0 > profile.age_range.1 {
                return invalid(format!("profile '{}' has an inverted age range", profile.name));
            }
            let (lo, hi) = profile.basket_size;
            if lo == 0 || lo > hi {
                return invalid(format!(
                    "profile '{}' basket size must be a positive range",
                    profile.name
                ));
            }
            if !profile.price_threshold.is_finite() || profile.price_threshold < 0.0 {
                return invalid(format!(
                    "profile '{}' price_threshold must be a non-negative number",
                    profile.name
                ));
            }
            if !(0.0..=1.0).contains(&profile.skip_chance) {
                return invalid(format!(
                    "profile '{}' skip_chance must be in [0, 1]",
                    profile.name
                ));
            }
        }
        for (profession, profile) in &self.profession_to_profile {
            if self.profile(profile).is_none() {
                return invalid(format!(
                    "profession '{}' maps to unknown profile '{}'",
                    profession, profile
                ));
            }
        }
        Ok(())
    }

    /// Look up a profile by name.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&ShopperProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Professions mapped to `profile`, in name order.
    #[must_use]
    pub fn professions_for(&self, profile: &str) -> Vec<&str> {
        self.profession_to_profile
            .iter()
            .filter(|(_, p)| p.as_str() == profile)
            .map(|(prof, _)| prof.as_str())
            .collect()
    }

    /// Whether the warehouse truck arrives on `day`.
    #[must_use]
    pub fn is_delivery_day(&self, day: &str) -> bool {
        self.week.delivery_days.iter().any(|d| d == day)
    }

    /// Whether `day` is the clearance-sale day.
    #[must_use]
    pub fn is_clearance_day(&self, day: &str) -> bool {
        self.week.clearance_day.as_deref() == Some(day)
    }

    /// Surge rate for `day`, if it is a surge day.
    #[must_use]
    pub fn surge_rate(&self, day: &str) -> Option<f64> {
        self.week.surge_rates.get(day).copied()
    }

    /// Time-block overrides for `day`, if any.
    #[must_use]
    pub fn overrides_for(&self, day: &str) -> Option<&[BlockOverride]> {
        self.week.overrides.get(day).map(Vec::as_slice)
    }
}

fn invalid(message: String) -> Result<(), ShelfError> {
    Err(ShelfError::InvalidConfig(message))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn weights(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

// =============================================================================
// REFERENCE STORE
// =============================================================================

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            inventory: InventoryConfig::default(),
            week: WeekConfig::default(),
            time_blocks: default_time_blocks(),
            purchase_tiers: vec![
                PurchaseTier { chance: 60, min: 1, max: 3 },
                PurchaseTier { chance: 30, min: 4, max: 6 },
                PurchaseTier { chance: 10, min: 7, max: 12 },
            ],
            warehouse: [
                ("Dairy", 60),
                ("Produce", 80),
                ("Meat", 40),
                ("Bakery", 50),
                ("Beverages", 70),
                ("Pantry", 60),
                ("Snacks", 40),
                ("Desserts", 30),
                ("Alcohol", 30),
            ]
            .iter()
            .map(|(category, units)| WarehouseAllotment {
                category: (*category).to_string(),
                units: *units,
            })
            .collect(),
            profiles: default_profiles(),
            profession_to_profile: default_profession_map(),
            names: NamePools::default(),
            seed_products: default_seed_products(),
        }
    }
}

fn default_time_blocks() -> Vec<TimeBlock> {
    vec![
        TimeBlock::new("Morning (7am - 9am)", "7:00 - 9:00", 8, 4),
        TimeBlock::new("Midday (11am - 1pm)", "11:00 - 13:00", 5, 3),
        TimeBlock::new("Evening (4pm - 7pm)", "16:00 - 19:00", 12, 6),
        TimeBlock::new("Night (8pm - 10pm)", "20:00 - 22:00", 3, 3),
    ]
}

fn default_profiles() -> Vec<ShopperProfile> {
    vec![
        ShopperProfile {
            name: "Stay-at-Home Parent".to_string(),
            age_range: (25, 45),
            time_weights: vec![8, 3, 1, 0],
            basket_size: (3, 6),
            price_threshold: 6.00,
            skip_chance: 0.60,
            category_weights: weights(&[
                ("Dairy", 8),
                ("Bakery", 7),
                ("Produce", 7),
                ("Beverages", 5),
                ("Meat", 6),
                ("Pantry", 8),
                ("Snacks", 5),
                ("Desserts", 4),
                ("Household", 3),
                ("Alcohol", 2),
            ]),
        },
        ShopperProfile {
            name: "Retired".to_string(),
            age_range: (60, 80),
            time_weights: vec![3, 8, 2, 0],
            basket_size: (2, 4),
            price_threshold: 5.00,
            skip_chance: 0.70,
            category_weights: weights(&[
                ("Dairy", 7),
                ("Bakery", 8),
                ("Produce", 9),
                ("Beverages", 6),
                ("Meat", 5),
                ("Pantry", 7),
                ("Snacks", 3),
                ("Desserts", 4),
                ("Household", 2),
                ("Alcohol", 2),
            ]),
        },
        ShopperProfile {
            name: "Student".to_string(),
            age_range: (18, 25),
            time_weights: vec![1, 2, 8, 5],
            basket_size: (1, 5),
            price_threshold: 6.00,
            skip_chance: 0.80,
            category_weights: weights(&[
                ("Dairy", 4),
                ("Bakery", 5),
                ("Produce", 2),
                ("Beverages", 8),
                ("Meat", 3),
                ("Pantry", 7),
                ("Snacks", 9),
                ("Desserts", 7),
                ("Household", 1),
                ("Alcohol", 6),
            ]),
        },
        ShopperProfile {
            name: "Office Worker".to_string(),
            age_range: (25, 55),
            time_weights: vec![1, 1, 9, 2],
            basket_size: (2, 10),
            price_threshold: 10.00,
            skip_chance: 0.30,
            category_weights: weights(&[
                ("Dairy", 6),
                ("Bakery", 4),
                ("Produce", 7),
                ("Beverages", 5),
                ("Meat", 8),
                ("Pantry", 7),
                ("Snacks", 4),
                ("Desserts", 5),
                ("Household", 3),
                ("Alcohol", 5),
            ]),
        },
        ShopperProfile {
            name: "Trade Worker".to_string(),
            age_range: (22, 55),
            time_weights: vec![5, 1, 7, 1],
            basket_size: (2, 9),
            price_threshold: 8.00,
            skip_chance: 0.40,
            category_weights: weights(&[
                ("Dairy", 5),
                ("Bakery", 2),
                ("Produce", 4),
                ("Beverages", 10),
                ("Meat", 8),
                ("Pantry", 6),
                ("Snacks", 6),
                ("Desserts", 3),
                ("Household", 1),
                ("Alcohol", 7),
            ]),
        },
        ShopperProfile {
            name: "Night Shift".to_string(),
            age_range: (20, 50),
            time_weights: vec![4, 0, 1, 8],
            basket_size: (1, 4),
            price_threshold: 5.00,
            skip_chance: 0.50,
            category_weights: weights(&[
                ("Dairy", 5),
                ("Bakery", 3),
                ("Produce", 3),
                ("Beverages", 8),
                ("Meat", 4),
                ("Pantry", 5),
                ("Snacks", 8),
                ("Desserts", 1),
                ("Household", 2),
                ("Alcohol", 4),
            ]),
        },
    ]
}

fn default_profession_map() -> BTreeMap<String, String> {
    let groups: [(&str, &[&str]); 6] = [
        (
            "Office Worker",
            &[
                "Teacher",
                "Software Engineer",
                "Accountant",
                "Pharmacist",
                "Graphic Designer",
                "Data Analyst",
                "Lawyer",
                "Dentist",
                "Social Worker",
                "Doctor",
                "Salesperson",
                "Freelancer",
                "Administrator",
                "Researcher",
                "Veterinarian",
                "Journalist",
                "Author",
                "Scientist",
                "Small Business Owner",
            ],
        ),
        (
            "Trade Worker",
            &[
                "Electrician",
                "Mechanic",
                "Plumber",
                "Construction Worker",
                "Barber",
                "Braider",
                "Cashier",
                "Retail Manager",
                "Postman",
                "Receptionist",
                "Landscape Worker",
                "Coach",
                "Athlete",
            ],
        ),
        (
            "Night Shift",
            &[
                "Nurse",
                "Chef",
                "Firefighter",
                "Truck Driver",
                "Warehouse Associate",
                "Security Guard",
                "Police Officer",
                "Flight Attendant",
                "Pilot",
            ],
        ),
        ("Student", &["Student", "Podcaster", "Artist", "Musician"]),
        ("Retired", &["Retired"]),
        ("Stay-at-Home Parent", &["Stay-at-Home Parent"]),
    ];
    groups
        .iter()
        .flat_map(|(profile, professions)| {
            professions
                .iter()
                .map(move |p| ((*p).to_string(), (*profile).to_string()))
        })
        .collect()
}

impl Default for NamePools {
    fn default() -> Self {
        Self {
            first_names: strings(&[
                "Chloe", "Temi", "Jazlyn", "Noah", "Jacque", "James", "Daniela", "Omar", "Diana",
                "Carolina", "Isabella", "Malhar", "Arafat", "Logan", "Jenicka", "Aiden", "Harper",
                "Elijah", "Angel", "Ben", "Grace", "Caleb", "Lily", "Sayna", "Deni", "Ryan",
                "Safa", "Leo", "Amora", "Dylan", "Aaliyah", "Marcus", "Yvonne", "Li", "Priya",
                "Ariel", "Paul", "Darnell", "Keiko", "Rachel", "Ingrid", "Benito", "Jeison",
                "Kofi", "Princess", "Hesler", "Brittney", "Dante", "Manuel", "Ashley", "Jake",
                "Toure", "Rosa", "Tariq", "Simone", "Andrei", "Elisa", "Digna", "Elena", "Noel",
                "Valentina", "Raj", "Asia", "Jorge", "Bianca", "Mohammed", "Monique", "Jin",
                "Camila", "Charlie", "Leila", "Markelis",
            ]),
            last_names: strings(&[
                "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
                "Martinez", "Lopez", "Wilson", "Anderson", "Thomas", "Tepic", "Lee", "Kim",
                "Toliver", "Patel", "Figueroa", "Wang", "Jackson", "Matthews", "Harris", "Howard",
                "Robinson", "Walker", "Hall", "Young", "King", "Modi", "Blackburn", "Wright",
                "Torres", "Rivera", "Evans", "Okafor", "Yamamoto", "Singh", "Terry", "Kirk",
                "Santiago", "Johansson", "Moore", "Alvarado", "Linjewile", "McKnight", "Black",
                "Craig",
            ]),
            races: strings(&[
                "White",
                "Black",
                "Hispanic",
                "Asian",
                "Arab",
                "Native American",
                "Pacific Islander",
                "Multiracial",
            ]),
            professions: default_profession_map().into_keys().collect(),
        }
    }
}

fn default_seed_products() -> Vec<SeedProduct> {
    vec![
        SeedProduct::new("Whole Milk", 4.00, 120, "Dairy"),
        SeedProduct::new("Cheddar Cheese", 6.00, 45, "Dairy"),
        SeedProduct::new("Greek Yogurt", 4.00, 80, "Dairy"),
        SeedProduct::new("Butter", 2.00, 60, "Dairy"),
        SeedProduct::new("Bananas", 0.50, 200, "Produce"),
        SeedProduct::new("Avocados", 2.50, 60, "Produce"),
        SeedProduct::new("Baby Spinach", 4.00, 35, "Produce"),
        SeedProduct::new("Strawberries", 6.00, 40, "Produce"),
        SeedProduct::new("Chicken Breast", 8.00, 50, "Meat"),
        SeedProduct::new("Ground Beef", 6.00, 40, "Meat"),
        SeedProduct::new("Salmon Fillet", 12.00, 25, "Meat"),
        SeedProduct::new("Sourdough Bread", 4.00, 30, "Bakery"),
        SeedProduct::new("Croissants", 4.00, 25, "Bakery"),
        SeedProduct::new("Bagels", 4.00, 50, "Bakery"),
        SeedProduct::new("Orange Juice", 4.00, 55, "Beverages"),
        SeedProduct::new("Water Case", 4.00, 15, "Beverages"),
        SeedProduct::new("Sparkling Water", 2.00, 150, "Beverages"),
        SeedProduct::new("Apple Juice", 4.00, 40, "Beverages"),
        SeedProduct::new("Pasta", 2.00, 90, "Pantry"),
        SeedProduct::new("Olive Oil", 8.00, 20, "Pantry"),
        SeedProduct::new("Rice", 4.00, 70, "Pantry"),
        SeedProduct::new("Canned Tomatoes", 2.00, 85, "Pantry"),
        SeedProduct::new("Granola Bars", 4.00, 8, "Snacks"),
        SeedProduct::new("Potato Chips", 4.00, 55, "Snacks"),
        SeedProduct::new("Trail Mix", 6.00, 30, "Snacks"),
        SeedProduct::new("Chocolate Cake", 8.00, 15, "Desserts"),
        SeedProduct::new("Ice Cream", 4.00, 40, "Desserts"),
        SeedProduct::new("Cheesecake", 10.00, 12, "Desserts"),
        SeedProduct::new("Brownies", 4.00, 20, "Desserts"),
        SeedProduct::new("Craft Beer 6-Pack", 11.00, 40, "Alcohol"),
        SeedProduct::new("Red Wine", 14.00, 30, "Alcohol"),
        SeedProduct::new("Hard Seltzer 12-Pack", 9.00, 45, "Alcohol"),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
