//! # shelfsim-core
//!
//! The week-long grocery store simulation engine for Shelfsim - THE LOGIC.
//!
//! This crate holds every part of the system with algorithmic content:
//! - `store`: a chained associative store with prime-sized dynamic resize
//! - `catalog`: products by id plus a category index, both on `store`
//! - `demand`: shopper-profile selection, cart building, purchase quantities
//! - `scheduler`: the seven-day state machine (deliveries, clearance and
//!   surge pricing, time blocks, overnight restock) and its aggregates
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO network, NO file I/O
//! - Single writer: the `Scheduler` owns the `Catalog` while a week runs
//! - Randomness is injected through seeded generators
//! - Presentation is reached only through `EventSink` and `ApprovalGate`

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod config;
pub mod demand;
pub mod events;
pub mod report;
pub mod scheduler;
pub mod shopper;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{Product, ProductId, PurchaseReceipt, ShelfError, round_cents};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::{Catalog, CatalogOptions, CatalogStats, ProductFilter, RestockLine};
pub use config::{
    BlockOverride, DayConfig, InventoryConfig, NamePools, PurchaseTier, SeedProduct,
    ShopperProfile, SimConfig, TimeBlock, WarehouseAllotment, WeekConfig,
};
pub use demand::{DEFAULT_CATEGORY_WEIGHT, DemandModel, weighted_index};
pub use events::{
    ApprovalGate, ApprovalPolicy, AutoApprove, EventRecord, EventSink, NullSink, PriceChange,
    PriceProposal, ProposalKind, SimEvent,
};
pub use report::{DayReport, DeliveryRecord, LowStockLine, SurgeRecord, WeekReport};
pub use scheduler::{BlockPlan, DayPlan, Phase, Scheduler};
pub use shopper::Shopper;
pub use store::{AssociativeStore, CollisionStats, Entry, StoreKey};
