//! # Events and Approval
//!
//! The two seams between the scheduler and its presentation layer:
//! - `EventSink` receives every observable step of the week, in order
//! - `ApprovalGate` answers yes/no for clearance and surge proposals
//!
//! Both traits are synchronous. A presentation layer running the scheduler
//! on a worker thread forwards events over a queue and blocks inside
//! `request_approval` until the foreground answers.

use serde::{Deserialize, Serialize};

use crate::catalog::RestockLine;
use crate::report::{DayReport, WeekReport};
use crate::shopper::Shopper;
use crate::types::{ProductId, PurchaseReceipt};

// =============================================================================
// PRICE PROPOSALS
// =============================================================================

/// What kind of price change is being proposed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProposalKind {
    /// Permanent discount on overstocked products.
    Clearance { discount: f64 },
    /// Same-day markup on the volatile category, reverted at day end.
    Surge { rate: f64 },
}

/// One product's proposed price change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub old_price: f64,
    pub new_price: f64,
}

/// A batch of price changes awaiting approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceProposal {
    pub day: String,
    pub kind: ProposalKind,
    pub items: Vec<PriceChange>,
}

impl PriceProposal {
    #[must_use]
    pub fn is_clearance(&self) -> bool {
        matches!(self.kind, ProposalKind::Clearance { .. })
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// One observable step of the simulated week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    DayStarted {
        day: String,
        traffic: f64,
        delivery: bool,
        clearance: bool,
        surge_rate: Option<f64>,
    },
    DeliveryCompleted {
        day: String,
        lines: Vec<RestockLine>,
        total_units: u32,
    },
    ProposalResolved {
        proposal: PriceProposal,
        approved: bool,
    },
    SurgeReverted {
        day: String,
        restored: usize,
    },
    BlockStarted {
        block: String,
        customers: u32,
        max_cart: u32,
    },
    /// Emitted once the cart is built, before its purchases.
    CustomerServed {
        number: u64,
        shopper: Shopper,
        cart_size: usize,
    },
    PurchaseSucceeded {
        receipt: PurchaseReceipt,
    },
    PurchaseFailed {
        id: ProductId,
        name: String,
        customer: String,
        requested: u32,
        available: u32,
        /// Shelf price at the moment of the failed attempt.
        unit_price: f64,
    },
    LowStock {
        id: ProductId,
        name: String,
        remaining: u32,
    },
    ShelvesEmpty {
        block: String,
    },
    BlockClosed {
        block: String,
        revenue: f64,
    },
    OvernightRestock {
        lines: Vec<RestockLine>,
    },
    DayClosed {
        report: DayReport,
    },
    WeekComplete {
        report: Box<WeekReport>,
    },
}

/// A `SimEvent` stamped with its position in the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Strictly increasing within one run, starting at 0.
    pub seq: u64,
    /// Zero-based day index.
    pub day: usize,
    pub event: SimEvent,
}

// =============================================================================
// SINKS
// =============================================================================

/// Receiver of simulation events.
pub trait EventSink {
    fn emit(&mut self, record: EventRecord);
}

impl EventSink for Vec<EventRecord> {
    fn emit(&mut self, record: EventRecord) {
        self.push(record);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _record: EventRecord) {}
}

// =============================================================================
// APPROVAL
// =============================================================================

/// Answers price-change proposals.
pub trait ApprovalGate {
    fn request_approval(&mut self, proposal: &PriceProposal) -> bool;
}

/// Gives the same answer to every proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoApprove(pub bool);

impl ApprovalGate for AutoApprove {
    fn request_approval(&mut self, _proposal: &PriceProposal) -> bool {
        self.0
    }
}

/// Separate fixed answers for clearance and surge proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    pub clearance: bool,
    pub surge: bool,
}

impl ApprovalGate for ApprovalPolicy {
    fn request_approval(&mut self, proposal: &PriceProposal) -> bool {
        match proposal.kind {
            ProposalKind::Clearance { .. } => self.clearance,
            ProposalKind::Surge { .. } => self.surge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(kind: ProposalKind) -> PriceProposal {
        PriceProposal {
            day: "Friday".to_string(),
            kind,
            items: Vec::new(),
        }
    }

    #[test]
    fn policy_answers_by_kind() {
        let mut policy = ApprovalPolicy {
            clearance: true,
            surge: false,
        };
        assert!(policy.request_approval(&proposal(ProposalKind::Clearance { discount: 0.5 })));
        assert!(!policy.request_approval(&proposal(ProposalKind::Surge { rate: 0.25 })));
        assert!(!AutoApprove(false).request_approval(&proposal(ProposalKind::Surge { rate: 0.1 })));
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<EventRecord> = Vec::new();
        for seq in 0..3 {
            sink.emit(EventRecord {
                seq,
                day: 0,
                event: SimEvent::ShelvesEmpty {
                    block: "Night".to_string(),
                },
            });
        }
        assert_eq!(sink.iter().map(|r| r.seq).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
