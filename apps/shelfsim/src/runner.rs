//! # Worker Bridge
//!
//! Runs the scheduler on a blocking worker thread while the foreground task
//! renders and answers approvals.
//!
//! ```text
//!  worker (spawn_blocking)                 foreground (async)
//!  ┌──────────────────────┐   mpsc    ┌──────────────────────┐
//!  │ Scheduler::run_week  │──────────▶│ render events        │
//!  │   ChannelSink        │  Event    │                      │
//!  │   ChannelGate ───────│─Approval─▶│ ask user / policy    │
//!  │     blocking_recv ◀──│──oneshot──│   respond.send(bool) │
//!  └──────────────────────┘           └──────────────────────┘
//! ```
//!
//! All traffic is one-directional through a single queue; the only reply is
//! the one-shot answer to an approval request. A dropped responder counts as
//! "no".

use crate::prompt::Prompter;
use crate::render::{self, EventPrinter};
use shelfsim_core::{
    ApprovalGate, ApprovalPolicy, Catalog, EventRecord, EventSink, NullSink, PriceProposal,
    Scheduler, ShelfError, SimConfig, WeekReport,
};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// A message from the simulation worker to the foreground.
#[derive(Debug)]
pub enum WorkerMessage {
    Event(EventRecord),
    Approval {
        proposal: PriceProposal,
        respond: oneshot::Sender<bool>,
    },
}

/// Forwards events onto the worker queue.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<WorkerMessage>,
}

impl EventSink for ChannelSink {
    fn emit(&mut self, record: EventRecord) {
        // A closed queue means the foreground stopped listening.
        let _ = self.tx.send(WorkerMessage::Event(record));
    }
}

/// Asks the foreground for approval and blocks until it answers.
#[derive(Debug, Clone)]
pub struct ChannelGate {
    tx: mpsc::UnboundedSender<WorkerMessage>,
}

impl ApprovalGate for ChannelGate {
    fn request_approval(&mut self, proposal: &PriceProposal) -> bool {
        let (respond, answer) = oneshot::channel();
        let message = WorkerMessage::Approval {
            proposal: proposal.clone(),
            respond,
        };
        if self.tx.send(message).is_err() {
            tracing::warn!("Approval queue closed, declining proposal");
            return false;
        }
        answer.blocking_recv().unwrap_or(false)
    }
}

/// Outcome of a finished run: the report and the catalog as the week left it.
pub type RunOutcome = Result<(WeekReport, Catalog), ShelfError>;

/// A week running on a worker thread.
#[derive(Debug)]
pub struct WeekRun {
    pub messages: mpsc::UnboundedReceiver<WorkerMessage>,
    pub handle: JoinHandle<RunOutcome>,
}

impl WeekRun {
    /// Wait for the worker and collect its outcome.
    pub async fn finish(self) -> RunOutcome {
        join(self.handle).await
    }
}

/// Start a week on a blocking worker. Events and approval requests arrive on
/// `WeekRun::messages`; the queue closes when the worker finishes.
pub fn run_in_background(config: SimConfig, catalog: Catalog, seed: u64) -> WeekRun {
    let (tx, messages) = mpsc::unbounded_channel();
    let handle = tokio::task::spawn_blocking(move || {
        let mut sink = ChannelSink { tx: tx.clone() };
        let mut gate = ChannelGate { tx };
        let mut scheduler = Scheduler::new(config, catalog, seed)?;
        let report = scheduler.run_week(&mut sink, &mut gate)?;
        Ok((report, scheduler.into_catalog()))
    });
    WeekRun { messages, handle }
}

/// Run a whole week off the async runtime with fixed approval answers and no
/// event stream.
pub async fn run_with_policy(
    config: SimConfig,
    catalog: Catalog,
    seed: u64,
    policy: ApprovalPolicy,
) -> RunOutcome {
    let handle = tokio::task::spawn_blocking(move || {
        let mut scheduler = Scheduler::new(config, catalog, seed)?;
        let mut gate = policy;
        let report = scheduler.run_week(&mut NullSink, &mut gate)?;
        Ok((report, scheduler.into_catalog()))
    });
    join(handle).await
}

async fn join(handle: JoinHandle<RunOutcome>) -> RunOutcome {
    handle
        .await
        .map_err(|e| ShelfError::Io(format!("Simulation worker failed: {}", e)))?
}

// =============================================================================
// FOREGROUND
// =============================================================================

/// How the foreground answers approval requests.
pub enum Approver<'a> {
    /// Fixed answers, no prompt.
    Fixed(ApprovalPolicy),
    /// Show the proposal and ask on stdin.
    Ask {
        prompter: &'a mut Prompter,
        timeout: Option<Duration>,
    },
}

impl Approver<'_> {
    async fn answer(&mut self, proposal: &PriceProposal) -> bool {
        match self {
            Approver::Fixed(policy) => policy.request_approval(proposal),
            Approver::Ask { prompter, timeout } => {
                println!("\n{}", render::proposal_table(proposal));
                match prompter.confirm("Approve? (yes/no): ", *timeout).await {
                    Ok(yes) => yes,
                    Err(e) => {
                        tracing::warn!("Approval prompt failed, declining: {}", e);
                        false
                    }
                }
            }
        }
    }
}

/// Render a running week and answer its approval requests until the worker
/// finishes. Without a printer, events are drained silently.
pub async fn watch(
    mut run: WeekRun,
    printer: Option<EventPrinter>,
    approver: &mut Approver<'_>,
) -> RunOutcome {
    while let Some(message) = run.messages.recv().await {
        match message {
            WorkerMessage::Event(record) => {
                if let Some(printer) = &printer {
                    printer.print(&record).await;
                }
            }
            WorkerMessage::Approval { proposal, respond } => {
                let approved = approver.answer(&proposal).await;
                if respond.send(approved).is_err() {
                    tracing::warn!("Simulation worker stopped before the answer arrived");
                }
            }
        }
    }
    run.finish().await
}
