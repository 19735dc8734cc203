//! Observability hooks for sync runs.
//!
//! The orchestrator reports progress through an injected [`SyncObserver`]
//! rather than a process-wide logger, so each orchestrator instance (and
//! each test) sees only its own events.

use crate::checker::ConsistencyReport;
use crate::client::Acknowledgement;
use crate::state::SyncState;
use parking_lot::Mutex;

/// A progress event emitted during a sync run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A run was accepted.
    RunStarted {
        /// Source system endpoint.
        source_endpoint: String,
        /// Processing system endpoint.
        processing_endpoint: String,
    },
    /// The orchestrator entered a new stage.
    StageEntered(SyncState),
    /// The source returned a snapshot.
    Fetched {
        /// Number of records fetched.
        count: usize,
    },
    /// The processing system returned its result set.
    Submitted {
        /// Number of records returned.
        count: usize,
    },
    /// The consistency check failed.
    ConsistencyViolated(ConsistencyReport),
    /// The completion notification was delivered.
    NotificationDelivered(Acknowledgement),
    /// The completion notification could not be delivered.
    NotificationFailed {
        /// Why delivery failed.
        reason: String,
    },
    /// The run completed successfully.
    Completed {
        /// Number of records synchronized.
        count: usize,
    },
    /// The run was aborted.
    Failed {
        /// Stage that failed.
        stage: SyncState,
        /// Failure reason.
        reason: String,
    },
}

/// Receives progress events from the orchestrator.
pub trait SyncObserver: Send + Sync {
    /// Called for every event, in the order events occur.
    fn on_event(&self, event: &SyncEvent);
}

/// Emits events as `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn on_event(&self, event: &SyncEvent) {
        match event {
            SyncEvent::RunStarted {
                source_endpoint,
                processing_endpoint,
            } => tracing::info!(
                source = %source_endpoint,
                processing = %processing_endpoint,
                "initiating data synchronization"
            ),
            SyncEvent::StageEntered(state) => tracing::debug!(stage = ?state, "entering stage"),
            SyncEvent::Fetched { count } => {
                tracing::info!(count, "records retrieved from source system")
            }
            SyncEvent::Submitted { count } => {
                tracing::info!(count, "records returned by processing system")
            }
            SyncEvent::ConsistencyViolated(report) => {
                for violation in report.iter() {
                    tracing::warn!(%violation, "consistency violation");
                }
                tracing::error!(violations = report.len(), "data consistency check failed");
            }
            SyncEvent::NotificationDelivered(ack) => {
                tracing::info!(receipt = %ack.receipt, "notification delivered")
            }
            SyncEvent::NotificationFailed { reason } => {
                tracing::warn!(%reason, "notification undeliverable; sync result unaffected")
            }
            SyncEvent::Completed { count } => tracing::info!(count, "synchronization completed"),
            SyncEvent::Failed { stage, reason } => {
                tracing::error!(stage = ?stage, %reason, "synchronization failed")
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn on_event(&self, _event: &SyncEvent) {}
}

/// Records events in memory for testing.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    events: Mutex<Vec<SyncEvent>>,
}

impl MemoryObserver {
    /// Creates an empty memory observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every event recorded so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().clone()
    }

    /// Returns the stages entered, in order.
    pub fn stages(&self) -> Vec<SyncState> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SyncEvent::StageEntered(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Clears recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl SyncObserver for MemoryObserver {
    fn on_event(&self, event: &SyncEvent) {
        self.events.lock().push(event.clone());
    }
}

impl<O: SyncObserver + ?Sized> SyncObserver for std::sync::Arc<O> {
    fn on_event(&self, event: &SyncEvent) {
        (**self).on_event(event);
    }
}
