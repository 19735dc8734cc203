//! # RecordSync Engine
//!
//! Sync orchestrator and consistency checker for RecordSync.
//!
//! This crate provides:
//! - Orchestrator state machine (idle → fetching → submitting → verifying →
//!   notifying → completed, or failed)
//! - Positional and identifier-keyed consistency checking
//! - Collaborator traits for the source, processing and notification systems
//! - An injected observer for progress events
//! - In-memory mocks and simulated collaborators
//!
//! ## Key Invariants
//!
//! - Stages run strictly in order; each consumes the previous stage's output
//! - Identifiers, cardinality and `Processed` status are verified after
//!   submission
//! - A consistency violation aborts the run and is never repaired or retried
//! - Notification is best-effort and never downgrades a successful run
//! - No state is shared between orchestrator instances

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod client;
mod config;
mod error;
mod observer;
mod simulated;
mod state;

pub use checker::{verify, CheckMode, ConsistencyChecker, ConsistencyReport, Violation};
pub use client::{
    Acknowledgement, MockNotifier, MockProcessor, MockSource, NotificationSink,
    ProcessingSystemClient, SourceSystemClient,
};
pub use config::{SyncConfig, DEFAULT_PROCESSING_ENDPOINT, DEFAULT_SOURCE_ENDPOINT};
pub use error::{SyncError, SyncResult};
pub use observer::{MemoryObserver, NoopObserver, SyncEvent, SyncObserver, TracingObserver};
pub use simulated::{demo_records, FixtureSource, LogNotifier, SimulatedAutomationEngine};
pub use state::{
    success_message, NotificationStatus, SyncOrchestrator, SyncReport, SyncState, SyncStats,
};
