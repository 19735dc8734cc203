//! Collaborator interfaces for the three external systems.
//!
//! These traits abstract the remote systems the orchestrator talks to,
//! allowing different implementations (HTTP, message queue, in-memory
//! doubles for testing, etc.). Every call is synchronous and single-shot:
//! one call, one complete answer or one error.

use crate::error::{SyncError, SyncResult};
use parking_lot::Mutex;
use recordsync_protocol::{RecordSet, RecordStatus};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// The upstream source-of-record system.
pub trait SourceSystemClient: Send + Sync {
    /// Fetches one complete snapshot of records.
    ///
    /// Fails with [`SyncError::UpstreamUnavailable`] if the source cannot be
    /// reached.
    fn fetch(&self) -> SyncResult<RecordSet>;
}

/// The downstream processing system.
pub trait ProcessingSystemClient: Send + Sync {
    /// Submits `records` and returns the processing system's view of them.
    ///
    /// On success the returned set must correspond position by position to
    /// `records`. An implementation that cannot honor this must fail with
    /// [`SyncError::DownstreamRejected`] instead of returning a partial set.
    fn submit(&self, records: &RecordSet) -> SyncResult<RecordSet>;
}

/// Delivers human-readable completion messages.
pub trait NotificationSink: Send + Sync {
    /// Delivers `message`.
    ///
    /// Fails with [`SyncError::NotificationUndeliverable`].
    fn notify(&self, message: &str) -> SyncResult<Acknowledgement>;
}

/// Receipt for a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Sink-specific delivery receipt.
    pub receipt: String,
}

impl Acknowledgement {
    /// Creates an acknowledgement with the given receipt.
    pub fn new(receipt: impl Into<String>) -> Self {
        Self {
            receipt: receipt.into(),
        }
    }
}

/// A mock source for testing.
#[derive(Debug, Default)]
pub struct MockSource {
    records: Mutex<RecordSet>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl MockSource {
    /// Creates a mock source returning `records`.
    pub fn new(records: RecordSet) -> Self {
        Self {
            records: Mutex::new(records),
            unavailable: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Sets the records returned by the next fetch.
    pub fn set_records(&self, records: RecordSet) {
        *self.records.lock() = records;
    }

    /// Sets whether the source is reachable.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Returns the number of fetch calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SourceSystemClient for MockSource {
    fn fetch(&self) -> SyncResult<RecordSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SyncError::UpstreamUnavailable(
                "mock source offline".into(),
            ));
        }
        Ok(self.records.lock().clone())
    }
}

/// A mock processing system for testing.
///
/// By default it returns every submitted record marked `Processed`. A fixed
/// response, an outage or a rejection can be configured instead.
#[derive(Debug, Default)]
pub struct MockProcessor {
    response: Mutex<Option<RecordSet>>,
    rejection: Mutex<Option<String>>,
    unavailable: AtomicBool,
    submissions: Mutex<Vec<RecordSet>>,
}

impl MockProcessor {
    /// Creates a mock processor that marks every record `Processed`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `response` from every submit instead of processing the input.
    pub fn set_response(&self, response: RecordSet) {
        *self.response.lock() = Some(response);
    }

    /// Rejects every submission with `reason`.
    pub fn set_rejection(&self, reason: impl Into<String>) {
        *self.rejection.lock() = Some(reason.into());
    }

    /// Sets whether the processing system is reachable.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Returns every record set submitted so far.
    pub fn submissions(&self) -> Vec<RecordSet> {
        self.submissions.lock().clone()
    }
}

impl ProcessingSystemClient for MockProcessor {
    fn submit(&self, records: &RecordSet) -> SyncResult<RecordSet> {
        self.submissions.lock().push(records.clone());

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SyncError::DownstreamUnavailable(
                "mock processor offline".into(),
            ));
        }
        if let Some(reason) = self.rejection.lock().clone() {
            return Err(SyncError::DownstreamRejected(reason));
        }
        if let Some(response) = self.response.lock().clone() {
            return Ok(response);
        }

        Ok(records
            .iter()
            .map(|r| r.with_status(RecordStatus::Processed))
            .collect())
    }
}

/// A mock notification sink for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    undeliverable: AtomicBool,
    messages: Mutex<Vec<String>>,
}

impl MockNotifier {
    /// Creates a mock sink that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether messages can be delivered.
    pub fn set_deliverable(&self, deliverable: bool) {
        self.undeliverable.store(!deliverable, Ordering::SeqCst);
    }

    /// Returns every message passed to `notify`, delivered or not.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl NotificationSink for MockNotifier {
    fn notify(&self, message: &str) -> SyncResult<Acknowledgement> {
        let mut messages = self.messages.lock();
        messages.push(message.to_string());

        if self.undeliverable.load(Ordering::SeqCst) {
            return Err(SyncError::NotificationUndeliverable(
                "mock sink refused delivery".into(),
            ));
        }
        Ok(Acknowledgement::new(format!("mock-{}", messages.len())))
    }
}
