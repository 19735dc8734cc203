//! Simulated collaborators for demos and local runs.
//!
//! These stand in for a real ERP source, automation engine and notification
//! channel. They perform no I/O and return immediately; the endpoint they
//! carry is only reported in logs.

use crate::client::{Acknowledgement, NotificationSink, ProcessingSystemClient, SourceSystemClient};
use crate::error::SyncResult;
use recordsync_protocol::{Record, RecordSet, RecordStatus};
use std::sync::atomic::{AtomicU64, Ordering};

/// The demo snapshot: three pending orders.
pub fn demo_records() -> RecordSet {
    RecordSet::new(vec![
        Record::pending(1001, "Order A"),
        Record::pending(1002, "Order B"),
        Record::pending(1003, "Order C"),
    ])
}

/// A source that serves a fixed record set.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    endpoint: String,
    records: RecordSet,
}

impl FixtureSource {
    /// Creates a source serving [`demo_records`].
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_records(endpoint, demo_records())
    }

    /// Creates a source serving `records`.
    pub fn with_records(endpoint: impl Into<String>, records: RecordSet) -> Self {
        Self {
            endpoint: endpoint.into(),
            records,
        }
    }

    /// Returns the endpoint this source pretends to call.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SourceSystemClient for FixtureSource {
    fn fetch(&self) -> SyncResult<RecordSet> {
        tracing::debug!(endpoint = %self.endpoint, "fetching from source system");
        Ok(self.records.clone())
    }
}

/// An automation engine that accepts every record and marks it processed.
#[derive(Debug, Clone)]
pub struct SimulatedAutomationEngine {
    endpoint: String,
}

impl SimulatedAutomationEngine {
    /// Creates an engine reachable at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint this engine pretends to be reached at.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProcessingSystemClient for SimulatedAutomationEngine {
    fn submit(&self, records: &RecordSet) -> SyncResult<RecordSet> {
        tracing::debug!(
            endpoint = %self.endpoint,
            count = records.len(),
            "posting records to processing system"
        );
        Ok(records
            .iter()
            .map(|r| r.with_status(RecordStatus::Processed))
            .collect())
    }
}

/// A sink that writes each notification to the log.
#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: AtomicU64,
}

impl LogNotifier {
    /// Creates a log notifier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationSink for LogNotifier {
    fn notify(&self, message: &str) -> SyncResult<Acknowledgement> {
        let sequence = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(sequence, "notification: {message}");
        Ok(Acknowledgement::new(format!("log-{sequence}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_source_serves_demo_orders() {
        let source = FixtureSource::new("https://erp.test");
        let records = source.fetch().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records.get(0).map(|r| r.name.as_str()), Some("Order A"));
        assert!(records.iter().all(|r| r.status == RecordStatus::Pending));
    }

    #[test]
    fn automation_engine_preserves_identity() {
        let engine = SimulatedAutomationEngine::new("https://engine.test");
        let result = engine.submit(&demo_records()).unwrap();

        assert_eq!(result.ids(), demo_records().ids());
        assert!(result.iter().all(|r| r.status.is_processed()));
    }

    #[test]
    fn log_notifier_numbers_receipts() {
        let notifier = LogNotifier::new();
        assert_eq!(notifier.notify("a").unwrap().receipt, "log-1");
        assert_eq!(notifier.notify("b").unwrap().receipt, "log-2");
    }
}
