//! The result of one orchestration run.

use crate::error::ProtocolResult;
use crate::record_set::RecordSet;
use serde::{Deserialize, Serialize};

/// Outcome of a single sync run.
///
/// Produced once per run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Fetch, submit and verification all succeeded.
    Success {
        /// Human-readable, count-based completion message.
        message: String,
        /// The record set returned by the processing system.
        records: RecordSet,
    },
    /// The run was aborted.
    Failure {
        /// Why the run was aborted.
        reason: String,
    },
}

impl SyncOutcome {
    /// Creates a success outcome.
    pub fn success(message: impl Into<String>, records: RecordSet) -> Self {
        SyncOutcome::Success {
            message: message.into(),
            records,
        }
    }

    /// Creates a failure outcome.
    pub fn failure(reason: impl Into<String>) -> Self {
        SyncOutcome::Failure {
            reason: reason.into(),
        }
    }

    /// Returns true for a success outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Success { .. })
    }

    /// Returns the completion message of a success outcome.
    pub fn message(&self) -> Option<&str> {
        match self {
            SyncOutcome::Success { message, .. } => Some(message),
            SyncOutcome::Failure { .. } => None,
        }
    }

    /// Returns the reason of a failure outcome.
    pub fn reason(&self) -> Option<&str> {
        match self {
            SyncOutcome::Success { .. } => None,
            SyncOutcome::Failure { reason } => Some(reason),
        }
    }

    /// Returns the final record set of a success outcome.
    pub fn records(&self) -> Option<&RecordSet> {
        match self {
            SyncOutcome::Success { records, .. } => Some(records),
            SyncOutcome::Failure { .. } => None,
        }
    }

    /// Encodes the outcome as JSON.
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn success_accessors() {
        let records = RecordSet::new(vec![Record::pending(1, "a")]);
        let outcome = SyncOutcome::success("1 records synchronized successfully.", records.clone());

        assert!(outcome.is_success());
        assert_eq!(outcome.message(), Some("1 records synchronized successfully."));
        assert_eq!(outcome.records(), Some(&records));
        assert_eq!(outcome.reason(), None);
    }

    #[test]
    fn failure_accessors() {
        let outcome = SyncOutcome::failure("Data consistency check failed.");

        assert!(!outcome.is_success());
        assert_eq!(outcome.reason(), Some("Data consistency check failed."));
        assert!(outcome.message().is_none());
        assert!(outcome.records().is_none());
    }

    #[test]
    fn success_json_shape() {
        let records = RecordSet::new(vec![Record::new(
            1001,
            "Order A",
            crate::record::RecordStatus::Processed,
        )]);
        let json = SyncOutcome::success("1 records synchronized successfully.", records)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "outcome": "success",
                "message": "1 records synchronized successfully.",
                "records": [{"id": 1001, "name": "Order A", "status": "Processed"}],
            })
        );

        let decoded: SyncOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.message(), Some("1 records synchronized successfully."));
    }

    #[test]
    fn json_is_tagged() {
        let json = SyncOutcome::failure("boom").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"], "failure");
        assert_eq!(value["reason"], "boom");
    }
}
