//! Error types for the sync engine.

use crate::checker::ConsistencyReport;
use crate::state::SyncState;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during a sync run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// The source system could not be reached.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The processing system could not be reached.
    #[error("downstream unavailable: {0}")]
    DownstreamUnavailable(String),

    /// The processing system refused the submission.
    #[error("downstream rejected submission: {0}")]
    DownstreamRejected(String),

    /// The submitted and returned record sets disagree.
    #[error("Data consistency check failed.")]
    ConsistencyViolation(ConsistencyReport),

    /// The completion notification could not be delivered.
    #[error("notification undeliverable: {0}")]
    NotificationUndeliverable(String),

    /// A run was requested while another run was active.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        /// Current state.
        from: SyncState,
        /// Attempted target state.
        to: SyncState,
    },
}

impl SyncError {
    /// Returns the state in which this error aborts a run.
    pub fn failed_stage(&self) -> SyncState {
        match self {
            SyncError::UpstreamUnavailable(_) => SyncState::Fetching,
            SyncError::DownstreamUnavailable(_) | SyncError::DownstreamRejected(_) => {
                SyncState::Submitting
            }
            SyncError::ConsistencyViolation(_) => SyncState::Verifying,
            SyncError::NotificationUndeliverable(_) => SyncState::Notifying,
            SyncError::InvalidStateTransition { from, .. } => *from,
        }
    }

    /// Returns true if this error aborts a run.
    ///
    /// Notification failures are reported but never downgrade a run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SyncError::NotificationUndeliverable(_))
    }

    /// Returns the consistency report carried by a consistency violation.
    pub fn consistency_report(&self) -> Option<&ConsistencyReport> {
        match self {
            SyncError::ConsistencyViolation(report) => Some(report),
            _ => None,
        }
    }
}
