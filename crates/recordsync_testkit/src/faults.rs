//! Fault-injecting processing system.
//!
//! [`FaultyProcessor`] processes records the way a healthy downstream system
//! would, then applies one [`Fault`] to the result (or fails outright), so
//! tests can exercise each consistency violation and each collaborator
//! failure in isolation.

use crate::fixtures::processed;
use recordsync_engine::{ProcessingSystemClient, SyncError, SyncResult};
use recordsync_protocol::{Record, RecordId, RecordSet, RecordStatus};

/// A defect to inject into the processing system's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Behave correctly.
    None,
    /// Drop the last record.
    DropLast,
    /// Return the first record twice.
    DuplicateFirst,
    /// Return the records in reverse order.
    Reverse,
    /// Leave the record at this position `Pending`.
    LeavePending(usize),
    /// Replace the identifier at `position` with `id`.
    RewriteId {
        /// Position to rewrite.
        position: usize,
        /// Identifier to write there.
        id: u64,
    },
    /// Fail as unreachable.
    Unavailable,
    /// Reject the submission with a reason.
    Reject(String),
}

/// A processing system that misbehaves in one configured way.
#[derive(Debug, Clone)]
pub struct FaultyProcessor {
    fault: Fault,
}

impl FaultyProcessor {
    /// Creates a processor injecting `fault`.
    pub fn new(fault: Fault) -> Self {
        Self { fault }
    }

    /// Returns the injected fault.
    pub fn fault(&self) -> &Fault {
        &self.fault
    }
}

impl ProcessingSystemClient for FaultyProcessor {
    fn submit(&self, records: &RecordSet) -> SyncResult<RecordSet> {
        let mut result = processed(records).into_records();

        match &self.fault {
            Fault::None => {}
            Fault::DropLast => {
                result.pop();
            }
            Fault::DuplicateFirst => {
                if let Some(first) = result.first().cloned() {
                    result.insert(0, first);
                }
            }
            Fault::Reverse => result.reverse(),
            Fault::LeavePending(position) => {
                if let Some(record) = result.get_mut(*position) {
                    record.status = RecordStatus::Pending;
                }
            }
            Fault::RewriteId { position, id } => {
                if let Some(record) = result.get_mut(*position) {
                    *record = Record::new(RecordId::new(*id), record.name.clone(), record.status.clone());
                }
            }
            Fault::Unavailable => {
                return Err(SyncError::DownstreamUnavailable(
                    "processing system unreachable".into(),
                ))
            }
            Fault::Reject(reason) => return Err(SyncError::DownstreamRejected(reason.clone())),
        }

        Ok(RecordSet::new(result))
    }
}
