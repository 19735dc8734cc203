//! # RecordSync Protocol
//!
//! Data types shared by every stage of the RecordSync pipeline.
//!
//! This crate provides:
//! - `Record` with its `RecordId` and `RecordStatus`
//! - `RecordSet`, the ordered collection passed between stages
//! - `SyncOutcome`, the single result of one orchestration run
//! - JSON encoding/decoding for record sets and outcomes
//!
//! This is a pure data crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod outcome;
mod record;
mod record_set;

pub use error::{ProtocolError, ProtocolResult};
pub use outcome::SyncOutcome;
pub use record::{Record, RecordId, RecordStatus};
pub use record_set::RecordSet;
