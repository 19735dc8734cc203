//! # RecordSync Testkit
//!
//! Test utilities for RecordSync.
//!
//! This crate provides:
//! - Record fixtures, including the three-order happy path
//! - A fault-injecting processing system
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recordsync_testkit::prelude::*;
//!
//! #[test]
//! fn dropped_record_fails() {
//!     let processor = FaultyProcessor::new(Fault::DropLast);
//!     let result = processor.submit(&sample_orders()).unwrap();
//!     assert!(!verify(&sample_orders(), &result));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
