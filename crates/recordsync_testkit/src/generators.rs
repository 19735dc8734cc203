//! Property-based test generators using proptest.
//!
//! Record sets produced here always have unique identifiers, matching what
//! a source system hands to the pipeline.

use proptest::prelude::*;
use recordsync_protocol::{Record, RecordId, RecordSet, RecordStatus};

/// Strategy for generating record identifiers.
pub fn record_id_strategy() -> impl Strategy<Value = RecordId> {
    (1u64..1_000_000).prop_map(RecordId)
}

/// Strategy for generating display names.
pub fn record_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,15}").expect("Invalid regex")
}

/// Strategy for generating statuses other than `Processed`.
pub fn unprocessed_status_strategy() -> impl Strategy<Value = RecordStatus> {
    prop_oneof![
        3 => Just(RecordStatus::Pending),
        1 => prop::string::string_regex("(Failed|OnHold|Queued|processed)")
            .expect("Invalid regex")
            .prop_map(RecordStatus::Other),
    ]
}

/// Strategy for generating any status.
pub fn record_status_strategy() -> impl Strategy<Value = RecordStatus> {
    prop_oneof![
        Just(RecordStatus::Processed),
        unprocessed_status_strategy(),
    ]
}

/// Strategy for generating pending record sets with unique identifiers.
pub fn record_set_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = RecordSet> {
    prop::collection::btree_set(record_id_strategy(), min_len..max_len)
        .prop_flat_map(|ids| {
            let len = ids.len();
            (
                Just(ids.into_iter().collect::<Vec<_>>()).prop_shuffle(),
                prop::collection::vec(record_name_strategy(), len),
            )
        })
        .prop_map(|(ids, names)| {
            ids.into_iter()
                .zip(names)
                .map(|(id, name)| Record::pending(id, name))
                .collect::<RecordSet>()
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
