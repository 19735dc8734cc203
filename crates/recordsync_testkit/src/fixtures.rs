//! Record fixtures.

use recordsync_protocol::{Record, RecordSet, RecordStatus};

/// The three pending orders used by the happy-path scenarios.
pub fn sample_orders() -> RecordSet {
    RecordSet::new(vec![
        Record::pending(1001, "A"),
        Record::pending(1002, "B"),
        Record::pending(1003, "C"),
    ])
}

/// A pending record set with the given identifiers, named after them.
pub fn pending_set(ids: &[u64]) -> RecordSet {
    ids.iter()
        .map(|&id| Record::pending(id, format!("Record {id}")))
        .collect()
}

/// Returns `records` with every status set to `Processed`.
pub fn processed(records: &RecordSet) -> RecordSet {
    records
        .iter()
        .map(|r| r.with_status(RecordStatus::Processed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordsync_protocol::RecordId;

    #[test]
    fn processed_keeps_ids_and_names() {
        let orders = sample_orders();
        let done = processed(&orders);

        assert_eq!(done.ids(), orders.ids());
        assert!(done.iter().all(|r| r.status.is_processed()));
        assert_eq!(done.get(1).map(|r| r.name.as_str()), Some("B"));
    }

    #[test]
    fn pending_set_names_records() {
        let set = pending_set(&[5, 6]);
        assert_eq!(set.ids(), vec![RecordId(5), RecordId(6)]);
        assert_eq!(set.get(0).map(|r| r.name.as_str()), Some("Record 5"));
    }
}
