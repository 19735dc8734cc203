//! Ordered record collections.

use crate::error::ProtocolResult;
use crate::record::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// An ordered collection of records produced by one stage and consumed by
/// the next.
///
/// Position `i` of a set handed to the processing system corresponds to
/// position `i` of the set it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Creates a record set from a list of records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Creates an empty record set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the set has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `position`.
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the identifiers in order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(Record::id).collect()
    }

    /// Consumes the set and returns its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Encodes the set as a JSON array.
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a set from a JSON array.
    pub fn from_json(json: &str) -> ProtocolResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordStatus;

    fn orders() -> RecordSet {
        RecordSet::new(vec![
            Record::pending(1001, "Order A"),
            Record::pending(1002, "Order B"),
            Record::pending(1003, "Order C"),
        ])
    }

    #[test]
    fn ids_follow_order() {
        assert_eq!(
            orders().ids(),
            vec![RecordId(1001), RecordId(1002), RecordId(1003)]
        );
    }

    #[test]
    fn collect_preserves_positions() {
        let processed: RecordSet = orders()
            .iter()
            .map(|r| r.with_status(RecordStatus::Processed))
            .collect();

        assert_eq!(processed.len(), 3);
        assert_eq!(processed.get(2).map(Record::id), Some(RecordId(1003)));
        assert!(processed.iter().all(|r| r.status.is_processed()));
    }

    #[test]
    fn json_is_a_plain_array() {
        let json = orders().to_json().unwrap();
        assert!(json.trim_start().starts_with('['));

        let decoded = RecordSet::from_json(&json).unwrap();
        assert_eq!(decoded, orders());
    }

    #[test]
    fn from_json_rejects_non_array() {
        assert!(RecordSet::from_json(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn empty_set() {
        let set = RecordSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.get(0).is_none());
    }
}
