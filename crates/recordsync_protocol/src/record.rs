//! Records and their identifiers and statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a record.
///
/// Assigned by the source system and preserved through every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Creates a record ID from its numeric value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processing status of a record.
///
/// Serialized as its plain string name. Values other than `Pending` and
/// `Processed` are kept verbatim in [`RecordStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    /// Not yet handled by the processing system.
    Pending,
    /// Accepted and handled by the processing system.
    Processed,
    /// Any other domain-specific status.
    Other(String),
}

impl RecordStatus {
    /// Returns the status name.
    pub fn as_str(&self) -> &str {
        match self {
            RecordStatus::Pending => "Pending",
            RecordStatus::Processed => "Processed",
            RecordStatus::Other(name) => name,
        }
    }

    /// Returns true if the status is `Processed`.
    pub fn is_processed(&self) -> bool {
        matches!(self, RecordStatus::Processed)
    }
}

impl From<String> for RecordStatus {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Pending" => RecordStatus::Pending,
            "Processed" => RecordStatus::Processed,
            _ => RecordStatus::Other(name),
        }
    }
}

impl From<&str> for RecordStatus {
    fn from(name: &str) -> Self {
        RecordStatus::from(name.to_string())
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single unit of work moving through the sync pipeline.
///
/// The identifier is fixed once the record is fetched; only the status is
/// expected to change between stages, via [`Record::with_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    /// Display name (opaque to the pipeline).
    pub name: String,
    /// Current processing status.
    pub status: RecordStatus,
}

impl Record {
    /// Creates a new record.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
        }
    }

    /// Creates a new `Pending` record.
    pub fn pending(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self::new(id, name, RecordStatus::Pending)
    }

    /// Returns the record identifier.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns a copy of this record carrying `status`.
    pub fn with_status(&self, status: RecordStatus) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_roundtrip_through_strings() {
        assert_eq!(RecordStatus::from("Pending"), RecordStatus::Pending);
        assert_eq!(RecordStatus::from("Processed"), RecordStatus::Processed);
        assert_eq!(
            RecordStatus::from("OnHold"),
            RecordStatus::Other("OnHold".into())
        );
        assert_eq!(String::from(RecordStatus::Processed), "Processed");
        assert_eq!(String::from(RecordStatus::Other("OnHold".into())), "OnHold");
    }

    #[test]
    fn status_parsing_is_case_sensitive() {
        assert_eq!(
            RecordStatus::from("processed"),
            RecordStatus::Other("processed".into())
        );
        assert!(!RecordStatus::from("processed").is_processed());
    }

    #[test]
    fn record_json_shape() {
        let record = Record::pending(1001, "Order A");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":1001,"name":"Order A","status":"Pending"}"#);

        let parsed: Record =
            serde_json::from_str(r#"{"id":7,"name":"x","status":"Shipped"}"#).unwrap();
        assert_eq!(parsed.id(), RecordId(7));
        assert_eq!(parsed.status, RecordStatus::Other("Shipped".into()));
    }

    #[test]
    fn record_id_constructors_agree() {
        const FIRST_ORDER: RecordId = RecordId::new(1001);
        assert_eq!(FIRST_ORDER, RecordId::from(1001));
        assert_eq!(FIRST_ORDER.value(), 1001);
        assert_eq!(FIRST_ORDER.to_string(), "1001");
    }

    #[test]
    fn with_status_keeps_identity() {
        let record = Record::pending(1002, "Order B");
        let processed = record.with_status(RecordStatus::Processed);

        assert_eq!(processed.id(), record.id());
        assert_eq!(processed.name, record.name);
        assert!(processed.status.is_processed());
        assert_eq!(record.status, RecordStatus::Pending);
    }
}
