//! Consistency checking between submitted and returned record sets.
//!
//! The checker is pure: it reads both sets and never mutates them, so the
//! same inputs always produce the same report.
//!
//! Two comparison modes are available:
//!
//! - [`CheckMode::Positional`] compares position `i` of the original with
//!   position `i` of the result. A cardinality mismatch is reported on its
//!   own and ends the check.
//! - [`CheckMode::Keyed`] indexes both sides by identifier, so a reordered
//!   but otherwise complete result is accepted, while dropped, duplicated or
//!   foreign records are reported individually.

use recordsync_protocol::{RecordId, RecordSet, RecordStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// How the original and result sets are matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Match records by position.
    #[default]
    Positional,
    /// Match records by identifier.
    Keyed,
}

impl CheckMode {
    /// Returns the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckMode::Positional => "positional",
            CheckMode::Keyed => "keyed",
        }
    }
}

impl FromStr for CheckMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positional" => Ok(CheckMode::Positional),
            "keyed" => Ok(CheckMode::Keyed),
            other => Err(format!(
                "unknown check mode '{other}'; expected: positional, keyed"
            )),
        }
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The result has a different number of records than the original.
    CardinalityMismatch {
        /// Number of records submitted.
        expected: usize,
        /// Number of records returned.
        actual: usize,
    },
    /// The identifier at a position changed.
    IdentifierMismatch {
        /// Position in both sets.
        position: usize,
        /// Identifier submitted at this position.
        expected: RecordId,
        /// Identifier returned at this position.
        actual: RecordId,
    },
    /// A returned record is not `Processed`.
    NotProcessed {
        /// Position in the result set.
        position: usize,
        /// Identifier of the returned record.
        id: RecordId,
        /// Status the record came back with.
        status: RecordStatus,
    },
    /// A submitted record is absent from the result.
    Missing {
        /// Identifier of the absent record.
        id: RecordId,
    },
    /// The result contains a record that was never submitted.
    Unexpected {
        /// Identifier of the foreign record.
        id: RecordId,
    },
    /// The result contains the same identifier more than once.
    Duplicate {
        /// Identifier that repeats.
        id: RecordId,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CardinalityMismatch { expected, actual } => {
                write!(f, "record count changed: submitted {expected}, returned {actual}")
            }
            Violation::IdentifierMismatch {
                position,
                expected,
                actual,
            } => write!(
                f,
                "position {position}: expected record {expected}, found record {actual}"
            ),
            Violation::NotProcessed {
                position,
                id,
                status,
            } => write!(
                f,
                "position {position}: record {id} has status '{status}', expected 'Processed'"
            ),
            Violation::Missing { id } => write!(f, "record {id} missing from result"),
            Violation::Unexpected { id } => write!(f, "record {id} was never submitted"),
            Violation::Duplicate { id } => write!(f, "record {id} returned more than once"),
        }
    }
}

/// All violations found by one check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    violations: Vec<Violation>,
}

impl ConsistencyReport {
    /// Creates a report from a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns true if no violations were found.
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violations in report order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if the report is empty.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

/// Compares a submitted record set against the set the processing system
/// returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsistencyChecker {
    mode: CheckMode,
}

impl ConsistencyChecker {
    /// Creates a checker using `mode`.
    pub fn new(mode: CheckMode) -> Self {
        Self { mode }
    }

    /// Creates a positional checker.
    pub fn positional() -> Self {
        Self::new(CheckMode::Positional)
    }

    /// Creates an identifier-keyed checker.
    pub fn keyed() -> Self {
        Self::new(CheckMode::Keyed)
    }

    /// Returns the comparison mode.
    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    /// Returns true if `result` is a faithful processed copy of `original`.
    pub fn verify(&self, original: &RecordSet, result: &RecordSet) -> bool {
        self.check(original, result).is_consistent()
    }

    /// Compares the two sets and reports every violation found.
    pub fn check(&self, original: &RecordSet, result: &RecordSet) -> ConsistencyReport {
        match self.mode {
            CheckMode::Positional => check_positional(original, result),
            CheckMode::Keyed => check_keyed(original, result),
        }
    }
}

/// Positional verification with the default checker.
pub fn verify(original: &RecordSet, result: &RecordSet) -> bool {
    ConsistencyChecker::positional().verify(original, result)
}

fn check_positional(original: &RecordSet, result: &RecordSet) -> ConsistencyReport {
    if original.len() != result.len() {
        return ConsistencyReport::new(vec![Violation::CardinalityMismatch {
            expected: original.len(),
            actual: result.len(),
        }]);
    }

    let mut violations = Vec::new();
    for (position, (sent, returned)) in original.iter().zip(result.iter()).enumerate() {
        if sent.id() != returned.id() {
            violations.push(Violation::IdentifierMismatch {
                position,
                expected: sent.id(),
                actual: returned.id(),
            });
        }
        if !returned.status.is_processed() {
            violations.push(Violation::NotProcessed {
                position,
                id: returned.id(),
                status: returned.status.clone(),
            });
        }
    }

    ConsistencyReport::new(violations)
}

fn check_keyed(original: &RecordSet, result: &RecordSet) -> ConsistencyReport {
    let mut violations = Vec::new();

    if original.len() != result.len() {
        violations.push(Violation::CardinalityMismatch {
            expected: original.len(),
            actual: result.len(),
        });
    }

    let submitted: BTreeSet<RecordId> = original.iter().map(|r| r.id()).collect();

    let mut returned: BTreeMap<RecordId, Vec<usize>> = BTreeMap::new();
    for (position, record) in result.iter().enumerate() {
        returned.entry(record.id()).or_default().push(position);
    }

    violations.extend(
        returned
            .iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(id, _)| Violation::Duplicate { id: *id }),
    );

    violations.extend(
        submitted
            .iter()
            .filter(|id| !returned.contains_key(id))
            .map(|id| Violation::Missing { id: *id }),
    );

    violations.extend(
        returned
            .keys()
            .filter(|id| !submitted.contains(id))
            .map(|id| Violation::Unexpected { id: *id }),
    );

    for (id, positions) in returned.iter().filter(|(id, _)| submitted.contains(id)) {
        for &position in positions {
            let Some(record) = result.get(position) else {
                continue;
            };
            if !record.status.is_processed() {
                violations.push(Violation::NotProcessed {
                    position,
                    id: *id,
                    status: record.status.clone(),
                });
            }
        }
    }

    ConsistencyReport::new(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordsync_protocol::Record;

    fn original() -> RecordSet {
        RecordSet::new(vec![
            Record::pending(1001, "A"),
            Record::pending(1002, "B"),
            Record::pending(1003, "C"),
        ])
    }

    fn processed(set: &RecordSet) -> RecordSet {
        set.iter()
            .map(|r| r.with_status(RecordStatus::Processed))
            .collect()
    }

    #[test]
    fn constructors_select_mode() {
        assert_eq!(ConsistencyChecker::default().mode(), CheckMode::Positional);
        assert_eq!(ConsistencyChecker::positional().mode(), CheckMode::Positional);
        assert_eq!(ConsistencyChecker::keyed().mode(), CheckMode::Keyed);
    }

    #[test]
    fn happy_path_is_consistent() {
        let original = original();
        let result = processed(&original);

        assert!(verify(&original, &result));
        assert!(ConsistencyChecker::keyed().verify(&original, &result));
    }

    #[test]
    fn cardinality_mismatch_is_reported_alone() {
        let original = original();
        let mut records = processed(&original).into_records();
        records.pop();
        records[0].status = RecordStatus::Pending;
        let result = RecordSet::new(records);

        let report = ConsistencyChecker::positional().check(&original, &result);
        assert_eq!(
            report.violations(),
            &[Violation::CardinalityMismatch {
                expected: 3,
                actual: 2
            }]
        );
    }

    #[test]
    fn status_mismatch_reports_position() {
        let original = original();
        let mut records = processed(&original).into_records();
        records[1].status = RecordStatus::Pending;
        let result = RecordSet::new(records);

        let report = ConsistencyChecker::positional().check(&original, &result);
        assert_eq!(
            report.violations(),
            &[Violation::NotProcessed {
                position: 1,
                id: RecordId(1002),
                status: RecordStatus::Pending,
            }]
        );
    }

    #[test]
    fn identifier_mismatch_reports_both_ids() {
        let original = original();
        let result = RecordSet::new(vec![
            Record::new(1001, "A", RecordStatus::Processed),
            Record::new(9999, "B", RecordStatus::Processed),
            Record::new(1003, "C", RecordStatus::Processed),
        ]);

        let report = ConsistencyChecker::positional().check(&original, &result);
        assert_eq!(
            report.violations(),
            &[Violation::IdentifierMismatch {
                position: 1,
                expected: RecordId(1002),
                actual: RecordId(9999),
            }]
        );
    }

    #[test]
    fn reorder_fails_positional_but_passes_keyed() {
        let original = original();
        let mut records = processed(&original).into_records();
        records.reverse();
        let result = RecordSet::new(records);

        assert!(!ConsistencyChecker::positional().verify(&original, &result));
        assert!(ConsistencyChecker::keyed().verify(&original, &result));
    }

    #[test]
    fn keyed_reports_missing_unexpected_and_duplicates() {
        let original = original();
        let result = RecordSet::new(vec![
            Record::new(1001, "A", RecordStatus::Processed),
            Record::new(1001, "A", RecordStatus::Processed),
            Record::new(4242, "X", RecordStatus::Processed),
        ]);

        let report = ConsistencyChecker::keyed().check(&original, &result);
        assert_eq!(
            report.violations(),
            &[
                Violation::Duplicate { id: RecordId(1001) },
                Violation::Missing { id: RecordId(1002) },
                Violation::Missing { id: RecordId(1003) },
                Violation::Unexpected { id: RecordId(4242) },
            ]
        );
    }

    #[test]
    fn keyed_reports_cardinality_without_stopping() {
        let original = original();
        let result = RecordSet::new(vec![
            Record::new(1002, "B", RecordStatus::Pending),
            Record::new(1001, "A", RecordStatus::Processed),
        ]);

        let report = ConsistencyChecker::keyed().check(&original, &result);
        assert_eq!(
            report.violations(),
            &[
                Violation::CardinalityMismatch {
                    expected: 3,
                    actual: 2
                },
                Violation::Missing { id: RecordId(1003) },
                Violation::NotProcessed {
                    position: 0,
                    id: RecordId(1002),
                    status: RecordStatus::Pending,
                },
            ]
        );
    }

    #[test]
    fn empty_sets_are_consistent() {
        assert!(verify(&RecordSet::empty(), &RecordSet::empty()));
        assert!(ConsistencyChecker::keyed().verify(&RecordSet::empty(), &RecordSet::empty()));
    }

    #[test]
    fn check_mode_parsing() {
        assert_eq!("positional".parse::<CheckMode>(), Ok(CheckMode::Positional));
        assert_eq!("Keyed".parse::<CheckMode>(), Ok(CheckMode::Keyed));
        assert!("fuzzy".parse::<CheckMode>().is_err());
        assert_eq!(CheckMode::default(), CheckMode::Positional);
    }

    #[test]
    fn violation_display() {
        let v = Violation::CardinalityMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(v.to_string(), "record count changed: submitted 3, returned 2");
    }
}
