//! Health reading model and record list.
//!
//! # Invariants
//! - Records are unique by `(kind, taken_at_epoch_ms)`.
//! - Reading values are finite and strictly positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Kind of health reading tracked by the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Blood glucose in mmol/L.
    BloodSugar,
    /// Body weight in kilograms.
    Weight,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BloodSugar => write!(f, "blood sugar"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

/// Record list mutation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordListError {
    InvalidValue(f64),
    DuplicateRecord { kind: RecordKind, taken_at_epoch_ms: i64 },
}

impl Display for RecordListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue(value) => {
                write!(f, "reading value must be finite and positive, got {value}")
            }
            Self::DuplicateRecord {
                kind,
                taken_at_epoch_ms,
            } => write!(f, "duplicate {kind} record at {taken_at_epoch_ms}"),
        }
    }
}

impl Error for RecordListError {}

/// One dated health reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    /// Unix epoch milliseconds of the reading.
    pub taken_at_epoch_ms: i64,
    pub value: f64,
}

impl Record {
    pub fn new(kind: RecordKind, taken_at_epoch_ms: i64, value: f64) -> Self {
        Self {
            kind,
            taken_at_epoch_ms,
            value,
        }
    }

    pub fn is_same(&self, other: &Record) -> bool {
        self.kind == other.kind && self.taken_at_epoch_ms == other.taken_at_epoch_ms
    }
}

/// Health readings, unique by kind and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, record: Record) -> Result<(), RecordListError> {
        if !record.value.is_finite() || record.value <= 0.0 {
            return Err(RecordListError::InvalidValue(record.value));
        }
        if self.records.iter().any(|existing| existing.is_same(&record)) {
            return Err(RecordListError::DuplicateRecord {
                kind: record.kind,
                taken_at_epoch_ms: record.taken_at_epoch_ms,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Checks collection invariants after deserialization.
    pub fn verify(&self) -> Result<(), String> {
        for (index, record) in self.records.iter().enumerate() {
            if !record.value.is_finite() || record.value <= 0.0 {
                return Err(format!(
                    "record at index {index} has a non-positive value {}",
                    record.value
                ));
            }
            let duplicated = self.records[..index]
                .iter()
                .any(|earlier| earlier.is_same(record));
            if duplicated {
                return Err(format!(
                    "duplicate {} record at {}",
                    record.kind, record.taken_at_epoch_ms
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordKind, RecordList, RecordListError};

    #[test]
    fn add_rejects_duplicate_kind_and_timestamp() {
        let mut list = RecordList::new();
        list.add(Record::new(RecordKind::BloodSugar, 1_700_000_000_000, 5.4))
            .expect("first reading should be accepted");
        let err = list
            .add(Record::new(RecordKind::BloodSugar, 1_700_000_000_000, 6.1))
            .expect_err("same kind and timestamp should fail");
        assert!(matches!(err, RecordListError::DuplicateRecord { .. }));

        // Same timestamp, different kind is a distinct reading.
        list.add(Record::new(RecordKind::Weight, 1_700_000_000_000, 72.5))
            .expect("different kind should be accepted");
    }

    #[test]
    fn add_rejects_non_positive_values() {
        let mut list = RecordList::new();
        let err = list
            .add(Record::new(RecordKind::Weight, 1, 0.0))
            .expect_err("zero reading should fail");
        assert!(matches!(err, RecordListError::InvalidValue(_)));
    }
}
