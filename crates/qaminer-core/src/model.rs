use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sentinel rendered for any column whose value could not be extracted.
pub const NOT_AVAILABLE: &str = "n/a";

/// Label → value strings extracted from one or more blocks of a document.
///
/// Labels are the literal text printed in the report (after alias merging).
/// Fields filled with a documented default rather than read from the page
/// are remembered so the record can flag them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    values: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    defaulted: BTreeSet<String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.values.insert(label.into(), value.into());
    }

    /// Insert a value that stands in for missing data.
    pub fn insert_defaulted(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        self.defaulted.insert(label.clone());
        self.values.insert(label, value.into());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.values.get(label).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    pub fn is_defaulted(&self, label: &str) -> bool {
        self.defaulted.contains(label)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another block's fields. A label already present keeps its
    /// first value.
    pub fn extend(&mut self, other: RawFields) {
        for (label, value) in other.values {
            if self.values.contains_key(&label) {
                continue;
            }
            if other.defaulted.contains(&label) {
                self.defaulted.insert(label.clone());
            }
            self.values.insert(label, value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub column: String,
    pub value: String,
}

/// Canonical column → value list for one document, in the variant's column
/// order. Every declared column is present; unavailable values hold
/// [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<RecordField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    defaulted: Vec<String>,
}

impl Record {
    pub(crate) fn new(fields: Vec<RecordField>, defaulted: Vec<String>) -> Self {
        Record { fields, defaulted }
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.column.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.value.as_str())
    }

    /// Columns whose value is a documented default rather than read data.
    pub fn defaulted(&self) -> &[String] {
        &self.defaulted
    }

    pub fn is_defaulted(&self, column: &str) -> bool {
        self.defaulted.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
