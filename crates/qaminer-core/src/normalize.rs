use crate::model::{RawFields, Record, RecordField, NOT_AVAILABLE};
use serde::Serialize;

/// How a canonical column is derived from raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "label")]
pub enum ColumnRule {
    /// The raw value under the label, unchanged.
    Copy(&'static str),
    /// Last-name part of a `Last, First` name under the label.
    LastName(&'static str),
    /// First-name part of a `Last, First` name under the label.
    FirstName(&'static str),
}

impl ColumnRule {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRule::Copy(label) | ColumnRule::LastName(label) | ColumnRule::FirstName(label) => {
                label
            }
        }
    }
}

/// One canonical export column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub rule: ColumnRule,
}

impl Column {
    /// Column copied from the raw field of the same name.
    pub const fn copy(name: &'static str) -> Self {
        Column {
            name,
            rule: ColumnRule::Copy(name),
        }
    }

    pub const fn from_label(name: &'static str, label: &'static str) -> Self {
        Column {
            name,
            rule: ColumnRule::Copy(label),
        }
    }

    pub const fn last_name(name: &'static str, label: &'static str) -> Self {
        Column {
            name,
            rule: ColumnRule::LastName(label),
        }
    }

    pub const fn first_name(name: &'static str, label: &'static str) -> Self {
        Column {
            name,
            rule: ColumnRule::FirstName(label),
        }
    }
}

/// Names of `columns`, in order.
pub fn column_names(columns: &[Column]) -> Vec<String> {
    columns.iter().map(|c| c.name.to_string()).collect()
}

/// Map raw fields onto the canonical columns.
///
/// Every column is present in the result; a missing or blank raw value is
/// rendered as [`NOT_AVAILABLE`].
pub fn normalize(raw: &RawFields, columns: &[Column]) -> Record {
    let mut defaulted = Vec::new();
    let fields = columns
        .iter()
        .map(|column| {
            let label = column.rule.label();
            if raw.is_defaulted(label) {
                defaulted.push(column.name.to_string());
            }
            let value = raw
                .get(label)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| match column.rule {
                    ColumnRule::Copy(_) => v.to_string(),
                    ColumnRule::LastName(_) => split_patient_name(v).0,
                    ColumnRule::FirstName(_) => split_patient_name(v).1,
                })
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            RecordField {
                column: column.name.to_string(),
                value,
            }
        })
        .collect();
    Record::new(fields, defaulted)
}

/// Split a DICOM-style `LAST^FIRST` or `Last, First` patient name into
/// title-cased `(last, first)`. Without a comma the whole name is the last
/// name and the first name is not available.
pub fn split_patient_name(name: &str) -> (String, String) {
    let name = name.replace('^', " ");
    let mut parts = name.split(", ");
    let last = parts.next().map(str::trim).unwrap_or_default();
    if last.is_empty() {
        return (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string());
    }
    let first = parts
        .next()
        .map(|f| title_case(f.trim()))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    (title_case(last), first)
}

/// Upper-case the first letter of every word and lower-case the rest, where
/// a word starts at any letter not preceded by a letter.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
