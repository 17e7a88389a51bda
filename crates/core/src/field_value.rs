use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::wine::{Cepage, cepage_abbreviations};

/// A record field extracted by column, typed so comparisons never need to
/// inspect the record's shape at runtime.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Tags(Vec<String>),
    Cepages(Vec<Cepage>),
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b).is_eq(),
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Tags(a), Self::Tags(b)) => a == b,
            (Self::Cepages(a), Self::Cepages(b)) => a == b,
            _ => false,
        }
    }
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null, zero and empty text count as "no value" for scalar columns.
    /// Sequences are never falsy here; their emptiness is judged by length.
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Integer(n) => *n == 0,
            FieldValue::Float(x) => *x == 0.0 || x.is_nan(),
            FieldValue::Date(_) | FieldValue::Tags(_) | FieldValue::Cepages(_) => false,
        }
    }

    /// Element count of a sequence value; scalars have none.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            FieldValue::Tags(tags) => Some(tags.len()),
            FieldValue::Cepages(cepages) => Some(cepages.len()),
            _ => None,
        }
    }

    /// Text a sequence value sorts by: tags joined with `", "`, cepages by
    /// their abbreviations.
    pub fn sort_text(&self) -> Option<String> {
        match self {
            FieldValue::Tags(tags) => Some(tags.join(", ")),
            FieldValue::Cepages(cepages) => Some(cepage_abbreviations(cepages)),
            _ => None,
        }
    }

    /// Natural ordering of two values of the same kind. Values of different
    /// kinds do not order against each other and compare equal.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Tags(_), Self::Tags(_)) | (Self::Cepages(_), Self::Cepages(_)) => {
                self.sort_text().cmp(&other.sort_text())
            }
            _ => Ordering::Equal,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Float)
    }
}

impl From<Option<i32>> for FieldValue {
    fn from(value: Option<i32>) -> Self {
        value.map_or(FieldValue::Null, |n| FieldValue::Integer(n.into()))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Date)
    }
}
