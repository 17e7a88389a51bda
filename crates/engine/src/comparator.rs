//! Row ordering for the wine tables.
//!
//! Both directions push rows without a value to the bottom: descending
//! negates the value comparison but keeps the empty-last rule as is, so it is
//! not a mirror image of ascending.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use llwc_core::{Column, ColumnKind, FieldValue, WineRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub column: Column,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(column: Column) -> Self {
        Self { column, direction: Direction::Asc }
    }

    pub fn desc(column: Column) -> Self {
        Self { column, direction: Direction::Desc }
    }
}

/// Compares `b` against `a`: `Greater` when `b` sorts before `a`.
pub fn compare_values(a: &FieldValue, b: &FieldValue, kind: ColumnKind) -> Ordering {
    let ordering = match kind {
        ColumnKind::TagList | ColumnKind::CepageList => b.sort_text().cmp(&a.sort_text()),
        ColumnKind::Scalar => b.natural_cmp(a),
    };
    match ordering {
        Ordering::Less => Ordering::Greater,
        Ordering::Greater => Ordering::Less,
        Ordering::Equal => Ordering::Equal,
    }
}

fn is_empty(value: &FieldValue, kind: ColumnKind) -> bool {
    if kind.is_compound() {
        value.sequence_len() == Some(0)
    } else {
        value.is_falsy()
    }
}

fn empty_last(a: &FieldValue, b: &FieldValue, kind: ColumnKind) -> Option<Ordering> {
    match (is_empty(a, kind), is_empty(b, kind)) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Greater),
        (false, true) => Some(Ordering::Less),
        (false, false) => None,
    }
}

pub fn ascending(a: &FieldValue, b: &FieldValue, kind: ColumnKind) -> Ordering {
    empty_last(a, b, kind).unwrap_or_else(|| compare_values(a, b, kind))
}

pub fn descending(a: &FieldValue, b: &FieldValue, kind: ColumnKind) -> Ordering {
    empty_last(a, b, kind).unwrap_or_else(|| compare_values(a, b, kind).reverse())
}

/// Comparator over extracted field values for the given direction.
pub fn value_comparator(direction: Direction) -> fn(&FieldValue, &FieldValue, ColumnKind) -> Ordering {
    match direction {
        Direction::Asc => ascending,
        Direction::Desc => descending,
    }
}

/// Stable sort of `rows` by `order`. Field values are extracted once per row.
pub fn sort_rows<'a>(rows: Vec<&'a WineRecord>, order: SortOrder) -> Vec<&'a WineRecord> {
    let compare = value_comparator(order.direction);
    let kind = order.column.kind();
    let mut keyed: Vec<(FieldValue, &WineRecord)> = rows
        .into_iter()
        .map(|record| (order.column.value_of(record), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, kind));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llwc_core::Cepage;

    fn tags(values: &[&str]) -> FieldValue {
        FieldValue::Tags(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn base_comparison_is_b_against_a() {
        let a = FieldValue::Text("Barolo".into());
        let b = FieldValue::Text("Chablis".into());
        assert_eq!(compare_values(&a, &b, ColumnKind::Scalar), Ordering::Less);
        assert_eq!(compare_values(&b, &a, ColumnKind::Scalar), Ordering::Greater);
        assert_eq!(compare_values(&a, &a, ColumnKind::Scalar), Ordering::Equal);
    }

    #[test]
    fn empty_tag_list_sorts_last_both_ways() {
        let empty = tags(&[]);
        let some = tags(&["zzz"]);
        for direction in [Direction::Asc, Direction::Desc] {
            let compare = value_comparator(direction);
            assert_eq!(compare(&empty, &some, ColumnKind::TagList), Ordering::Greater);
            assert_eq!(compare(&some, &empty, ColumnKind::TagList), Ordering::Less);
            assert_eq!(compare(&empty, &empty, ColumnKind::TagList), Ordering::Equal);
        }
    }

    #[test]
    fn falsy_scalars_sort_last_both_ways() {
        let cases = [
            (FieldValue::Null, FieldValue::Integer(2001)),
            (FieldValue::Integer(0), FieldValue::Integer(1999)),
            (FieldValue::Text(String::new()), FieldValue::Text("A".into())),
            (FieldValue::Float(0.0), FieldValue::Float(1500.0)),
        ];
        for (falsy, truthy) in &cases {
            assert_eq!(ascending(falsy, truthy, ColumnKind::Scalar), Ordering::Greater);
            assert_eq!(descending(falsy, truthy, ColumnKind::Scalar), Ordering::Greater);
            assert_eq!(ascending(truthy, falsy, ColumnKind::Scalar), Ordering::Less);
            assert_eq!(descending(truthy, falsy, ColumnKind::Scalar), Ordering::Less);
        }
    }

    #[test]
    fn non_empty_values_reverse_between_directions() {
        let pairs = [
            (FieldValue::Integer(1990), FieldValue::Integer(2015)),
            (FieldValue::Text("Alsace".into()), FieldValue::Text("Jura".into())),
            (tags(&["aging"]), tags(&["gift"])),
            (
                FieldValue::Cepages(vec![Cepage::new("Chardonnay", Some("Ch"), None)]),
                FieldValue::Cepages(vec![Cepage::new("Syrah", Some("Sy"), None)]),
            ),
        ];
        for (a, b) in &pairs {
            let kind = match a {
                FieldValue::Tags(_) => ColumnKind::TagList,
                FieldValue::Cepages(_) => ColumnKind::CepageList,
                _ => ColumnKind::Scalar,
            };
            let asc = ascending(a, b, kind);
            assert_eq!(asc, Ordering::Less);
            assert_eq!(descending(a, b, kind), asc.reverse());
        }
    }

    #[test]
    fn cepages_sort_by_abbreviation_text() {
        let a = FieldValue::Cepages(vec![Cepage::new("Merlot", Some("Me"), None)]);
        let b = FieldValue::Cepages(vec![Cepage::new("Cabernet Franc", Some("CF"), None)]);
        // "CF" < "Me", so b sorts first ascending.
        assert_eq!(ascending(&a, &b, ColumnKind::CepageList), Ordering::Greater);
    }
}
