use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field_value::FieldValue;
use crate::wine::WineRecord;

/// How a column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Scalar,
    TagList,
    CepageList,
}

impl ColumnKind {
    pub fn is_compound(self) -> bool {
        !matches!(self, ColumnKind::Scalar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Column {
    Id,
    Name,
    Producer,
    Vintage,
    Country,
    Region1,
    Region2,
    Region3,
    Region4,
    Region5,
    Cepages,
    BoughtAt,
    BoughtFrom,
    Price,
    DrunkAt,
    Note,
    TagTexts,
    CellarId,
    CellarName,
    Position,
}

struct ColumnDescriptor {
    column: Column,
    key: &'static str,
    kind: ColumnKind,
    numeric: bool,
}

const fn scalar(column: Column, key: &'static str) -> ColumnDescriptor {
    ColumnDescriptor { column, key, kind: ColumnKind::Scalar, numeric: false }
}

const COLUMNS: [ColumnDescriptor; 20] = [
    scalar(Column::Id, "id"),
    scalar(Column::Name, "name"),
    scalar(Column::Producer, "producer"),
    ColumnDescriptor { column: Column::Vintage, key: "vintage", kind: ColumnKind::Scalar, numeric: true },
    scalar(Column::Country, "country"),
    scalar(Column::Region1, "region_1"),
    scalar(Column::Region2, "region_2"),
    scalar(Column::Region3, "region_3"),
    scalar(Column::Region4, "region_4"),
    scalar(Column::Region5, "region_5"),
    ColumnDescriptor { column: Column::Cepages, key: "cepages", kind: ColumnKind::CepageList, numeric: false },
    scalar(Column::BoughtAt, "bought_at"),
    scalar(Column::BoughtFrom, "bought_from"),
    ColumnDescriptor { column: Column::Price, key: "price", kind: ColumnKind::Scalar, numeric: true },
    scalar(Column::DrunkAt, "drunk_at"),
    scalar(Column::Note, "note"),
    ColumnDescriptor { column: Column::TagTexts, key: "tag_texts", kind: ColumnKind::TagList, numeric: false },
    scalar(Column::CellarId, "cellar_id"),
    scalar(Column::CellarName, "cellar_name"),
    scalar(Column::Position, "position"),
];

impl Column {
    pub const ALL: [Column; 20] = [
        Column::Id,
        Column::Name,
        Column::Producer,
        Column::Vintage,
        Column::Country,
        Column::Region1,
        Column::Region2,
        Column::Region3,
        Column::Region4,
        Column::Region5,
        Column::Cepages,
        Column::BoughtAt,
        Column::BoughtFrom,
        Column::Price,
        Column::DrunkAt,
        Column::Note,
        Column::TagTexts,
        Column::CellarId,
        Column::CellarName,
        Column::Position,
    ];

    fn descriptor(self) -> &'static ColumnDescriptor {
        // COLUMNS is declared in the same order as the enum.
        &COLUMNS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn kind(self) -> ColumnKind {
        self.descriptor().kind
    }

    pub fn is_numeric(self) -> bool {
        self.descriptor().numeric
    }

    pub fn label(self) -> String {
        title_case(self.key())
    }

    pub fn value_of(self, record: &WineRecord) -> FieldValue {
        match self {
            Column::Id => FieldValue::Text(record.id.to_string()),
            Column::Name => FieldValue::Text(record.name.clone()),
            Column::Producer => FieldValue::Text(record.producer.clone()),
            Column::Vintage => record.vintage.into(),
            Column::Country => record.country.clone().into(),
            Column::Region1 => FieldValue::Text(record.region_1.clone()),
            Column::Region2 => FieldValue::Text(record.region_2.clone()),
            Column::Region3 => FieldValue::Text(record.region_3.clone()),
            Column::Region4 => FieldValue::Text(record.region_4.clone()),
            Column::Region5 => FieldValue::Text(record.region_5.clone()),
            Column::Cepages => FieldValue::Cepages(record.cepages.clone()),
            Column::BoughtAt => record.bought_at.into(),
            Column::BoughtFrom => FieldValue::Text(record.bought_from.clone()),
            Column::Price => record.price.into(),
            Column::DrunkAt => record.drunk_at.into(),
            Column::Note => FieldValue::Text(record.note.clone()),
            Column::TagTexts => FieldValue::Tags(record.tag_texts.clone()),
            Column::CellarId => record.cellar_id.as_ref().map(|id| id.to_string()).into(),
            Column::CellarName => record.cellar_name.clone().into(),
            Column::Position => record.position.clone().into(),
        }
    }
}

impl FromStr for Column {
    type Err = CoreError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key == "price_with_tax" {
            return Ok(Column::Price);
        }
        COLUMNS
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.column)
            .ok_or_else(|| CoreError::UnknownColumn(key.to_string()))
    }
}

impl TryFrom<String> for Column {
    type Error = CoreError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}

impl From<Column> for String {
    fn from(column: Column) -> Self {
        column.key().to_string()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Header label for a field key: `region_1` becomes `Region 1`.
pub fn title_case(key: &str) -> String {
    if key == "price_with_tax" {
        return "Price".to_string();
    }
    key.to_lowercase()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
