use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::{CellarId, GrapeId, NOT_IN_CELLAR, WineId};

/// One grape's share of a blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cepage {
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default, with = "percentage_text")]
    pub percentage: Option<f64>,
}

impl Cepage {
    pub fn new(name: impl Into<String>, abbreviation: Option<&str>, percentage: Option<f64>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.map(str::to_string),
            percentage,
        }
    }

    /// Abbreviation when present, otherwise the grape name.
    pub fn display_label(&self) -> &str {
        match self.abbreviation.as_deref() {
            Some(abbr) if !abbr.is_empty() => abbr,
            _ => &self.name,
        }
    }
}

/// Joins the display labels of a blend with `", "`.
pub fn cepage_abbreviations(cepages: &[Cepage]) -> String {
    cepages
        .iter()
        .map(Cepage::display_label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A bottle, or an empty slot of a cellar rack when `name` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineRecord {
    pub id: WineId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub vintage: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region_1: String,
    #[serde(default)]
    pub region_2: String,
    #[serde(default)]
    pub region_3: String,
    #[serde(default)]
    pub region_4: String,
    #[serde(default)]
    pub region_5: String,
    #[serde(default)]
    pub cepages: Vec<Cepage>,
    #[serde(default)]
    pub bought_at: Option<NaiveDate>,
    #[serde(default)]
    pub bought_from: String,
    #[serde(default, alias = "price_with_tax")]
    pub price: Option<f64>,
    #[serde(default)]
    pub drunk_at: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tag_texts: Vec<String>,
    #[serde(default)]
    pub cellar_id: Option<CellarId>,
    /// Display name of `cellar_id`, filled in by the backend.
    #[serde(default)]
    pub cellar_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl WineRecord {
    pub fn new(id: impl Into<WineId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            producer: String::new(),
            vintage: None,
            country: None,
            region_1: String::new(),
            region_2: String::new(),
            region_3: String::new(),
            region_4: String::new(),
            region_5: String::new(),
            cepages: Vec::new(),
            bought_at: None,
            bought_from: String::new(),
            price: None,
            drunk_at: None,
            note: String::new(),
            tag_texts: Vec::new(),
            cellar_id: None,
            cellar_name: None,
            position: None,
        }
    }

    /// Empty cellar slots come back from the backend as records without a name.
    pub fn is_empty_slot(&self) -> bool {
        self.name.is_empty()
    }

    /// Stored cellar, treating the sentinel id as "not stored".
    pub fn stored_cellar(&self) -> Option<&CellarId> {
        self.cellar_id
            .as_ref()
            .filter(|id| id.as_str() != NOT_IN_CELLAR)
    }

    /// A stored wine needs a position; an unstored wine must not have one.
    pub fn check_placement(&self) -> Result<(), CoreError> {
        match (self.stored_cellar(), &self.position) {
            (Some(cellar), None) => Err(CoreError::InvalidData(format!(
                "wine {} is in cellar {cellar} without a position",
                self.id
            ))),
            (None, Some(position)) => Err(CoreError::InvalidData(format!(
                "wine {} has position {position:?} but no cellar",
                self.id
            ))),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cellar {
    pub id: CellarId,
    pub name: String,
    #[serde(default)]
    pub layout: Vec<u32>,
    #[serde(default, alias = "hasBasket")]
    pub has_basket: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrapeMaster {
    pub id: GrapeId,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

/// Wire form of a cepage percentage: a string-encoded decimal. Numbers are
/// accepted on input as well.
pub mod percentage_text {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(pct) => serializer.serialize_str(&format_percentage(*pct)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(text)) => crate::input::parse_percentage(&text).map_err(de::Error::custom),
        }
    }

    pub fn format_percentage(pct: f64) -> String {
        format!("{pct}")
    }
}
