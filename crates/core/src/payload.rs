use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ids::CellarId;
use crate::wine::Cepage;

/// What a save does with the wine's storage location.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// `cellar_id` and `position` are left out of the body entirely.
    Unchanged,
    /// Both keys are sent as `null`.
    Remove,
    Store {
        cellar_id: CellarId,
        position: Option<String>,
    },
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Placement::Unchanged => serializer.serialize_map(Some(0))?.end(),
            Placement::Remove => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("cellar_id", &None::<CellarId>)?;
                map.serialize_entry("position", &None::<String>)?;
                map.end()
            }
            Placement::Store { cellar_id, position } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("cellar_id", cellar_id)?;
                map.serialize_entry("position", position)?;
                map.end()
            }
        }
    }
}

/// Request body for creating or updating a wine.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WinePayload {
    pub name: String,
    pub producer: String,
    pub country: Option<String>,
    pub region_1: String,
    pub region_2: String,
    pub region_3: String,
    pub region_4: String,
    pub region_5: String,
    pub cepages: Vec<Cepage>,
    pub vintage: Option<i32>,
    pub bought_at: Option<NaiveDate>,
    pub bought_from: String,
    pub price: Option<f64>,
    pub drunk_at: Option<NaiveDate>,
    pub note: String,
    pub tag_texts: Vec<String>,
    #[serde(flatten)]
    pub placement: Placement,
}

impl WinePayload {
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(placement: Placement) -> WinePayload {
        WinePayload {
            name: "Barolo".into(),
            producer: "Giacomo Conterno".into(),
            country: Some("Italy".into()),
            region_1: "Piemonte".into(),
            region_2: String::new(),
            region_3: String::new(),
            region_4: String::new(),
            region_5: String::new(),
            cepages: vec![Cepage::new("Nebbiolo", Some("Neb"), Some(100.0))],
            vintage: Some(2016),
            bought_at: NaiveDate::from_ymd_opt(2021, 5, 3),
            bought_from: "Enoteca".into(),
            price: Some(24000.0),
            drunk_at: None,
            note: String::new(),
            tag_texts: vec!["aging".into()],
            placement,
        }
    }

    #[test]
    fn unchanged_placement_omits_keys() {
        let json = payload(Placement::Unchanged).to_json().unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("cellar_id"));
        assert!(!object.contains_key("position"));
        assert_eq!(object["name"], "Barolo");
        assert_eq!(object["bought_at"], "2021-05-03");
        assert_eq!(object["cepages"][0]["percentage"], "100");
    }

    #[test]
    fn removal_sends_nulls() {
        let json = payload(Placement::Remove).to_json().unwrap();
        assert!(json["cellar_id"].is_null());
        assert!(json["position"].is_null());
        assert!(json.as_object().unwrap().contains_key("position"));
    }

    #[test]
    fn store_sends_cellar_and_position() {
        let json = payload(Placement::Store {
            cellar_id: CellarId::new("4"),
            position: Some("2-2".into()),
        })
        .to_json()
        .unwrap();
        assert_eq!(json["cellar_id"], "4");
        assert_eq!(json["position"], "2-2");
    }
}
