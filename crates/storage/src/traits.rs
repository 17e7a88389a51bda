//! Ports to the collaborators that own the network side of the application.
//!
//! The engine never fetches on its own: it is handed records by a
//! [`WineSource`] and hands payloads to a [`WineSink`]. Implementations own
//! transport, session and CSRF details.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use llwc_core::{Cellar, CellarId, GrapeMaster, WineId, WinePayload, WineRecord};

use crate::error::StorageError;

/// Scope of a wine list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineListQuery {
    pub cellar_id: Option<CellarId>,
    pub show_drunk: bool,
    pub show_stock: bool,
}

impl WineListQuery {
    /// Bottles still in stock, optionally limited to one cellar.
    pub fn in_stock(cellar_id: Option<CellarId>) -> Self {
        Self {
            cellar_id,
            show_drunk: false,
            show_stock: true,
        }
    }
}

/// Lookup of previously recorded wines with the same name or producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SameWinesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_or_producer: Option<String>,
    pub is_drunk: bool,
}

/// Field-level rejection reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(default, deserialize_with = "message", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "message", skip_serializing_if = "Option::is_none")]
    pub cellar_id: Option<String>,
    #[serde(default, deserialize_with = "message", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl FieldErrors {
    pub fn from_json(body: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.cellar_id.is_none() && self.position.is_none()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("country", &self.country),
            ("cellar_id", &self.cellar_id),
            ("position", &self.position),
        ];
        let mut first = true;
        for (key, message) in fields {
            if let Some(message) = message {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{key}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

// Error bodies carry either a single message or a list of messages per field.
fn message<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::One(message)) => Some(message),
        Some(Raw::Many(messages)) if messages.is_empty() => None,
        Some(Raw::Many(messages)) => Some(messages.join(" ")),
    })
}

pub trait WineSource {
    /// Records for the given scope, in whatever order the backend chose.
    fn list_wines(&self, query: &WineListQuery) -> Result<Vec<WineRecord>, StorageError>;
}

pub trait WineSink {
    fn create_wine(&mut self, payload: &WinePayload) -> Result<(), StorageError>;

    /// Returns `Err(StorageError::Rejected)` when the backend refuses a field.
    fn update_wine(&mut self, wine_id: &WineId, payload: &WinePayload) -> Result<(), StorageError>;
}

pub trait TagVocabulary {
    fn list_tags(&self) -> Result<Vec<String>, StorageError>;
}

pub trait RegionVocabulary {
    /// Known region paths, `>`-joined.
    fn list_regions(&self) -> Result<Vec<String>, StorageError>;
}

pub trait CellarDirectory {
    fn list_cellars(&self) -> Result<Vec<Cellar>, StorageError>;
}

pub trait GrapeCatalog {
    fn list_grapes(&self) -> Result<Vec<GrapeMaster>, StorageError>;
}

pub trait SameWineFinder {
    fn find_same(&self, query: &SameWinesQuery) -> Result<Vec<WineRecord>, StorageError>;
}

/// Everything a wine page talks to.
pub trait Backend:
    WineSource + WineSink + TagVocabulary + RegionVocabulary + CellarDirectory + GrapeCatalog + SameWineFinder
{
}

impl<T> Backend for T where
    T: WineSource
        + WineSink
        + TagVocabulary
        + RegionVocabulary
        + CellarDirectory
        + GrapeCatalog
        + SameWineFinder
{
}
