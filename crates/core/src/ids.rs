use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reserved cellar identifier meaning "not stored in any cellar".
pub const NOT_IN_CELLAR: &str = "NOT_IN_CELLAR";

// Backend identifiers are opaque strings (uuids for wines, integers for
// cellars), so ids keep the text as received.
macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(WineId);
string_id!(CellarId);
string_id!(GrapeId);

/// Cellar selection inside the wine dialog: a real cellar or the
/// `NOT_IN_CELLAR` sentinel.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum CellarChoice {
    Cellar(CellarId),
    NotInCellar,
}

impl CellarChoice {
    pub fn from_cellar_id(cellar_id: Option<&CellarId>) -> Self {
        match cellar_id {
            Some(id) if id.as_str() != NOT_IN_CELLAR => Self::Cellar(id.clone()),
            _ => Self::NotInCellar,
        }
    }

    pub fn is_not_in_cellar(&self) -> bool {
        matches!(self, Self::NotInCellar)
    }

    pub fn cellar_id(&self) -> Option<&CellarId> {
        match self {
            Self::Cellar(id) => Some(id),
            Self::NotInCellar => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cellar(id) => id.as_str(),
            Self::NotInCellar => NOT_IN_CELLAR,
        }
    }
}

impl fmt::Debug for CellarChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellarChoice({})", self.as_str())
    }
}

impl Serialize for CellarChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CellarChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_cellar_id(Some(&CellarId::new(raw))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_id_maps_to_not_in_cellar() {
        let sentinel = CellarId::new(NOT_IN_CELLAR);
        assert_eq!(CellarChoice::from_cellar_id(Some(&sentinel)), CellarChoice::NotInCellar);
        assert_eq!(CellarChoice::from_cellar_id(None), CellarChoice::NotInCellar);

        let real = CellarId::new("7");
        assert_eq!(
            CellarChoice::from_cellar_id(Some(&real)),
            CellarChoice::Cellar(real.clone())
        );
    }

    #[test]
    fn choice_serializes_as_plain_string() {
        let json = serde_json::to_string(&CellarChoice::NotInCellar).unwrap();
        assert_eq!(json, "\"NOT_IN_CELLAR\"");

        let parsed: CellarChoice = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(parsed, CellarChoice::Cellar(CellarId::new("12")));
    }
}
