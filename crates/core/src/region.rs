use serde::{Deserialize, Serialize};

use crate::wine::WineRecord;

pub const REGION_SEPARATOR: char = '>';

/// Country plus up to five nested region names, e.g.
/// `France>Bourgogne>Côte de Nuits>Gevrey-Chambertin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPath {
    pub country: Option<String>,
    pub regions: [String; 5],
}

impl RegionPath {
    pub fn of(record: &WineRecord) -> Self {
        Self {
            country: record.country.clone(),
            regions: [
                record.region_1.clone(),
                record.region_2.clone(),
                record.region_3.clone(),
                record.region_4.clone(),
                record.region_5.clone(),
            ],
        }
    }

    /// Splits a `>`-joined path. Segments past the fifth region are dropped.
    pub fn parse(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        let mut segments = path.split(REGION_SEPARATOR);
        let country = segments.next().map(str::to_string);
        let mut regions: [String; 5] = Default::default();
        for (slot, segment) in regions.iter_mut().zip(segments) {
            *slot = segment.to_string();
        }
        Some(Self { country, regions })
    }

    /// Renders the path; empty regions are skipped and a missing country
    /// renders nothing.
    pub fn render(&self) -> Option<String> {
        let country = self.country.as_ref()?;
        let mut path = country.clone();
        for region in self.regions.iter().filter(|r| !r.is_empty()) {
            path.push(REGION_SEPARATOR);
            path.push_str(region);
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fills_missing_regions_with_empty() {
        let path = RegionPath::parse("France>Bourgogne>Côte de Nuits").unwrap();
        assert_eq!(path.country.as_deref(), Some("France"));
        assert_eq!(path.regions[0], "Bourgogne");
        assert_eq!(path.regions[1], "Côte de Nuits");
        assert!(path.regions[2..].iter().all(String::is_empty));
        assert!(RegionPath::parse("").is_none());
    }

    #[test]
    fn render_skips_empty_regions() {
        let path = RegionPath {
            country: Some("Italy".into()),
            regions: ["Piemonte".into(), String::new(), "Barolo".into(), String::new(), String::new()],
        };
        assert_eq!(path.render().as_deref(), Some("Italy>Piemonte>Barolo"));
        assert_eq!(RegionPath::default().render(), None);
    }
}
