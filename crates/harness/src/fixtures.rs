use chrono::NaiveDate;

use llwc_core::{Cellar, CellarId, Cepage, GrapeId, GrapeMaster, WineRecord};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

pub fn cellar(id: &str, name: &str) -> Cellar {
    Cellar {
        id: CellarId::new(id),
        name: name.to_string(),
        layout: vec![6, 6, 6, 6],
        has_basket: false,
    }
}

pub fn grape(name: &str, abbreviation: &str) -> GrapeMaster {
    GrapeMaster {
        id: GrapeId::new(name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        abbreviation: Some(abbreviation.to_string()),
    }
}

/// Builder for wine records used across the integration suites.
pub struct WineBuilder {
    record: WineRecord,
}

impl WineBuilder {
    pub fn new(id: &str) -> Self {
        Self { record: WineRecord::new(id) }
    }

    /// Empty rack slot at `cellar`/`position`.
    pub fn slot(id: &str, cellar: &str, position: &str) -> Self {
        Self::new(id).stored(cellar, position)
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn producer(mut self, producer: &str) -> Self {
        self.record.producer = producer.to_string();
        self
    }

    pub fn vintage(mut self, vintage: i32) -> Self {
        self.record.vintage = Some(vintage);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.record.price = Some(price);
        self
    }

    pub fn region(mut self, country: &str, region_1: &str) -> Self {
        self.record.country = Some(country.to_string());
        self.record.region_1 = region_1.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.record.tag_texts = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn cepage(mut self, name: &str, abbreviation: &str, percentage: f64) -> Self {
        self.record
            .cepages
            .push(Cepage::new(name, Some(abbreviation), Some(percentage)));
        self
    }

    pub fn stored(mut self, cellar: &str, position: &str) -> Self {
        self.record.cellar_id = Some(CellarId::new(cellar));
        self.record.position = Some(position.to_string());
        self
    }

    pub fn bought_at(mut self, bought_at: NaiveDate) -> Self {
        self.record.bought_at = Some(bought_at);
        self
    }

    pub fn drunk_at(mut self, drunk_at: NaiveDate) -> Self {
        self.record.drunk_at = Some(drunk_at);
        self
    }

    pub fn build(self) -> WineRecord {
        self.record
    }
}
