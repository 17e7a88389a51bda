use std::cell::{Cell, RefCell};

use llwc_core::{
    Cellar, CellarId, GrapeMaster, NOT_IN_CELLAR, Placement, RegionPath, WineId, WinePayload,
    WineRecord,
};
use llwc_storage::{
    CellarDirectory, FieldErrors, GrapeCatalog, RegionVocabulary, SameWineFinder, SameWinesQuery,
    StorageError, TagVocabulary, WineListQuery, WineSink, WineSource,
};

/// A request the page handed to the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SentWine {
    Created(WinePayload),
    Updated(WineId, WinePayload),
}

impl SentWine {
    pub fn payload(&self) -> &WinePayload {
        match self {
            SentWine::Created(payload) | SentWine::Updated(_, payload) => payload,
        }
    }
}

/// In-memory stand-in for the wine backend.
///
/// Saves are applied to `wines` the way the real backend would, and new tags
/// and region paths land in the vocabularies.
#[derive(Debug, Default)]
pub struct TestBackend {
    pub wines: Vec<WineRecord>,
    pub cellars: Vec<Cellar>,
    pub tags: Vec<String>,
    pub regions: Vec<String>,
    pub grapes: Vec<GrapeMaster>,
    sent: Vec<SentWine>,
    reject_next: Option<FieldErrors>,
    unavailable: bool,
    offline_after_save: bool,
    next_id: usize,
    tag_reads: Cell<usize>,
    wine_reads: Cell<usize>,
    same_queries: RefCell<Vec<SameWinesQuery>>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wines(mut self, wines: Vec<WineRecord>) -> Self {
        self.wines = wines;
        self
    }

    pub fn with_cellars(mut self, cellars: Vec<Cellar>) -> Self {
        self.cellars = cellars;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_grapes(mut self, grapes: Vec<GrapeMaster>) -> Self {
        self.grapes = grapes;
        self
    }

    /// The next create or update fails with these field errors.
    pub fn reject_next(&mut self, errors: FieldErrors) {
        self.reject_next = Some(errors);
    }

    /// Every call fails with `StorageError::Unavailable` until cleared.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// The backend goes offline right after the next successful save.
    pub fn go_offline_after_save(&mut self) {
        self.offline_after_save = true;
    }

    pub fn sent(&self) -> &[SentWine] {
        &self.sent
    }

    pub fn last_sent(&self) -> Option<&SentWine> {
        self.sent.last()
    }

    pub fn tag_reads(&self) -> usize {
        self.tag_reads.get()
    }

    pub fn wine_reads(&self) -> usize {
        self.wine_reads.get()
    }

    pub fn same_queries(&self) -> Vec<SameWinesQuery> {
        self.same_queries.borrow().clone()
    }

    pub fn wine(&self, wine_id: &WineId) -> Option<&WineRecord> {
        self.wines.iter().find(|wine| &wine.id == wine_id)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("test backend is offline".into()));
        }
        Ok(())
    }

    fn take_rejection(&mut self) -> Result<(), StorageError> {
        match self.reject_next.take() {
            Some(errors) => Err(StorageError::Rejected(errors)),
            None => Ok(()),
        }
    }

    fn saved(&mut self, payload: &WinePayload) {
        self.learn_vocabulary(payload);
        if std::mem::take(&mut self.offline_after_save) {
            self.unavailable = true;
        }
    }

    fn learn_vocabulary(&mut self, payload: &WinePayload) {
        for tag in &payload.tag_texts {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
        let region = RegionPath {
            country: payload.country.clone(),
            regions: [
                payload.region_1.clone(),
                payload.region_2.clone(),
                payload.region_3.clone(),
                payload.region_4.clone(),
                payload.region_5.clone(),
            ],
        };
        if let Some(path) = region.render()
            && !self.regions.contains(&path)
        {
            self.regions.push(path);
        }
    }
}

fn apply_payload(record: &mut WineRecord, payload: &WinePayload) {
    record.name = payload.name.clone();
    record.producer = payload.producer.clone();
    record.country = payload.country.clone();
    record.region_1 = payload.region_1.clone();
    record.region_2 = payload.region_2.clone();
    record.region_3 = payload.region_3.clone();
    record.region_4 = payload.region_4.clone();
    record.region_5 = payload.region_5.clone();
    record.cepages = payload.cepages.clone();
    record.vintage = payload.vintage;
    record.bought_at = payload.bought_at;
    record.bought_from = payload.bought_from.clone();
    record.price = payload.price;
    record.drunk_at = payload.drunk_at;
    record.note = payload.note.clone();
    record.tag_texts = payload.tag_texts.clone();
    match &payload.placement {
        Placement::Unchanged => {}
        Placement::Remove => {
            record.cellar_id = None;
            record.position = None;
        }
        Placement::Store { cellar_id, position } => {
            record.cellar_id = Some(cellar_id.clone());
            record.position = position.clone();
        }
    }
}

fn in_scope(record: &WineRecord, cellar_id: Option<&CellarId>) -> bool {
    match cellar_id {
        None => true,
        Some(id) if id.as_str() == NOT_IN_CELLAR => record.stored_cellar().is_none(),
        Some(id) => record.stored_cellar() == Some(id),
    }
}

impl WineSource for TestBackend {
    fn list_wines(&self, query: &WineListQuery) -> Result<Vec<WineRecord>, StorageError> {
        self.check_available()?;
        self.wine_reads.set(self.wine_reads.get() + 1);
        Ok(self
            .wines
            .iter()
            .filter(|wine| in_scope(wine, query.cellar_id.as_ref()))
            .filter(|wine| match wine.drunk_at {
                Some(_) => query.show_drunk,
                None => query.show_stock,
            })
            .map(|wine| {
                let mut wine = wine.clone();
                wine.cellar_name = wine
                    .stored_cellar()
                    .and_then(|id| self.cellars.iter().find(|cellar| &cellar.id == id))
                    .map(|cellar| cellar.name.clone());
                wine
            })
            .collect())
    }
}

impl WineSink for TestBackend {
    fn create_wine(&mut self, payload: &WinePayload) -> Result<(), StorageError> {
        self.check_available()?;
        self.sent.push(SentWine::Created(payload.clone()));
        self.take_rejection()?;

        self.next_id += 1;
        let mut record = WineRecord::new(format!("created-{}", self.next_id));
        apply_payload(&mut record, payload);
        record.check_placement()?;
        self.wines.push(record);
        self.saved(payload);
        Ok(())
    }

    fn update_wine(&mut self, wine_id: &WineId, payload: &WinePayload) -> Result<(), StorageError> {
        self.check_available()?;
        self.sent.push(SentWine::Updated(wine_id.clone(), payload.clone()));
        self.take_rejection()?;

        let record = self
            .wines
            .iter_mut()
            .find(|wine| &wine.id == wine_id)
            .ok_or_else(|| StorageError::NotFound(wine_id.to_string()))?;
        let mut updated = record.clone();
        apply_payload(&mut updated, payload);
        updated.check_placement()?;
        *record = updated;
        self.saved(payload);
        Ok(())
    }
}

impl TagVocabulary for TestBackend {
    fn list_tags(&self) -> Result<Vec<String>, StorageError> {
        self.check_available()?;
        self.tag_reads.set(self.tag_reads.get() + 1);
        Ok(self.tags.clone())
    }
}

impl RegionVocabulary for TestBackend {
    fn list_regions(&self) -> Result<Vec<String>, StorageError> {
        self.check_available()?;
        Ok(self.regions.clone())
    }
}

impl CellarDirectory for TestBackend {
    fn list_cellars(&self) -> Result<Vec<Cellar>, StorageError> {
        self.check_available()?;
        Ok(self.cellars.clone())
    }
}

impl GrapeCatalog for TestBackend {
    fn list_grapes(&self) -> Result<Vec<GrapeMaster>, StorageError> {
        self.check_available()?;
        Ok(self.grapes.clone())
    }
}

impl SameWineFinder for TestBackend {
    fn find_same(&self, query: &SameWinesQuery) -> Result<Vec<WineRecord>, StorageError> {
        self.check_available()?;
        self.same_queries.borrow_mut().push(query.clone());
        let fuzzy = query.name_or_producer.as_deref().map(str::to_lowercase);
        Ok(self
            .wines
            .iter()
            .filter(|wine| wine.drunk_at.is_some() == query.is_drunk)
            .filter(|wine| query.name.as_ref().is_none_or(|name| &wine.name == name))
            .filter(|wine| query.producer.as_ref().is_none_or(|producer| &wine.producer == producer))
            .filter(|wine| {
                fuzzy.as_deref().is_none_or(|needle| {
                    [&wine.name, &wine.producer]
                        .into_iter()
                        .filter(|field| !field.is_empty())
                        .any(|field| needle.contains(&field.to_lowercase()))
                })
            })
            .cloned()
            .collect())
    }
}
