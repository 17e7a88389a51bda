use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use llwc_core::{Cellar, CellarId, GrapeMaster, WineRecord};

use crate::error::StorageError;
use crate::traits::{
    CellarDirectory, GrapeCatalog, RegionVocabulary, TagVocabulary, WineListQuery, WineSource,
};

/// Reference data and the current wine list for one signed-in session.
///
/// The wine list is only ever replaced as a whole, so a caller holding the
/// previous `Arc` keeps a consistent snapshot while a refresh lands.
#[derive(Debug, Default)]
pub struct SessionStore {
    wines: Arc<[WineRecord]>,
    wine_query: WineListQuery,
    cellars: Vec<Cellar>,
    tags: Vec<String>,
    regions: Vec<String>,
    grapes: Vec<GrapeMaster>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wines(&self) -> Arc<[WineRecord]> {
        Arc::clone(&self.wines)
    }

    pub fn wine_list(&self) -> &[WineRecord] {
        &self.wines
    }

    pub fn wine_query(&self) -> &WineListQuery {
        &self.wine_query
    }

    pub fn set_wine_query(&mut self, query: WineListQuery) {
        self.wine_query = query;
    }

    pub fn replace_wines(&mut self, wines: Vec<WineRecord>) {
        debug!(count = wines.len(), "replacing wine list");
        self.wines = wines.into();
    }

    pub fn cellars(&self) -> &[Cellar] {
        &self.cellars
    }

    pub fn replace_cellars(&mut self, cellars: Vec<Cellar>) {
        self.cellars = cellars;
    }

    pub fn cellar_name(&self, cellar_id: &CellarId) -> Option<&str> {
        self.cellars
            .iter()
            .find(|cellar| &cellar.id == cellar_id)
            .map(|cellar| cellar.name.as_str())
    }

    pub fn cellar_names(&self) -> BTreeMap<CellarId, String> {
        self.cellars
            .iter()
            .map(|cellar| (cellar.id.clone(), cellar.name.clone()))
            .collect()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn knows_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|known| known == tag)
    }

    pub fn replace_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn replace_regions(&mut self, regions: Vec<String>) {
        self.regions = regions;
    }

    pub fn grapes(&self) -> &[GrapeMaster] {
        &self.grapes
    }

    pub fn replace_grapes(&mut self, grapes: Vec<GrapeMaster>) {
        self.grapes = grapes;
    }

    pub fn refresh_wines(&mut self, source: &dyn WineSource) -> Result<(), StorageError> {
        let wines = source.list_wines(&self.wine_query)?;
        self.replace_wines(wines);
        Ok(())
    }

    pub fn refresh_tags(&mut self, vocabulary: &dyn TagVocabulary) -> Result<(), StorageError> {
        self.tags = vocabulary.list_tags()?;
        debug!(count = self.tags.len(), "refreshed tag vocabulary");
        Ok(())
    }

    pub fn refresh_regions(&mut self, vocabulary: &dyn RegionVocabulary) -> Result<(), StorageError> {
        self.regions = vocabulary.list_regions()?;
        Ok(())
    }

    pub fn refresh_cellars(&mut self, directory: &dyn CellarDirectory) -> Result<(), StorageError> {
        self.cellars = directory.list_cellars()?;
        debug!(count = self.cellars.len(), "refreshed cellars");
        Ok(())
    }

    pub fn refresh_grapes(&mut self, catalog: &dyn GrapeCatalog) -> Result<(), StorageError> {
        self.grapes = catalog.list_grapes()?;
        Ok(())
    }
}
