pub mod comparator;
pub mod config;
pub mod dialog;
pub mod error;
pub mod pipeline;
pub mod table;

pub use comparator::{Direction, SortOrder};
pub use config::ViewConfig;
pub use dialog::{
    DialogAction, FormField, SameWineKeys, SaveOutcome, SaveRequest, SaveTarget, ValidationErrors,
    WineDialog, WineDraft, today,
};
pub use error::EngineError;
pub use pipeline::{CellarFilter, Pagination, VisibleRows, empty_rows, visible_rows};
pub use table::{HeadCell, RowClick, ViewKind, WineTable};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use llwc_core::{WineId, WineRecord};
use llwc_storage::{Backend, SessionStore, StorageError, WineListQuery};

/// One wine table page: session data, table state and the edit dialog.
///
/// Every call that talks to the backend takes it as an argument, so the page
/// itself holds no connection.
pub struct WinePage {
    store: SessionStore,
    table: WineTable,
    dialog: WineDialog,
    config: ViewConfig,
}

impl WinePage {
    pub fn new(kind: ViewKind, config: ViewConfig) -> Self {
        let sort = match kind {
            ViewKind::List => config.list_sort,
            ViewKind::Search => config.search_sort,
        };
        let mut store = SessionStore::new();
        store.set_wine_query(WineListQuery::in_stock(None));
        Self {
            store,
            table: WineTable::new(kind, sort, config.rows_per_page),
            dialog: WineDialog::closed(),
            config,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn table(&self) -> &WineTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut WineTable {
        &mut self.table
    }

    pub fn dialog(&self) -> &WineDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut WineDialog {
        &mut self.dialog
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Loads reference data and the wine list for the current query. The
    /// list view starts with every cellar selected.
    pub fn load<B: Backend>(&mut self, backend: &B) -> Result<(), EngineError> {
        self.store.refresh_cellars(backend)?;
        self.store.refresh_tags(backend)?;
        self.store.refresh_regions(backend)?;
        self.store.refresh_grapes(backend)?;
        self.store.refresh_wines(backend)?;
        self.table.reset_filter(self.store.cellars());
        info!(
            wines = self.store.wine_list().len(),
            cellars = self.store.cellars().len(),
            "wine page loaded"
        );
        Ok(())
    }

    /// Re-scopes the backend query, e.g. when the search view switches
    /// cellar, and reloads the list from the first page.
    pub fn set_query<B: Backend>(&mut self, query: WineListQuery, backend: &B) -> Result<(), EngineError> {
        debug!(?query, "wine list query changed");
        self.store.set_wine_query(query);
        self.store.refresh_wines(backend)?;
        self.table.set_page(0);
        Ok(())
    }

    pub fn visible_rows(&self) -> VisibleRows<'_> {
        self.table.rows(self.store.wine_list())
    }

    pub fn head_cells(&self) -> Vec<HeadCell> {
        self.table.head_cells()
    }

    /// Selects the row, or opens the dialog when it was already selected.
    pub fn click_row(&mut self, wine_id: &WineId, today: NaiveDate) -> Result<RowClick, EngineError> {
        let record = self
            .store
            .wine_list()
            .iter()
            .find(|record| &record.id == wine_id)
            .ok_or_else(|| EngineError::WineNotFound(wine_id.to_string()))?;
        let click = self.table.click_row(record);
        if let RowClick::Open(action) = click {
            self.dialog.open(action, self.table.selected(), today)?;
        }
        Ok(click)
    }

    /// The "add" control: a blank wine outside any cellar.
    pub fn open_create_dialog(&mut self, today: NaiveDate) -> Result<(), EngineError> {
        self.table.clear_selection();
        self.dialog.open(DialogAction::Create, None, today)
    }

    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    /// Sends the dialog to the backend.
    ///
    /// On success the dialog closes and the wine list and region vocabulary
    /// are reloaded (plus the tag vocabulary when the wine introduced a tag).
    /// Validation failures and backend field rejections keep it open. A failed
    /// reload still closes it and returns `EngineError::RefreshAfterSave`.
    pub fn save_dialog<B: Backend>(&mut self, backend: &mut B) -> Result<SaveOutcome, EngineError> {
        let Some(request) = self.dialog.prepare_save(self.store.tags())? else {
            return Ok(SaveOutcome::Invalid(self.dialog.validation().clone()));
        };

        info!(wine = ?request.target, new_tags = request.new_tags, "saving wine");
        let sent = match &request.target {
            SaveTarget::Create => backend.create_wine(&request.payload),
            SaveTarget::Update(wine_id) => backend.update_wine(wine_id, &request.payload),
        };
        match sent {
            Ok(()) => {}
            Err(StorageError::Rejected(errors)) => {
                warn!(%errors, "backend rejected wine");
                self.dialog.apply_rejection(errors.clone());
                return Ok(SaveOutcome::Rejected(errors));
            }
            Err(err) => return Err(err.into()),
        }

        // The wine is stored; the draft must not survive a failed reload.
        self.dialog.close();
        if let Err(err) = self.refresh_after_save(&*backend, request.new_tags) {
            warn!(%err, "reload after save failed");
            return Err(EngineError::RefreshAfterSave(err));
        }
        Ok(SaveOutcome::Saved { new_tags: request.new_tags })
    }

    fn refresh_after_save<B: Backend>(&mut self, backend: &B, new_tags: bool) -> Result<(), StorageError> {
        self.store.refresh_wines(backend)?;
        self.store.refresh_regions(backend)?;
        if new_tags {
            self.store.refresh_tags(backend)?;
        }
        Ok(())
    }

    /// Drunk wines matching the open draft. Empty when every switch is off.
    pub fn find_same_wines<B: Backend>(
        &self,
        keys: SameWineKeys,
        backend: &B,
    ) -> Result<Vec<WineRecord>, EngineError> {
        match self.dialog.same_wines_query(keys) {
            Some(query) => Ok(backend.find_same(&query)?),
            None => Ok(Vec::new()),
        }
    }
}
