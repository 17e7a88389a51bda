//! Form state of the wine create/edit dialog.
//!
//! The dialog works on a [`WineDraft`], an independent copy of one record.
//! Setters validate as the user types; [`WineDialog::prepare_save`] re-checks
//! the save-time rules and turns the draft into a [`WinePayload`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use tracing::debug;

use llwc_core::input::{parse_date, parse_percentage, parse_price, parse_vintage};
use llwc_core::{
    Cepage, CellarChoice, CoreError, GrapeMaster, Placement, RegionPath, WineId, WinePayload,
    WineRecord,
};
use llwc_storage::{FieldErrors, SameWinesQuery};

use crate::error::EngineError;

const NAME_REQUIRED: &str = "Name cannot be empty.";
const POSITION_REQUIRED: &str = "Position cannot be empty while a cellar is selected.";

/// Today's date in local time, the default for `bought_at` and `drunk_at`.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Position,
    Cepages,
    Vintage,
    Price,
    BoughtAt,
    DrunkAt,
}

pub type ValidationErrors = BTreeMap<FormField, String>;

/// Editable copy of a wine's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WineDraft {
    pub name: String,
    pub producer: String,
    pub vintage: Option<i32>,
    pub region: RegionPath,
    pub cepages: Vec<Cepage>,
    pub bought_at: Option<NaiveDate>,
    pub bought_from: String,
    pub price: Option<f64>,
    pub drunk_at: Option<NaiveDate>,
    pub note: String,
    pub tag_texts: Vec<String>,
    pub cellar: CellarChoice,
    pub position: Option<String>,
}

impl Default for WineDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            producer: String::new(),
            vintage: None,
            region: RegionPath::default(),
            cepages: Vec::new(),
            bought_at: None,
            bought_from: String::new(),
            price: None,
            drunk_at: None,
            note: String::new(),
            tag_texts: Vec::new(),
            cellar: CellarChoice::NotInCellar,
            position: None,
        }
    }
}

impl WineDraft {
    /// Blank draft placed where `slot` is, if anything was selected.
    fn blank(slot: Option<&WineRecord>, today: NaiveDate) -> Self {
        Self {
            bought_at: Some(today),
            cellar: CellarChoice::from_cellar_id(slot.and_then(|s| s.cellar_id.as_ref())),
            position: slot.and_then(|s| s.position.clone()),
            ..Self::default()
        }
    }

    fn from_record(record: &WineRecord) -> Self {
        Self {
            name: record.name.clone(),
            producer: record.producer.clone(),
            vintage: record.vintage,
            region: RegionPath::of(record),
            cepages: record.cepages.clone(),
            bought_at: record.bought_at,
            bought_from: record.bought_from.clone(),
            price: record.price,
            drunk_at: record.drunk_at,
            note: record.note.clone(),
            tag_texts: record.tag_texts.clone(),
            cellar: CellarChoice::from_cellar_id(record.cellar_id.as_ref()),
            position: record.position.clone(),
        }
    }

    pub fn region_path(&self) -> Option<String> {
        self.region.render()
    }
}

/// Which backend call a save turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(WineId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub target: SaveTarget,
    pub payload: WinePayload,
    /// The draft carries a tag the vocabulary does not know yet.
    pub new_tags: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved { new_tags: bool },
    /// Local validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The backend refused one or more fields; the dialog stays open.
    Rejected(FieldErrors),
}

/// Switches of the "find same wines" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameWineKeys {
    pub name: bool,
    pub producer: bool,
    pub fuzzy: bool,
}

impl Default for SameWineKeys {
    fn default() -> Self {
        Self { name: true, producer: false, fuzzy: false }
    }
}

impl SameWineKeys {
    /// Turning fuzzy on switches the exact keys off.
    pub fn set_fuzzy(&mut self, fuzzy: bool) {
        *self = Self { name: false, producer: false, fuzzy };
    }

    pub fn set_name(&mut self, name: bool) {
        self.name = name;
        self.fuzzy = false;
    }

    pub fn set_producer(&mut self, producer: bool) {
        self.producer = producer;
        self.fuzzy = false;
    }
}

#[derive(Debug, Clone)]
pub struct WineDialog {
    open: bool,
    action: DialogAction,
    target: Option<WineId>,
    draft: WineDraft,
    dont_move: bool,
    validation: ValidationErrors,
    api_errors: FieldErrors,
    invalid_percentages: BTreeSet<String>,
}

impl Default for WineDialog {
    fn default() -> Self {
        Self::closed()
    }
}

impl WineDialog {
    pub fn closed() -> Self {
        Self {
            open: false,
            action: DialogAction::Create,
            target: None,
            draft: WineDraft::default(),
            dont_move: false,
            validation: ValidationErrors::new(),
            api_errors: FieldErrors::default(),
            invalid_percentages: BTreeSet::new(),
        }
    }

    /// Opens the dialog with a draft derived from `selected`.
    ///
    /// `Create` starts blank, placed at the selected slot if there is one.
    /// `Edit` copies the selected record and keeps it where it is.
    pub fn open(
        &mut self,
        action: DialogAction,
        selected: Option<&WineRecord>,
        today: NaiveDate,
    ) -> Result<(), EngineError> {
        let (draft, target) = match action {
            DialogAction::Create => (WineDraft::blank(selected, today), None),
            DialogAction::Edit => {
                let record = selected.ok_or(EngineError::NoSelection)?;
                (WineDraft::from_record(record), Some(record.id.clone()))
            }
        };
        *self = Self {
            open: true,
            action,
            target,
            draft,
            dont_move: action == DialogAction::Edit,
            ..Self::closed()
        };
        debug!(?action, wine = ?self.target, "wine dialog opened");
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn action(&self) -> DialogAction {
        self.action
    }

    pub fn target(&self) -> Option<&WineId> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> &WineDraft {
        &self.draft
    }

    pub fn dont_move(&self) -> bool {
        self.dont_move
    }

    pub fn validation(&self) -> &ValidationErrors {
        &self.validation
    }

    pub fn api_errors(&self) -> &FieldErrors {
        &self.api_errors
    }

    /// Whether the save control should show an error state.
    pub fn has_errors(&self) -> bool {
        !self.validation.is_empty() || !self.api_errors.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        if self.draft.name.is_empty() {
            self.validation.insert(FormField::Name, NAME_REQUIRED.to_string());
        } else {
            self.validation.remove(&FormField::Name);
        }
    }

    pub fn set_producer(&mut self, producer: impl Into<String>) {
        self.draft.producer = producer.into();
    }

    pub fn set_bought_from(&mut self, bought_from: impl Into<String>) {
        self.draft.bought_from = bought_from.into();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.draft.note = note.into();
    }

    pub fn set_vintage(&mut self, text: &str) {
        if let Some(vintage) = self.check(FormField::Vintage, parse_vintage(text)) {
            self.draft.vintage = vintage;
        }
    }

    pub fn set_price(&mut self, text: &str) {
        if let Some(price) = self.check(FormField::Price, parse_price(text)) {
            self.draft.price = price;
        }
    }

    pub fn set_bought_at(&mut self, text: &str) {
        if let Some(date) = self.check(FormField::BoughtAt, parse_date(text)) {
            self.draft.bought_at = date;
        }
    }

    pub fn set_drunk_at(&mut self, text: &str) {
        if let Some(date) = self.check(FormField::DrunkAt, parse_date(text)) {
            self.draft.drunk_at = date;
        }
    }

    // Records or clears the field error; the previous value stays on failure.
    fn check<T>(&mut self, field: FormField, parsed: Result<T, CoreError>) -> Option<T> {
        match parsed {
            Ok(value) => {
                self.validation.remove(&field);
                Some(value)
            }
            Err(err) => {
                self.validation.insert(field, err.to_string());
                None
            }
        }
    }

    /// Replaces the tag list; duplicates keep their first occurrence.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft.tag_texts.clear();
        for tag in tags {
            self.add_tag(tag);
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.is_empty() && !self.draft.tag_texts.contains(&tag) {
            self.draft.tag_texts.push(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.tag_texts.retain(|t| t != tag);
    }

    /// Picks a `>`-joined path from the region vocabulary. An empty path
    /// leaves the region untouched.
    pub fn set_region_path(&mut self, path: &str) {
        if let Some(region) = RegionPath::parse(path) {
            self.draft.region = region;
        }
    }

    pub fn region_path(&self) -> Option<String> {
        self.draft.region_path()
    }

    pub fn set_country(&mut self, country: Option<String>) {
        self.draft.region.country = country;
    }

    /// Sets `region_<level>`, `level` counting from 1.
    pub fn set_region(&mut self, level: usize, region: impl Into<String>) -> Result<(), EngineError> {
        let slot = level
            .checked_sub(1)
            .and_then(|index| self.draft.region.regions.get_mut(index))
            .ok_or_else(|| CoreError::InvalidData(format!("region level {level} out of range")))?;
        *slot = region.into();
        Ok(())
    }

    /// Replaces the blend with the grapes named in `names`, in that order.
    ///
    /// Grapes already in the blend keep their percentage. A lone grape picked
    /// on an empty blend starts at 100%, every other new grape at 0%.
    pub fn select_grapes<S: AsRef<str>>(&mut self, names: &[S], catalog: &[GrapeMaster]) {
        let lone_first = self.draft.cepages.is_empty() && names.len() == 1;
        let current = std::mem::take(&mut self.draft.cepages);
        self.draft.cepages = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                current
                    .iter()
                    .find(|cepage| cepage.name == name)
                    .cloned()
                    .unwrap_or_else(|| {
                        let abbreviation = catalog
                            .iter()
                            .find(|grape| grape.name == name)
                            .and_then(|grape| grape.abbreviation.as_deref());
                        let percentage = if lone_first { 100.0 } else { 0.0 };
                        Cepage::new(name, abbreviation, Some(percentage))
                    })
            })
            .collect();

        let selected: BTreeSet<&str> = names.iter().map(|name| name.as_ref()).collect();
        self.invalid_percentages.retain(|name| selected.contains(name.as_str()));
        self.sync_cepage_error(None);
    }

    pub fn set_cepage_percentage(&mut self, name: &str, text: &str) -> Result<(), EngineError> {
        let cepage = self
            .draft
            .cepages
            .iter_mut()
            .find(|cepage| cepage.name == name)
            .ok_or_else(|| CoreError::InvalidData(format!("grape {name:?} is not in the blend")))?;
        match parse_percentage(text) {
            Ok(percentage) => {
                cepage.percentage = percentage;
                self.invalid_percentages.remove(name);
                self.sync_cepage_error(None);
            }
            Err(err) => {
                self.invalid_percentages.insert(name.to_string());
                self.sync_cepage_error(Some(err.to_string()));
            }
        }
        Ok(())
    }

    fn sync_cepage_error(&mut self, latest: Option<String>) {
        if self.invalid_percentages.is_empty() {
            self.validation.remove(&FormField::Cepages);
            return;
        }
        let message = latest.unwrap_or_else(|| {
            let names: Vec<&str> = self.invalid_percentages.iter().map(String::as_str).collect();
            format!("invalid percentage for {}", names.join(", "))
        });
        self.validation.insert(FormField::Cepages, message);
    }

    pub fn set_cellar(&mut self, cellar: CellarChoice) {
        if cellar.is_not_in_cellar() {
            self.validation.remove(&FormField::Position);
        }
        self.draft.cellar = cellar;
    }

    pub fn set_position(&mut self, text: &str) {
        if self.draft.cellar.is_not_in_cellar() || !text.is_empty() {
            self.validation.remove(&FormField::Position);
        }
        self.draft.position = if text.is_empty() { None } else { Some(text.to_string()) };
    }

    /// Only an edit can leave the bottle where it is; create mode ignores the
    /// toggle.
    pub fn set_dont_move(&mut self, dont_move: bool) {
        self.dont_move = dont_move && self.action == DialogAction::Edit;
    }

    fn keeps_placement(&self) -> bool {
        self.action == DialogAction::Edit && self.dont_move
    }

    /// Marks the bottle as drunk and takes it out of its cellar.
    pub fn drink(&mut self, today: NaiveDate) {
        if self.draft.drunk_at.is_none() {
            self.draft.drunk_at = Some(today);
            self.validation.remove(&FormField::DrunkAt);
        }
        self.dont_move = false;
        self.set_cellar(CellarChoice::NotInCellar);
    }

    /// Fills a new wine from one recorded earlier. Placement, dates and the
    /// note are not copied.
    pub fn copy_from_history(&mut self, record: &WineRecord) -> Result<(), EngineError> {
        if self.action != DialogAction::Create {
            return Err(EngineError::NotInCreateMode);
        }
        let draft = &mut self.draft;
        draft.name = record.name.clone();
        draft.producer = record.producer.clone();
        draft.vintage = record.vintage;
        draft.region = RegionPath::of(record);
        draft.cepages = record.cepages.clone();
        draft.bought_from = record.bought_from.clone();
        draft.price = record.price;
        draft.tag_texts = record.tag_texts.clone();
        for field in [FormField::Name, FormField::Vintage, FormField::Price, FormField::Cepages] {
            self.validation.remove(&field);
        }
        self.invalid_percentages.clear();
        if self.draft.name.is_empty() {
            self.validation.insert(FormField::Name, NAME_REQUIRED.to_string());
        }
        Ok(())
    }

    /// Lookup of drunk wines matching the draft, `None` when every switch is
    /// off.
    pub fn same_wines_query(&self, keys: SameWineKeys) -> Option<SameWinesQuery> {
        if !(keys.name || keys.producer || keys.fuzzy) {
            return None;
        }
        let draft = &self.draft;
        let mut query = SameWinesQuery { is_drunk: true, ..SameWinesQuery::default() };
        if keys.fuzzy {
            query.name_or_producer = Some(format!("{}{}", draft.name, draft.producer));
            return Some(query);
        }
        if keys.name {
            query.name = Some(draft.name.clone());
        }
        if keys.producer {
            query.producer = Some(draft.producer.clone());
        }
        Some(query)
    }

    fn position_required(&self) -> bool {
        !self.draft.cellar.is_not_in_cellar() && self.draft.position.is_none() && !self.keeps_placement()
    }

    /// Save-time checks. Clears earlier backend errors and re-runs the name
    /// and position rules; any pending keystroke error also fails the save.
    pub fn validate_on_save(&mut self) -> bool {
        self.api_errors = FieldErrors::default();
        let mut valid = self.validation.is_empty();
        if self.draft.name.is_empty() {
            self.validation.insert(FormField::Name, NAME_REQUIRED.to_string());
            valid = false;
        }
        if self.position_required() {
            self.validation.insert(FormField::Position, POSITION_REQUIRED.to_string());
            valid = false;
        }
        valid
    }

    pub fn placement(&self) -> Placement {
        if self.keeps_placement() {
            return Placement::Unchanged;
        }
        match &self.draft.cellar {
            CellarChoice::NotInCellar => Placement::Remove,
            CellarChoice::Cellar(cellar_id) => Placement::Store {
                cellar_id: cellar_id.clone(),
                position: self.draft.position.clone(),
            },
        }
    }

    pub fn build_payload(&self) -> WinePayload {
        let draft = &self.draft;
        let [region_1, region_2, region_3, region_4, region_5] = draft.region.regions.clone();
        let mut cepages = draft.cepages.clone();
        cepages.sort_by(|a, b| {
            let a = a.percentage.unwrap_or(0.0);
            let b = b.percentage.unwrap_or(0.0);
            b.total_cmp(&a)
        });
        WinePayload {
            name: draft.name.clone(),
            producer: draft.producer.clone(),
            country: draft.region.country.clone(),
            region_1,
            region_2,
            region_3,
            region_4,
            region_5,
            cepages,
            vintage: draft.vintage,
            bought_at: draft.bought_at,
            bought_from: draft.bought_from.clone(),
            price: draft.price,
            drunk_at: draft.drunk_at,
            note: draft.note.clone(),
            tag_texts: draft.tag_texts.clone(),
            placement: self.placement(),
        }
    }

    /// Validates and builds the request for the sink. `Ok(None)` means local
    /// validation failed and nothing must be sent.
    pub fn prepare_save(&mut self, known_tags: &[String]) -> Result<Option<SaveRequest>, EngineError> {
        if !self.open {
            return Err(EngineError::DialogClosed);
        }
        if !self.validate_on_save() {
            debug!(errors = self.validation.len(), "save blocked by validation");
            return Ok(None);
        }
        let target = match self.action {
            DialogAction::Create => SaveTarget::Create,
            DialogAction::Edit => SaveTarget::Update(self.target.clone().ok_or(EngineError::NoSelection)?),
        };
        let new_tags = self
            .draft
            .tag_texts
            .iter()
            .any(|tag| !known_tags.contains(tag));
        Ok(Some(SaveRequest {
            target,
            payload: self.build_payload(),
            new_tags,
        }))
    }

    pub fn apply_rejection(&mut self, errors: FieldErrors) {
        self.api_errors = errors;
    }
}
