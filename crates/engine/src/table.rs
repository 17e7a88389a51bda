use tracing::debug;

use llwc_core::{Cellar, Column, WineRecord};

use crate::comparator::{Direction, SortOrder};
use crate::dialog::DialogAction;
use crate::pipeline::{CellarFilter, Pagination, VisibleRows, visible_rows};

/// The two wine tables of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Every wine of the account, filtered client-side by cellar.
    List,
    /// One cellar (or no cellar) as scoped by the backend query.
    Search,
}

const SEARCH_COLUMNS: [Column; 16] = [
    Column::Position,
    Column::TagTexts,
    Column::Name,
    Column::Producer,
    Column::Vintage,
    Column::Price,
    Column::DrunkAt,
    Column::Country,
    Column::Region1,
    Column::Region2,
    Column::Region3,
    Column::Region4,
    Column::Region5,
    Column::Cepages,
    Column::BoughtAt,
    Column::BoughtFrom,
];

const LIST_COLUMNS: [Column; 14] = [
    Column::TagTexts,
    Column::Name,
    Column::Producer,
    Column::Vintage,
    Column::Country,
    Column::Region1,
    Column::Region2,
    Column::Region3,
    Column::Region4,
    Column::Region5,
    Column::Cepages,
    Column::BoughtAt,
    Column::BoughtFrom,
    Column::Price,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCell {
    pub column: Column,
    pub label: String,
    pub numeric: bool,
}

impl HeadCell {
    fn new(column: Column) -> Self {
        Self {
            column,
            label: column.label(),
            numeric: column.is_numeric(),
        }
    }
}

/// Result of clicking a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClick {
    Selected,
    Open(DialogAction),
}

/// Sort, filter, paging and selection state of one wine table.
#[derive(Debug, Clone)]
pub struct WineTable {
    kind: ViewKind,
    sort: SortOrder,
    filter: CellarFilter,
    pagination: Pagination,
    selected: Option<WineRecord>,
}

impl WineTable {
    pub fn new(kind: ViewKind, sort: SortOrder, rows_per_page: usize) -> Self {
        Self {
            kind,
            sort,
            filter: CellarFilter::All,
            pagination: Pagination::new(rows_per_page),
            selected: None,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn filter(&self) -> &CellarFilter {
        &self.filter
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn selected(&self) -> Option<&WineRecord> {
        self.selected.as_ref()
    }

    /// Clicking the current ascending column flips it to descending; any
    /// other click sorts that column ascending.
    pub fn request_sort(&mut self, column: Column) {
        let flip = self.sort.column == column && self.sort.direction == Direction::Asc;
        self.sort = if flip { SortOrder::desc(column) } else { SortOrder::asc(column) };
        debug!(column = %column, direction = ?self.sort.direction, "sort requested");
    }

    pub fn select_cellars(&mut self, filter: CellarFilter) {
        self.filter = filter;
    }

    /// Selects every cellar plus wines outside any cellar. Only the list view
    /// filters client-side; the search view stays unfiltered.
    pub fn reset_filter(&mut self, cellars: &[Cellar]) {
        if self.kind == ViewKind::List {
            self.filter = CellarFilter::everything(cellars);
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.pagination.set_rows_per_page(rows_per_page);
    }

    pub fn rows<'a>(&self, all: &'a [WineRecord]) -> VisibleRows<'a> {
        visible_rows(all, self.sort, &self.filter, self.pagination)
    }

    /// First click selects a row, a second click on the selected row opens
    /// the dialog: `Create` for an empty slot, `Edit` otherwise.
    pub fn click_row(&mut self, row: &WineRecord) -> RowClick {
        let already_selected = self.selected.as_ref().is_some_and(|selected| selected.id == row.id);
        self.selected = Some(row.clone());
        if !already_selected {
            return RowClick::Selected;
        }
        if row.is_empty_slot() {
            RowClick::Open(DialogAction::Create)
        } else {
            RowClick::Open(DialogAction::Edit)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn head_cells(&self) -> Vec<HeadCell> {
        match self.kind {
            ViewKind::Search => SEARCH_COLUMNS.iter().copied().map(HeadCell::new).collect(),
            ViewKind::List => {
                let mut cells = Vec::with_capacity(LIST_COLUMNS.len() + 2);
                if self.filter.member_count() != Some(1) {
                    cells.push(HeadCell::new(Column::CellarName));
                }
                if !self.filter.only_unstored() {
                    cells.push(HeadCell::new(Column::Position));
                }
                cells.extend(LIST_COLUMNS.iter().copied().map(HeadCell::new));
                cells
            }
        }
    }
}
