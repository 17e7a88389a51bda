use llwc_core::{Cellar, CellarId, WineRecord};

use crate::comparator::{SortOrder, sort_rows};

/// Selection string the cellar picker uses for "not in any cellar".
pub const UNSTORED_SELECTION: &str = "null";

/// Which rows survive the filter step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellarFilter {
    /// No filtering; the record source already scoped the list.
    #[default]
    All,
    /// Cellar memberships; `None` stands for "not in any cellar" and is kept
    /// last.
    Members(Vec<Option<CellarId>>),
}

impl CellarFilter {
    pub fn members(members: impl IntoIterator<Item = Option<CellarId>>) -> Self {
        let mut cellars = Vec::new();
        let mut unstored = false;
        for member in members {
            match member {
                Some(id) if !cellars.contains(&Some(id.clone())) => cellars.push(Some(id)),
                Some(_) => {}
                None => unstored = true,
            }
        }
        if unstored {
            cellars.push(None);
        }
        CellarFilter::Members(cellars)
    }

    /// Parses picker values, where `"null"` selects wines outside any cellar.
    pub fn from_selection<S: AsRef<str>>(values: &[S]) -> Self {
        Self::members(values.iter().map(|value| match value.as_ref() {
            UNSTORED_SELECTION => None,
            id => Some(CellarId::new(id)),
        }))
    }

    /// Every known cellar plus wines outside any cellar.
    pub fn everything(cellars: &[Cellar]) -> Self {
        Self::members(
            cellars
                .iter()
                .map(|cellar| Some(cellar.id.clone()))
                .chain(std::iter::once(None)),
        )
    }

    pub fn matches(&self, record: &WineRecord) -> bool {
        match self {
            CellarFilter::All => true,
            CellarFilter::Members(members) => {
                let cellar = record.stored_cellar();
                members.iter().any(|member| member.as_ref() == cellar)
            }
        }
    }

    /// Number of selected memberships, `None` when unfiltered.
    pub fn member_count(&self) -> Option<usize> {
        match self {
            CellarFilter::All => None,
            CellarFilter::Members(members) => Some(members.len()),
        }
    }

    /// True when the only selected membership is "not in any cellar".
    pub fn only_unstored(&self) -> bool {
        matches!(self, CellarFilter::Members(members) if members.as_slice() == [None])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    rows_per_page: usize,
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Self {
        Self { page: 0, rows_per_page }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size always returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
        self.page = 0;
    }

    pub fn start(&self) -> usize {
        self.page.saturating_mul(self.rows_per_page)
    }

    pub fn end(&self) -> usize {
        self.start().saturating_add(self.rows_per_page)
    }
}

/// Filler rows that keep the last page as tall as a full one.
pub fn empty_rows(total: usize, page: usize, rows_per_page: usize) -> usize {
    if page == 0 {
        return 0;
    }
    (page + 1)
        .saturating_mul(rows_per_page)
        .saturating_sub(total)
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRows<'a> {
    pub rows: Vec<&'a WineRecord>,
    /// Row count after filtering, before paging.
    pub total: usize,
    pub empty_rows: usize,
}

/// Filter, sort, then page `all`.
pub fn visible_rows<'a>(
    all: &'a [WineRecord],
    sort: SortOrder,
    filter: &CellarFilter,
    pagination: Pagination,
) -> VisibleRows<'a> {
    let filtered: Vec<&WineRecord> = all.iter().filter(|record| filter.matches(record)).collect();
    let total = filtered.len();
    let rows = sort_rows(filtered, sort)
        .into_iter()
        .skip(pagination.start())
        .take(pagination.rows_per_page())
        .collect();
    VisibleRows {
        rows,
        total,
        empty_rows: empty_rows(total, pagination.page(), pagination.rows_per_page()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llwc_core::Column;

    fn stored(id: &str, cellar: Option<&str>) -> WineRecord {
        let mut record = WineRecord::new(id);
        record.name = id.to_uppercase();
        record.cellar_id = cellar.map(CellarId::new);
        record.position = cellar.map(|_| "1-1".to_string());
        record
    }

    #[test]
    fn sentinel_member_moves_to_end() {
        let filter = CellarFilter::from_selection(&["null", "2", "1", "2"]);
        assert_eq!(
            filter,
            CellarFilter::Members(vec![Some(CellarId::new("2")), Some(CellarId::new("1")), None])
        );
    }

    #[test]
    fn filter_by_membership() {
        let rows = vec![stored("a", Some("1")), stored("b", Some("2")), stored("c", None)];

        let only_first = CellarFilter::from_selection(&["1"]);
        let kept: Vec<_> = rows.iter().filter(|r| only_first.matches(r)).map(|r| r.id.as_str()).collect();
        assert_eq!(kept, vec!["a"]);

        let unstored = CellarFilter::from_selection(&["null"]);
        assert!(unstored.only_unstored());
        let kept: Vec<_> = rows.iter().filter(|r| unstored.matches(r)).map(|r| r.id.as_str()).collect();
        assert_eq!(kept, vec!["c"]);

        assert!(rows.iter().all(|r| CellarFilter::All.matches(r)));
    }

    #[test]
    fn empty_rows_only_past_first_page() {
        assert_eq!(empty_rows(3, 0, 10), 0);
        assert_eq!(empty_rows(0, 0, 10), 0);
        assert_eq!(empty_rows(13, 1, 10), 7);
        assert_eq!(empty_rows(25, 1, 10), 0);
        assert_eq!(empty_rows(5, 3, 10), 35);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut pagination = Pagination::new(25);
        pagination.set_page(3);
        assert_eq!(pagination.start(), 75);
        pagination.set_rows_per_page(50);
        assert_eq!(pagination.page(), 0);
        assert_eq!(pagination.end(), 50);
    }

    #[test]
    fn pipeline_filters_sorts_and_pages() {
        let rows = vec![
            stored("d", Some("1")),
            stored("b", Some("1")),
            stored("x", Some("2")),
            stored("a", Some("1")),
            stored("c", Some("1")),
        ];
        let filter = CellarFilter::from_selection(&["1"]);
        let mut pagination = Pagination::new(3);
        pagination.set_page(1);

        let visible = visible_rows(&rows, SortOrder::asc(Column::Name), &filter, pagination);

        let ids: Vec<_> = visible.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d"]);
        assert_eq!(visible.total, 4);
        assert_eq!(visible.empty_rows, 2);
    }
}
