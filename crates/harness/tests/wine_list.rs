use llwc_core::{CellarId, Column, NOT_IN_CELLAR, WineId, WineRecord};
use llwc_engine::comparator::sort_rows;
use llwc_engine::{
    CellarFilter, DialogAction, EngineError, RowClick, SortOrder, ViewConfig, ViewKind, WinePage,
    empty_rows,
};
use llwc_harness::{TestBackend, WineBuilder, cellar, date, init_tracing};
use llwc_storage::{StorageError, WineListQuery};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn ids(rows: &[&WineRecord]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
}

fn cellar_backend() -> TestBackend {
    TestBackend::new()
        .with_cellars(vec![cellar("1", "Kitchen"), cellar("2", "Basement")])
        .with_tags(&["aging", "gift"])
        .with_wines(vec![
            WineBuilder::new("chablis").name("Chablis").vintage(2018).tags(&["gift"]).stored("1", "1-1").build(),
            WineBuilder::new("barolo").name("Barolo").vintage(2013).stored("2", "3-4").build(),
            WineBuilder::new("cava").name("Cava").tags(&["aging"]).build(),
            WineBuilder::slot("slot", "1", "1-2").build(),
            WineBuilder::new("drunk").name("Morgon").drunk_at(date(2023, 12, 24)).build(),
        ])
}

fn list_page(backend: &TestBackend) -> Result<WinePage, EngineError> {
    let mut page = WinePage::new(ViewKind::List, ViewConfig::default());
    page.load(backend)?;
    Ok(page)
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn empty_tag_list_sorts_last_ascending() {
    let rows = vec![WineBuilder::new("empty").build(), WineBuilder::new("tagged").tags(&["a"]).build()];
    let sorted = sort_rows(rows.iter().collect(), SortOrder::asc(Column::TagTexts));
    assert_eq!(ids(&sorted), vec!["tagged", "empty"]);
}

#[test]
fn empty_tag_list_sorts_last_descending() {
    let rows = vec![WineBuilder::new("empty").build(), WineBuilder::new("tagged").tags(&["a"]).build()];
    let sorted = sort_rows(rows.iter().collect(), SortOrder::desc(Column::TagTexts));
    assert_eq!(ids(&sorted), vec!["tagged", "empty"]);
}

#[test]
fn empty_cepages_sort_last_both_ways() {
    let rows = vec![
        WineBuilder::new("none").build(),
        WineBuilder::new("merlot").cepage("Merlot", "Me", 100.0).build(),
        WineBuilder::new("cab").cepage("Cabernet Sauvignon", "CS", 100.0).build(),
    ];
    let asc = sort_rows(rows.iter().collect(), SortOrder::asc(Column::Cepages));
    assert_eq!(ids(&asc), vec!["cab", "merlot", "none"]);
    let desc = sort_rows(rows.iter().collect(), SortOrder::desc(Column::Cepages));
    assert_eq!(ids(&desc), vec!["merlot", "cab", "none"]);
}

#[test]
fn falsy_scalars_sort_last_both_ways() {
    let rows = vec![
        WineBuilder::new("no-vintage").build(),
        WineBuilder::new("zero").vintage(0).build(),
        WineBuilder::new("old").vintage(1996).build(),
        WineBuilder::new("young").vintage(2020).build(),
    ];
    for order in [SortOrder::asc(Column::Vintage), SortOrder::desc(Column::Vintage)] {
        let sorted = ids(&sort_rows(rows.iter().collect(), order));
        let tail: Vec<_> = sorted[2..].iter().map(String::as_str).collect();
        assert!(tail.contains(&"no-vintage") && tail.contains(&"zero"), "{order:?}: {sorted:?}");
    }
}

#[test]
fn directions_reverse_non_empty_values() {
    let rows = vec![
        WineBuilder::new("b").name("Bandol").price(3200.0).build(),
        WineBuilder::new("c").name("Cornas").price(5400.0).build(),
        WineBuilder::new("a").name("Arbois").price(2100.0).build(),
    ];
    for column in [Column::Name, Column::Price] {
        let asc = ids(&sort_rows(rows.iter().collect(), SortOrder::asc(column)));
        let mut desc = ids(&sort_rows(rows.iter().collect(), SortOrder::desc(column)));
        desc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(asc, vec!["a", "b", "c"]);
    }
}

#[test]
fn sorting_twice_is_idempotent() {
    let rows = vec![
        WineBuilder::new("1").tags(&["x"]).build(),
        WineBuilder::new("2").build(),
        WineBuilder::new("3").tags(&["a", "b"]).build(),
        WineBuilder::new("4").build(),
        WineBuilder::new("5").tags(&["a"]).build(),
    ];
    for order in [SortOrder::asc(Column::TagTexts), SortOrder::desc(Column::TagTexts)] {
        let once = sort_rows(rows.iter().collect(), order);
        let twice = sort_rows(once.clone(), order);
        assert_eq!(ids(&once), ids(&twice));
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn empty_rows_formula() {
    for total in 0..30 {
        for size in [1, 5, 25] {
            assert_eq!(empty_rows(total, 0, size), 0);
            for page in 1..4 {
                let expected = ((page + 1) * size).saturating_sub(total);
                assert_eq!(empty_rows(total, page, size), expected);
            }
        }
    }
}

#[test]
fn page_window_over_loaded_list() -> TestResult {
    let backend = cellar_backend();
    let mut page = list_page(&backend)?;
    page.table_mut().set_rows_per_page(3);
    page.table_mut().set_page(1);

    let visible = page.visible_rows();
    assert_eq!(visible.total, 4);
    assert_eq!(visible.rows.len(), 1);
    assert_eq!(visible.empty_rows, 2);

    page.table_mut().set_rows_per_page(2);
    assert_eq!(page.table().pagination().page(), 0);
    Ok(())
}

// ============================================================================
// Loading and filtering
// ============================================================================

#[test]
fn load_selects_every_cellar_and_hides_drunk_wines() -> TestResult {
    init_tracing();
    let backend = cellar_backend();
    let page = list_page(&backend)?;

    assert_eq!(page.store().cellars().len(), 2);
    assert_eq!(page.store().tags(), ["aging", "gift"]);
    assert_eq!(
        page.table().filter(),
        &CellarFilter::Members(vec![Some(CellarId::new("1")), Some(CellarId::new("2")), None])
    );

    let visible = page.visible_rows();
    assert_eq!(ids(&visible.rows), vec!["cava", "chablis", "barolo", "slot"]);
    Ok(())
}

#[test]
fn cellar_filter_narrows_rows_and_columns() -> TestResult {
    let backend = cellar_backend();
    let mut page = list_page(&backend)?;

    page.table_mut().select_cellars(CellarFilter::from_selection(&["1"]));
    let visible = page.visible_rows();
    assert_eq!(ids(&visible.rows), vec!["chablis", "slot"]);
    assert_eq!(page.head_cells()[0].column, Column::Position);

    page.table_mut().select_cellars(CellarFilter::from_selection(&["null"]));
    assert_eq!(ids(&page.visible_rows().rows), vec!["cava"]);
    assert_eq!(page.head_cells()[0].column, Column::TagTexts);
    Ok(())
}

#[test]
fn search_view_scopes_query_to_cellar() -> TestResult {
    let backend = cellar_backend();
    let mut page = WinePage::new(ViewKind::Search, ViewConfig::default());
    page.load(&backend)?;
    assert_eq!(page.visible_rows().total, 4);

    page.set_query(WineListQuery::in_stock(Some(CellarId::new("1"))), &backend)?;
    let rows = ids(&page.visible_rows().rows);
    assert_eq!(rows, vec!["chablis", "slot"]);

    page.set_query(WineListQuery::in_stock(Some(CellarId::new(NOT_IN_CELLAR))), &backend)?;
    assert_eq!(ids(&page.visible_rows().rows), vec!["cava"]);
    assert_eq!(backend.wine_reads(), 3);
    Ok(())
}

#[test]
fn sort_request_reorders_page() -> TestResult {
    let backend = cellar_backend();
    let mut page = list_page(&backend)?;

    page.table_mut().request_sort(Column::Vintage);
    assert_eq!(ids(&page.visible_rows().rows), vec!["barolo", "chablis", "cava", "slot"]);

    page.table_mut().request_sort(Column::Vintage);
    assert_eq!(ids(&page.visible_rows().rows), vec!["chablis", "barolo", "cava", "slot"]);
    Ok(())
}

#[test]
fn cellar_column_sorts_by_displayed_name() -> TestResult {
    let backend = cellar_backend();
    let mut page = list_page(&backend)?;

    let cellar_cell = page.head_cells().into_iter().next().ok_or("no head cells")?;
    assert_eq!(cellar_cell.column, Column::CellarName);
    assert_eq!(cellar_cell.label, "Cellar Name");

    page.table_mut().request_sort(cellar_cell.column);
    assert_eq!(ids(&page.visible_rows().rows), vec!["barolo", "chablis", "slot", "cava"]);
    Ok(())
}

#[test]
fn unavailable_backend_fails_load() {
    let mut backend = cellar_backend();
    backend.set_unavailable(true);
    let mut page = WinePage::new(ViewKind::List, ViewConfig::default());
    let err = page.load(&backend).err();
    assert!(matches!(err, Some(EngineError::Storage(StorageError::Unavailable(_)))));
}

// ============================================================================
// Row clicks
// ============================================================================

#[test]
fn double_click_opens_matching_dialog() -> TestResult {
    let backend = cellar_backend();
    let mut page = list_page(&backend)?;
    let today = date(2024, 4, 1);

    let chablis = WineId::new("chablis");
    assert_eq!(page.click_row(&chablis, today)?, RowClick::Selected);
    assert!(!page.dialog().is_open());
    assert_eq!(page.click_row(&chablis, today)?, RowClick::Open(DialogAction::Edit));
    assert!(page.dialog().is_open());
    assert_eq!(page.dialog().draft().name, "Chablis");

    let slot = WineId::new("slot");
    page.click_row(&slot, today)?;
    assert_eq!(page.click_row(&slot, today)?, RowClick::Open(DialogAction::Create));
    assert_eq!(page.dialog().draft().position.as_deref(), Some("1-2"));
    assert_eq!(page.dialog().draft().bought_at, Some(today));

    let missing = page.click_row(&WineId::new("nope"), today);
    assert!(matches!(missing, Err(EngineError::WineNotFound(_))));
    Ok(())
}
