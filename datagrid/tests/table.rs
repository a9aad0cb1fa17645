use std::sync::{Arc, Mutex};

use datagrid::pagination::PageItem;
use datagrid::prelude::*;
use datagrid::view::SortIndicator;

fn people() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("name", "Bob").set("age", 30),
        Record::new().set("id", 2).set("name", "Ann").set("age", 25),
        Record::new().set("id", 3).set("name", "Cid").set("age", "25"),
    ]
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("name", "Name").sortable().filterable(),
        Column::new("age", "Age")
            .sortable()
            .sort_type(SortType::Number)
            .filter_type(FilterType::Number)
            .align(Alignment::Right),
    ]
}

fn names<T: TableRow>(rows: &[&T]) -> Vec<String> {
    rows.iter().map(|row| row.field("name").text()).collect()
}

fn ids(values: &[i64]) -> Vec<RowId> {
    values.iter().copied().map(RowId::Number).collect()
}

#[test]
fn test_unsorted_keeps_input_order() {
    let table = DataTable::new(columns(), people());
    assert_eq!(names(&table.processed()), ["Bob", "Ann", "Cid"]);
    assert_eq!(table.total(), 3);
}

#[test]
fn test_click_header_cycles() {
    let rows = vec![
        Record::new().set("id", 1).set("name", "Bob"),
        Record::new().set("id", 2).set("name", "Ann"),
    ];
    let mut table = DataTable::new(columns(), rows);

    assert!(table.click_header("name"));
    assert_eq!(names(&table.processed()), ["Ann", "Bob"]);

    table.click_header("name");
    assert_eq!(table.sort_state(), Some(&SortState::descending("name")));
    assert_eq!(names(&table.processed()), ["Bob", "Ann"]);

    table.click_header("name");
    assert_eq!(table.sort_state(), None);
    assert_eq!(names(&table.processed()), ["Bob", "Ann"]);
}

#[test]
fn test_click_non_sortable_header_is_ignored() {
    let columns = vec![Column::<Record>::new("name", "Name")];
    let mut table = DataTable::new(columns, people());
    assert!(!table.click_header("name"));
    assert!(!table.click_header("missing"));
    assert_eq!(table.sort_state(), None);
}

#[test]
fn test_number_filter_matches_numeric_strings() {
    let mut table = DataTable::new(columns(), people());
    table.set_filter_value("age", "25");
    assert_eq!(names(&table.processed()), ["Ann", "Cid"]);
    assert_eq!(table.total(), 2);

    table.set_filter_value("age", "");
    assert_eq!(table.total(), 3);
}

#[test]
fn test_filter_then_sort() {
    let mut table = DataTable::new(columns(), people()).initial_sort(Some(SortState::descending("name")));
    table.set_filter_value("age", 25);
    assert_eq!(names(&table.processed()), ["Cid", "Ann"]);
}

#[test]
fn test_pagination_slices_processed_rows() {
    let rows = vec![
        Record::new().set("id", 1).set("name", "A"),
        Record::new().set("id", 2).set("name", "B"),
        Record::new().set("id", 3).set("name", "C"),
    ];
    let table = DataTable::new(columns(), rows.clone())
        .paginate(PageState::new(2, 1).unwrap(), PaginationOptions::default());
    assert_eq!(names(&table.page_rows()), ["B"]);

    let table = DataTable::new(columns(), rows)
        .paginate(PageState::new(4, 1).unwrap(), PaginationOptions::default());
    assert!(table.page_rows().is_empty());
    assert_eq!(table.total(), 3);
}

#[test]
fn test_page_navigation() {
    let mut table = DataTable::new(columns(), people())
        .paginate(PageState::first(2).unwrap(), PaginationOptions::default());
    assert!(!table.previous_page());
    assert!(table.next_page());
    assert_eq!(names(&table.page_rows()), ["Cid"]);
    assert!(!table.next_page());
    assert!(!table.go_to_page(2));
    assert!(table.quick_jump("1"));
    assert_eq!(table.page_state().map(|s| s.page()), Some(1));
    assert!(!table.quick_jump("abc"));
    assert!(!table.quick_jump("9"));
}

#[test]
fn test_change_page_size() {
    let mut table = DataTable::new(columns(), people())
        .paginate(PageState::new(3, 1).unwrap(), PaginationOptions::default());
    assert_eq!(table.change_page_size(2), Ok(true));
    let state = table.page_state().unwrap();
    assert_eq!((state.page(), state.page_size()), (2, 2));
    assert_eq!(table.change_page_size(0), Err(datagrid::TableError::ZeroPageSize));

    let mut unpaged = DataTable::new(columns(), people());
    assert_eq!(unpaged.change_page_size(5), Ok(false));
    assert_eq!(unpaged.page_rows().len(), 3);
}

#[test]
fn test_selection_flow() {
    let mut table = DataTable::new(columns(), people()).selectable();

    table.toggle_selection(&RowId::from(1));
    assert_eq!(table.selection().ids(), ids(&[1]).as_slice());
    assert_eq!(table.select_all_state(), CheckState::Indeterminate);

    table.select_all(true);
    assert_eq!(table.selection().ids(), ids(&[1, 2, 3]).as_slice());
    assert_eq!(table.select_all_state(), CheckState::Checked);

    table.select_all(false);
    assert!(table.selection().is_empty());
    assert_eq!(table.select_all_state(), CheckState::Unchecked);
}

#[test]
fn test_select_all_covers_every_page_of_filtered_rows() {
    let mut table = DataTable::new(columns(), people())
        .selectable()
        .initial_sort(Some(SortState::ascending("name")))
        .paginate(PageState::first(1).unwrap(), PaginationOptions::default());
    table.set_filter_value("age", 25);
    table.select_all(true);
    assert_eq!(table.selection().ids(), ids(&[2, 3]).as_slice());
}

#[test]
fn test_selection_disabled_by_default() {
    let mut table = DataTable::new(columns(), people());
    assert!(!table.toggle_selection(&RowId::from(1)));
    assert!(!table.select_all(true));
    assert!(table.selection().is_empty());
    assert!(table.view().select_all.is_none());
}

#[test]
fn test_selection_survives_sorting() {
    let mut table = DataTable::new(columns(), people()).selectable();
    table.toggle_selection(&RowId::from(2));
    table.click_header("name");
    table.click_header("name");
    assert!(table.is_selected(&RowId::from(2)));
    let view = table.view();
    let selected: Vec<&RowId> = view.rows.iter().filter(|r| r.selected).map(|r| r.id).collect();
    assert_eq!(selected, [&RowId::from(2)]);
}

#[test]
fn test_controlled_sort_reports_and_waits() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut table = DataTable::new(columns(), people())
        .controlled_sort(None, move |sort| sink.lock().unwrap().push(sort));

    table.click_header("name");
    assert_eq!(*seen.lock().unwrap(), [Some(SortState::ascending("name"))]);
    assert_eq!(table.sort_state(), None);
    assert_eq!(names(&table.processed()), ["Bob", "Ann", "Cid"]);

    table.set_sort(Some(SortState::ascending("name")));
    assert_eq!(names(&table.processed()), ["Ann", "Bob", "Cid"]);

    table.click_header("name");
    assert_eq!(
        seen.lock().unwrap().last(),
        Some(&Some(SortState::descending("name")))
    );
}

#[test]
fn test_controlled_filter() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut table = DataTable::new(columns(), people())
        .controlled_filter(FilterState::new(), move |filters| *sink.lock().unwrap() = Some(filters));

    table.set_filter_value("name", "ann");
    assert_eq!(table.total(), 3);
    let reported = seen.lock().unwrap().clone().unwrap();
    assert_eq!(reported.get("name"), Some(&Value::from("ann")));

    table.set_filters(reported);
    assert_eq!(names(&table.processed()), ["Ann"]);
}

#[test]
fn test_controlled_pagination() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut table = DataTable::new(columns(), people()).controlled_pagination(
        PageState::first(1).unwrap(),
        PaginationOptions::default(),
        move |page, size| sink.lock().unwrap().push((page, size)),
    );

    assert!(table.next_page());
    assert_eq!(*seen.lock().unwrap(), [(2, 1)]);
    assert_eq!(names(&table.page_rows()), ["Bob"]);

    table.set_page_state(PageState::new(2, 1).unwrap());
    assert_eq!(names(&table.page_rows()), ["Ann"]);

    table.change_page_size(10).unwrap();
    assert_eq!(seen.lock().unwrap().last(), Some(&(1, 10)));
}

#[test]
fn test_controlled_selection() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut table = DataTable::new(columns(), people())
        .controlled_selection(ids(&[1]), move |ids| *sink.lock().unwrap() = ids);

    table.toggle_selection(&RowId::from(2));
    assert_eq!(*seen.lock().unwrap(), ids(&[1, 2]));
    assert_eq!(table.selection().ids(), ids(&[1]).as_slice());

    table.select_all(true);
    assert_eq!(*seen.lock().unwrap(), ids(&[1, 2, 3]));

    table.set_selection(ids(&[3]));
    assert!(table.is_selected(&RowId::from(3)));
    assert!(!table.is_selected(&RowId::from(1)));
}

#[test]
fn test_expansion_callback_and_detail() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut table = DataTable::new(columns(), people())
        .expandable()
        .on_expand(move |expanded, row: &Record| {
            sink.lock().unwrap().push((expanded, row.field("name").text()))
        })
        .expanded_row_render(|row| format!("age {}", row.field("age").text()));

    assert_eq!(table.toggle_expansion(&RowId::from(2)), Some(true));
    assert_eq!(table.toggle_expansion(&RowId::from(2)), Some(false));
    assert_eq!(table.toggle_expansion(&RowId::from(9)), None);
    assert_eq!(
        *seen.lock().unwrap(),
        [(true, "Ann".to_string()), (false, "Ann".to_string())]
    );

    table.toggle_expansion(&RowId::from(1));
    let view = table.view();
    let details: Vec<Option<&str>> = view.rows.iter().map(|r| r.detail.as_deref()).collect();
    assert_eq!(details, [Some("age 30"), None, None]);
}

#[test]
fn test_expansion_disabled() {
    let mut table = DataTable::new(columns(), people());
    assert_eq!(table.toggle_expansion(&RowId::from(1)), None);
    assert!(!table.is_expanded(&RowId::from(1)));
}

#[test]
fn test_row_key_field_and_fallback() {
    let rows = vec![
        Record::new().set("code", "x").set("name", "X"),
        Record::new().set("code", "").set("name", "Blank"),
        Record::new().set("name", "Missing"),
    ];
    let table = DataTable::new(columns(), rows).row_key(RowKey::field("code"));
    assert_eq!(table.row_id(0), Some(&RowId::from("x")));
    assert_eq!(table.row_id(1), Some(&RowId::Number(1)));
    assert_eq!(table.row_id(2), Some(&RowId::Number(2)));
}

#[test]
fn test_row_key_function() {
    let table = DataTable::new(columns(), people())
        .row_key(RowKey::func(|row: &Record| RowId::from(row.field("name").text())));
    assert_eq!(table.find_row(&RowId::from("Cid")).map(|r| r.field("id")), Some(Value::Int(3)));
}

#[test]
fn test_set_rows_rederives_ids() {
    let mut table = DataTable::new(columns(), people()).selectable();
    table.toggle_selection(&RowId::from(1));
    table.set_rows(vec![Record::new().set("id", 7).set("name", "New")]);
    assert_eq!(table.row_id(0), Some(&RowId::from(7)));
    assert_eq!(table.select_all_state(), CheckState::Unchecked);
}

#[test]
fn test_filter_panel_toggle() {
    let mut table = DataTable::new(columns(), people());
    assert!(table.toggle_filter_panel("name"));
    assert!(table.is_filter_open("name"));
    assert!(!table.toggle_filter_panel("age"));
    assert!(table.toggle_filter_panel("name"));
    assert!(!table.is_filter_open("name"));
}

#[test]
fn test_view_header_and_pagination() {
    let mut table = DataTable::new(columns(), people())
        .paginate(PageState::first(2).unwrap(), PaginationOptions::default());
    table.click_header("age");

    let view = table.view();
    assert_eq!(view.header[0].sort, Some(SortIndicator::Unsorted));
    assert_eq!(view.header[1].sort, Some(SortIndicator::Ascending));
    assert!(view.header[0].filter.is_some());
    assert!(view.header[1].filter.is_none());

    let pagination = view.pagination.unwrap();
    assert_eq!(pagination.total_pages, 2);
    assert_eq!(pagination.range, (1, 2));
    assert_eq!(pagination.summary, "Showing 1 to 2 of 3 entries");
    assert_eq!(pagination.items, [PageItem::Page(1), PageItem::Page(2)]);
    assert!(!pagination.has_previous);
    assert!(pagination.has_next);
}

#[test]
fn test_view_empty_and_loading() {
    let mut table = DataTable::new(columns(), people())
        .paginate(PageState::default(), PaginationOptions::default());
    table.set_filter_value("name", "zzz");
    let view = table.view();
    assert_eq!(view.empty_text, Some("No data"));
    assert!(view.pagination.is_none());

    table.set_filter_value("name", "");
    table.set_loading(true);
    let view = table.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_text, None);
    assert_eq!(view.to_text(), "Loading...\n");
}

#[test]
fn test_view_to_text() {
    let mut table = DataTable::new(columns(), people()).selectable();
    table.toggle_selection(&RowId::from(2));
    let text = table.view().to_text();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "[-]  Name ↕  Age ↕");
    assert!(lines[1].starts_with("---"));
    assert_eq!(lines[2], "[ ]  Bob        30");
    assert_eq!(lines[3], "[x]  Ann        25");
}

#[test]
fn test_cell_renderer() {
    let columns = vec![
        Column::new("name", "Name")
            .render(|value: &Value, _row: &Record, index| format!("{}. {}", index + 1, value.text())),
    ];
    let table = DataTable::new(columns, people());
    let view = table.view();
    assert_eq!(view.rows[1].cells, ["2. Ann"]);
}

#[test]
fn test_expansion_survives_filter_sort_and_paging() {
    let mut table = DataTable::new(columns(), people())
        .expandable()
        .paginate(PageState::first(2).unwrap(), PaginationOptions::default());
    let cid = RowId::from(3);
    table.toggle_expansion(&cid);

    table.set_filter_value("name", "ann");
    assert!(table.view().rows.iter().all(|r| r.id != &cid));
    table.set_filter_value("name", "");

    table.click_header("name");
    assert!(table.next_page());
    let view = table.view();
    let expanded: Vec<(&RowId, bool)> = view.rows.iter().map(|r| (r.id, r.expanded)).collect();
    assert_eq!(expanded, [(&cid, true)]);

    table.click_header("name");
    assert!(table.previous_page());
    let view = table.view();
    let expanded: Vec<(&RowId, bool)> = view.rows.iter().map(|r| (r.id, r.expanded)).collect();
    assert_eq!(expanded, [(&cid, true), (&RowId::from(1), false)]);
}

#[test]
fn test_huge_page_number_is_just_empty() {
    let mut table = DataTable::new(columns(), people())
        .paginate(PageState::new(usize::MAX, 1).unwrap(), PaginationOptions::default());
    assert!(table.page_rows().is_empty());
    assert!(!table.next_page());

    let view = table.view();
    assert!(view.rows.is_empty());
    let pagination = view.pagination.unwrap();
    assert!(!pagination.has_next);
    assert_eq!(pagination.total_pages, 3);
    assert!(!table.view().to_text().is_empty());
}
