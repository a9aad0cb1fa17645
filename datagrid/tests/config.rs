use datagrid::prelude::*;
use datagrid::{ConfigError, PaginationConfig, TableError};

const CONFIG: &str = r#"{
    "columns": [
        { "key": "name", "title": "Name", "sortable": true, "filterable": true },
        { "key": "age", "sortType": "number", "filterType": "number", "align": "right" },
        {
            "key": "role",
            "filterType": "select",
            "filterOptions": [
                { "label": "Admin", "value": "admin" },
                { "label": "User", "value": "user" }
            ]
        }
    ],
    "rowKey": "code",
    "pagination": { "page": 2, "pageSize": 1, "showQuickJumper": true },
    "sort": { "key": "name", "direction": "asc" },
    "filters": { "role": "user" },
    "selectable": true,
    "emptyText": "Nothing here"
}"#;

fn rows() -> Vec<Record> {
    vec![
        Record::new().set("code", "b").set("name", "Bob").set("role", "user"),
        Record::new().set("code", "a").set("name", "Ann").set("role", "user"),
        Record::new().set("code", "c").set("name", "Cid").set("role", "admin"),
    ]
}

#[test]
fn test_parse_full_config() {
    let config = TableConfig::from_json(CONFIG).unwrap();
    assert_eq!(config.columns.len(), 3);
    assert_eq!(config.columns[1].sort_type, SortType::Number);
    assert_eq!(config.columns[1].align, Alignment::Right);
    assert_eq!(config.columns[2].filter_options.len(), 2);
    assert_eq!(config.row_key.as_deref(), Some("code"));
    assert_eq!(config.sort, Some(SortState::ascending("name")));
    assert_eq!(config.empty_text, "Nothing here");

    let pagination = config.pagination.unwrap();
    assert_eq!(pagination.page_size, 1);
    assert!(pagination.show_size_changer);
    assert_eq!(pagination.page_size_options, [10, 20, 50, 100]);
}

#[test]
fn test_build_applies_state() {
    let config = TableConfig::from_json(CONFIG).unwrap();
    let table = config.build(rows()).unwrap();

    let names: Vec<String> = table
        .processed()
        .iter()
        .map(|row| row.field("name").text())
        .collect();
    assert_eq!(names, ["Ann", "Bob"]);

    let page: Vec<String> = table
        .page_rows()
        .iter()
        .map(|row| row.field("name").text())
        .collect();
    assert_eq!(page, ["Bob"]);

    assert!(table.is_selectable());
    assert_eq!(table.row_id(1), Some(&RowId::from("a")));
    assert!(table.pagination_options().unwrap().show_quick_jumper);
}

#[test]
fn test_title_defaults_to_key() {
    let config = TableConfig::from_json(CONFIG).unwrap();
    let columns: Vec<Column<Record>> = config.columns();
    assert_eq!(columns[0].title, "Name");
    assert_eq!(columns[1].title, "age");
    assert!(!columns[1].sortable);
}

#[test]
fn test_empty_config_is_valid() {
    let config = TableConfig::from_json("{}").unwrap();
    assert!(config.columns.is_empty());
    assert_eq!(config.empty_text, "No data");
    let table = config.build(rows()).unwrap();
    assert_eq!(table.page_rows().len(), 3);
}

#[test]
fn test_duplicate_column_is_rejected() {
    let err = TableConfig::from_json(r#"{"columns": [{"key": "a"}, {"key": "a"}]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateColumn(key) if key == "a"));
}

#[test]
fn test_empty_column_key_is_rejected() {
    let err = TableConfig::from_json(r#"{"columns": [{"key": "a"}, {}]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyColumnKey(1)));
}

#[test]
fn test_unknown_sort_column_is_rejected() {
    let err = TableConfig::from_json(
        r#"{"columns": [{"key": "a"}], "sort": {"key": "b", "direction": "asc"}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownSortColumn(key) if key == "b"));
}

#[test]
fn test_invalid_page_is_rejected() {
    let err = TableConfig::from_json(r#"{"pagination": {"page": 0}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Table(TableError::InvalidPage(0))));

    let config = TableConfig {
        pagination: Some(PaginationConfig {
            page_size: 0,
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(matches!(
        config.build(rows()),
        Err(ConfigError::Table(TableError::ZeroPageSize))
    ));
}

#[test]
fn test_malformed_json() {
    let err = TableConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let err = TableConfig::from_path("/nonexistent/datagrid.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_inferred_columns() {
    let config = TableConfig::inferred(["id", "name"]);
    let columns: Vec<Column<Record>> = config.columns();
    assert_eq!(columns.len(), 2);
    assert!(columns.iter().all(|c| c.sortable && c.filterable));
    assert_eq!(columns[1].title, "name");
}
