use datagrid::filter::{self, matches_value};
use datagrid::prelude::*;

fn people() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("name", "Bob").set("age", 30).set("role", "admin"),
        Record::new().set("id", 2).set("name", "Ann").set("age", "25").set("role", "user"),
        Record::new().set("id", 3).set("name", "Cid").set("age", 25).set("role", "user"),
    ]
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("name", "Name").filterable(),
        Column::new("age", "Age").filter_type(FilterType::Number),
        Column::new("role", "Role").filter_type(FilterType::Select),
    ]
}

fn ids(rows: &[&Record]) -> Vec<i64> {
    rows.iter()
        .map(|row| row.field("id").number().unwrap() as i64)
        .collect()
}

#[test]
fn test_text_filter_is_case_insensitive_substring() {
    let rows = people();
    let filters = FilterState::new().with("name", "B");
    assert_eq!(ids(&filter::apply(&rows, &columns(), &filters)), [1]);
}

#[test]
fn test_number_filter_coerces_strings() {
    let rows = people();
    let filters = FilterState::new().with("age", "25");
    assert_eq!(ids(&filter::apply(&rows, &columns(), &filters)), [2, 3]);
}

#[test]
fn test_select_filter_is_strict() {
    let rows = people();
    let filters = FilterState::new().with("role", "user");
    assert_eq!(ids(&filter::apply(&rows, &columns(), &filters)), [2, 3]);

    let filters = FilterState::new().with("role", "User");
    assert!(filter::apply(&rows, &columns(), &filters).is_empty());
}

#[test]
fn test_blank_filters_are_inactive() {
    let rows = people();
    let filters = FilterState::new().with("name", "").with("age", Value::Null);
    assert!(!filters.is_active());
    assert_eq!(filter::apply(&rows, &columns(), &filters).len(), 3);
}

#[test]
fn test_unknown_filter_key_is_ignored() {
    let rows = people();
    let filters = FilterState::new().with("salary", "100");
    assert_eq!(filter::apply(&rows, &columns(), &filters).len(), 3);
}

#[test]
fn test_filters_combine_with_and() {
    let rows = people();
    let filters = FilterState::new().with("role", "user").with("name", "c");
    assert_eq!(ids(&filter::apply(&rows, &columns(), &filters)), [3]);
}

#[test]
fn test_number_filter_rejects_non_numeric() {
    assert!(!matches_value(FilterType::Number, &Value::from("abc"), &Value::from("abc")));
    assert!(!matches_value(FilterType::Number, &Value::Null, &Value::from(0)));
    assert!(matches_value(FilterType::Number, &Value::from(2.0), &Value::from("2")));
}

#[test]
fn test_text_filter_matches_missing_fields_as_empty() {
    assert!(matches_value(FilterType::Text, &Value::Null, &Value::from("")));
    assert!(!matches_value(FilterType::Text, &Value::Null, &Value::from("x")));
}

#[test]
fn test_filter_through_accessor() {
    let rows = people();
    let columns = vec![
        Column::new("upper", "Upper").accessor(|row: &Record| {
            Value::from(row.field("name").text().to_uppercase())
        }),
    ];
    let filters = FilterState::new().with("upper", "ANN");
    assert_eq!(ids(&filter::apply(&rows, &columns, &filters)), [2]);
}

#[test]
fn test_filter_state_serde() {
    let filters: FilterState = serde_json::from_str(r#"{"name": "a", "age": 25}"#).unwrap();
    assert_eq!(filters.get("name"), Some(&Value::from("a")));
    assert_eq!(filters.get("age"), Some(&Value::Int(25)));
    assert_eq!(filters.len(), 2);
}
