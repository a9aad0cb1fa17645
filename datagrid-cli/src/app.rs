//! Drives a table from command-line arguments.

use std::fs;
use std::path::{Path, PathBuf};

use datagrid::{ConfigError, DataTable, PaginationConfig, RowId, TableConfig};
use log::{debug, info, warn};
use serde_json::{Map, Value as Json, json};
use thiserror::Error;

use crate::args::Args;

pub type Row = Map<String, Json>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rows are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rows must be a JSON array of objects")]
    NotAnArrayOfObjects,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parse a JSON array of row objects.
pub fn parse_rows(json: &str) -> Result<Vec<Row>, CliError> {
    let Json::Array(items) = serde_json::from_str::<Json>(json)? else {
        return Err(CliError::NotAnArrayOfObjects);
    };
    items
        .into_iter()
        .map(|item| match item {
            Json::Object(row) => Ok(row),
            _ => Err(CliError::NotAnArrayOfObjects),
        })
        .collect()
}

fn load_rows(path: &Path) -> Result<Vec<Row>, CliError> {
    let json = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&json)
}

/// Apply the arguments to a configuration before the table is built.
fn prepare_config(mut config: TableConfig, args: &Args) -> TableConfig {
    if args.page.is_some() || args.page_size.is_some() {
        let pagination = config.pagination.get_or_insert_with(PaginationConfig::default);
        if let Some(page) = args.page {
            pagination.page = page;
        }
        if let Some(page_size) = args.page_size {
            pagination.page_size = page_size;
        }
    }
    if args.select_all || !args.select.is_empty() {
        config.selectable = true;
    }
    if !args.expand.is_empty() {
        config.expandable = true;
    }
    config
}

/// Build the table and replay the requested events on it.
pub fn build_table(
    rows: Vec<Row>,
    config: TableConfig,
    args: &Args,
) -> Result<DataTable<Row>, CliError> {
    let config = prepare_config(config, args);
    let mut table = config.build(rows)?;

    if let Some(sort) = &args.sort {
        if datagrid::column::find(table.columns(), &sort.key).is_none() {
            warn!("sort key '{}' does not name a column", sort.key);
        }
        table.set_sort(Some(sort.clone()));
    }
    for (key, value) in &args.filters {
        table.set_filter_value(key, value.clone());
    }
    for id in &args.select {
        table.toggle_selection(&RowId::parse(id));
    }
    if args.select_all {
        table.select_all(true);
    }
    for id in &args.expand {
        if table.toggle_expansion(&RowId::parse(id)).is_none() {
            warn!("no row with id '{}' to expand", id);
        }
    }
    Ok(table)
}

/// Current page, selection and totals as JSON.
pub fn to_json(table: &DataTable<Row>) -> Json {
    json!({
        "rows": table.page_rows(),
        "total": table.total(),
        "page": table.page_state(),
        "sort": table.sort_state(),
        "filters": table.filters(),
        "selected": table.selection(),
        "expanded": table.expansion().ids(),
    })
}

pub fn run(args: &Args) -> Result<String, CliError> {
    let rows = load_rows(&args.rows)?;
    info!("loaded {} rows from {}", rows.len(), args.rows.display());

    let config = match &args.config {
        Some(path) => TableConfig::from_path(path)?,
        None => {
            let keys: Vec<String> = rows
                .first()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default();
            debug!("inferred columns {:?}", keys);
            TableConfig::inferred(keys)
        }
    };

    let table = build_table(rows, config, args)?;
    if args.json {
        Ok(format!("{:#}\n", to_json(&table)))
    } else {
        Ok(table.view().to_text())
    }
}
