//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use datagrid::{SortState, Value};

/// Print a JSON array of rows as a sorted, filtered, paginated table.
#[derive(Debug, Parser)]
#[command(name = "datagrid", version)]
pub struct Args {
    /// JSON file holding an array of row objects
    pub rows: PathBuf,

    /// JSON table configuration (columns are inferred from the first row
    /// when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sort column, as KEY, KEY:asc or KEY:desc
    #[arg(short, long, value_parser = parse_sort)]
    pub sort: Option<SortState>,

    /// Column filter, as KEY=VALUE (repeatable)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, Value)>,

    /// Page to show (enables pagination)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Rows per page (enables pagination)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Select the row with this id (repeatable)
    #[arg(long = "select")]
    pub select: Vec<String>,

    /// Select every row that passes the filters
    #[arg(long)]
    pub select_all: bool,

    /// Expand the row with this id (repeatable)
    #[arg(long = "expand")]
    pub expand: Vec<String>,

    /// Print the current page as JSON instead of a text grid
    #[arg(long)]
    pub json: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory for log files (defaults to the platform cache directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

fn parse_sort(input: &str) -> Result<SortState, String> {
    SortState::parse(input).ok_or_else(|| format!("expected KEY, KEY:asc or KEY:desc, got '{input}'"))
}

/// Split `KEY=VALUE`; the value is read as JSON when it parses, else as text.
fn parse_filter(input: &str) -> Result<(String, Value), String> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))?;
    if key.is_empty() {
        return Err(format!("missing filter key in '{input}'"));
    }
    let value = serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw));
    Ok((key.to_string(), value))
}
