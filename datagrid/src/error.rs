//! Error types.
//!
//! The pipeline itself never fails; errors only come from building a table
//! out of invalid settings.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid table state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Page numbers are 1-based.
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(usize),

    /// Page size must be positive.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Errors loading or validating a table configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("column {0} has an empty key")]
    EmptyColumnKey(usize),

    #[error("column key '{0}' is used more than once")]
    DuplicateColumn(String),

    #[error("sort key '{0}' does not name a column")]
    UnknownSortColumn(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl ConfigError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
