//! Log file placement for the CLI.
//!
//! Each run writes `datagrid.log`; the previous run's file is archived as
//! `datagrid-<timestamp>.log` and only the newest archives are kept.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

const CURRENT_LOG: &str = "datagrid.log";
const ARCHIVE_PREFIX: &str = "datagrid-";
const KEEP_ARCHIVES: usize = 25;

/// Platform log directory: `<cache>/logs` for `dev.datagrid.datagrid`.
pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "datagrid", "datagrid").map(|dirs| dirs.cache_dir().join("logs"))
}

/// Create `dir` if needed, archive the previous log and open a fresh one.
pub fn open_log(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    let current = dir.join(CURRENT_LOG);
    if current.exists() {
        fs::rename(&current, dir.join(archive_name(Local::now())))?;
    }
    prune_archives(dir, KEEP_ARCHIVES)?;
    File::create(current)
}

fn archive_name(at: DateTime<Local>) -> String {
    format!("{ARCHIVE_PREFIX}{}.log", at.format("%Y%m%d-%H%M%S%.3f"))
}

fn is_archive(name: &str) -> bool {
    name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log")
}

/// Delete all but the newest `keep` archives and return how many went.
fn prune_archives(dir: &Path, keep: usize) -> io::Result<usize> {
    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_archive)
        })
        .collect();
    // Timestamped names sort oldest first.
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}
