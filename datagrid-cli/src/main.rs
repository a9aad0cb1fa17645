mod app;
mod args;
mod paths;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::Args;

/// Log to `--log-dir` or the platform cache directory.
///
/// Logging is best effort; a directory that cannot be written is reported
/// and the run continues without a log.
fn init_logging(args: &Args) {
    let Some(dir) = args.log_dir.clone().or_else(paths::default_log_dir) else {
        return;
    };
    let file = match paths::open_log(&dir) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: not logging to {}: {e}", dir.display());
            return;
        }
    };
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = WriteLogger::init(level, Config::default(), file);
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);
    info!("datagrid {}", env!("CARGO_PKG_VERSION"));

    match app::run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
