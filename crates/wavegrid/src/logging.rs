//! Logger setup.
//!
//! The terminal is owned by the UI, so log records go to a file. Without
//! a usable log file no logger is installed and records are dropped.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Initialise `env_logger`, honoring `RUST_LOG` (default `info`).
pub fn init(path: Option<&Path>) {
    let Some(file) = path.and_then(open_log_file) else {
        return;
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Pipe(Box::new(file)));
    // A logger may already be installed, e.g. by a test harness.
    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
