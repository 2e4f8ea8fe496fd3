//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so logs only ever go to a file:
//! `$TESSEL_LOG_DIR/tessel.<pid>.log`, else the platform state (or cache)
//! directory. Without a writable location logging stays off.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "tessel=info";

fn log_dir() -> Option<PathBuf> {
	if let Some(dir) = std::env::var_os("TESSEL_LOG_DIR") {
		return Some(PathBuf::from(dir));
	}
	dirs::state_dir().or_else(dirs::cache_dir).map(|dir| dir.join("tessel"))
}

/// Installs the global subscriber. Returns the log file path, if any.
pub fn init() -> Option<PathBuf> {
	let log_dir = log_dir()?;
	fs::create_dir_all(&log_dir).ok()?;
	let log_path = log_dir.join(format!("tessel.{}.log", std::process::id()));
	let file = OpenOptions::new().create(true).append(true).open(&log_path).ok()?;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
	let file_layer = tracing_subscriber::fmt::layer()
		.with_writer(file)
		.with_ansi(false)
		.with_target(true);

	tracing_subscriber::registry().with(filter).with(file_layer).try_init().ok()?;
	Some(log_path)
}
