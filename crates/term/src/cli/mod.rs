//! CLI schema for the tessel binary.

use std::path::PathBuf;

use clap::Parser;
use tessel_editor::LayoutKind;

#[derive(Parser, Debug)]
#[command(name = "tessel")]
#[command(about = "A tiling terminal text editor")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// File to edit, or a directory to open as a project
	pub path: Option<PathBuf>,

	/// Configuration file (defaults to $XDG_CONFIG_HOME/tessel/config.toml)
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Initial layout, overriding the configuration (e.g. horizontal-2, 2x2)
	#[arg(long, short = 'l', value_name = "LAYOUT")]
	pub layout: Option<LayoutKind>,

	/// Keep the recent-files list in memory only
	#[arg(long)]
	pub no_session: bool,
}
