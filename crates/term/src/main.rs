//! The `tessel` terminal editor.

mod backend;
mod cli;
mod logging;

use anyhow::Context;
use backend::CrosstermBackend;
use clap::Parser;
use cli::Cli;
use tessel_editor::{Config, FilePool, SessionStore, Workspace};
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let log_path = logging::init();

	let mut config = Config::load(cli.config.as_deref()).context("invalid configuration")?;
	if let Some(layout) = cli.layout {
		config.editor.layout = layout;
	}
	let limit = config.session.recent_limit;
	let session = match SessionStore::default_path() {
		Some(path) if !cli.no_session => SessionStore::load(path, limit),
		_ => SessionStore::in_memory(limit),
	};

	let cwd = std::env::current_dir().context("cannot determine the working directory")?;
	let pool = FilePool::new(&cwd);
	let mut workspace = Workspace::new(&config, Box::new(pool), session, cwd)?;
	info!(log = ?log_path, path = ?cli.path, "starting tessel");
	workspace.open_initial(cli.path.as_deref());

	let default_hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(move |panic| {
		let _ = backend::restore();
		default_hook(panic);
	}));

	let mut terminal = CrosstermBackend::new().context("cannot set up the terminal")?;
	let result = workspace.run(&mut terminal);
	drop(terminal);
	result?;
	info!("tessel exited");
	Ok(())
}
