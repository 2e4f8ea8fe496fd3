//! The workspace: tabs of panes, the open dialog and the event loop.
//!
//! [`Workspace`] is the single application context. Every component reads
//! and writes pane and buffer state through it; there are no globals. Input
//! is processed one event at a time:
//!
//! 1. an open alert swallows the key (close/confirm dismiss it);
//! 2. with no dialog open, the global handler may consume it as an action;
//! 3. otherwise the open dialog gets it, or else the active pane.
//!
//! Each event is followed by one full repaint.

mod actions;
mod binding;
mod quit;

use std::path::{Path, PathBuf};

use tessel_keymap::{KeyBindings, LogicalKey};
use tessel_primitives::{Encoding, Key};
use tracing::{debug, warn};

use crate::buffer::BufferPool;
use crate::config::{Config, ConfigError};
use crate::dialog::{Alert, Dialog};
use crate::input::{Event, KeyOutcome, Terminal};
use crate::layout;
use crate::pane::{PaneInput, PanePrefs};
use crate::session::SessionStore;
use crate::theme::Theme;
use crate::window::Window;
use crate::{Result, WorkspaceError};


/// Size assumed until the terminal reports its own.
const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Whether a project directory is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
	File,
	Project { root: PathBuf },
}

pub struct Workspace {
	/// Tabs; never empty.
	pub(crate) windows: Vec<Window>,
	pub(crate) active_window: usize,
	pub(crate) pool: Box<dyn BufferPool>,
	pub(crate) session: SessionStore,
	pub(crate) keys: KeyBindings,
	pub(crate) theme: Theme,
	pub(crate) defaults: PanePrefs,
	pub(crate) default_encoding: Encoding,
	pub(crate) dialog: Option<Dialog>,
	pub(crate) alert: Option<Alert>,
	pub(crate) mode: AppMode,
	/// `(width, height)` of the terminal.
	pub(crate) size: (u16, u16),
	pub(crate) cwd: PathBuf,
	pub(crate) last_search: String,
	pub(crate) bell: bool,
	pub(crate) quit: bool,
	pub(crate) tabs_opened: usize,
}

impl Workspace {
	pub fn new(config: &Config, pool: Box<dyn BufferPool>, session: SessionStore, cwd: impl Into<PathBuf>) -> std::result::Result<Self, ConfigError> {
		let keys = config.key_bindings()?;
		let theme = config.theme()?;
		let defaults = config.editor.pane_prefs();
		let layout = config.editor.layout;
		let area = layout::workspace_area(DEFAULT_SIZE.0, DEFAULT_SIZE.1);
		Ok(Self {
			windows: vec![Window::new("Tab 1", layout, area, defaults.clone())],
			active_window: 0,
			pool,
			session,
			keys,
			theme,
			defaults,
			default_encoding: config.editor.encoding,
			dialog: None,
			alert: None,
			mode: AppMode::File,
			size: DEFAULT_SIZE,
			cwd: cwd.into(),
			last_search: String::new(),
			bell: false,
			quit: false,
			tabs_opened: 1,
		})
	}

	pub fn windows(&self) -> &[Window] {
		&self.windows
	}

	pub fn active_window_index(&self) -> usize {
		self.active_window
	}

	pub fn active_window(&self) -> &Window {
		&self.windows[self.active_window]
	}

	pub(crate) fn active_window_mut(&mut self) -> &mut Window {
		&mut self.windows[self.active_window]
	}

	/// The active tab and the pool, borrowed together.
	pub(crate) fn tab_and_pool(&mut self) -> (&mut Window, &mut dyn BufferPool) {
		(&mut self.windows[self.active_window], self.pool.as_mut())
	}

	pub fn pool(&self) -> &dyn BufferPool {
		self.pool.as_ref()
	}

	pub fn session(&self) -> &SessionStore {
		&self.session
	}

	pub fn keys(&self) -> &KeyBindings {
		&self.keys
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn dialog(&self) -> Option<&Dialog> {
		self.dialog.as_ref()
	}

	pub fn alert(&self) -> Option<&Alert> {
		self.alert.as_ref()
	}

	pub fn mode(&self) -> &AppMode {
		&self.mode
	}

	pub fn size(&self) -> (u16, u16) {
		self.size
	}

	pub fn cwd(&self) -> &Path {
		&self.cwd
	}

	pub fn should_quit(&self) -> bool {
		self.quit
	}

	/// Returns and clears the pending audible alert.
	pub fn take_bell(&mut self) -> bool {
		std::mem::take(&mut self.bell)
	}

	pub(crate) fn ring(&mut self) {
		self.bell = true;
	}

	/// Shows `err` as an alert. Nothing else changes.
	pub(crate) fn report(&mut self, err: WorkspaceError) {
		warn!(%err, "operation failed");
		self.alert = Some(Alert::new(err.to_string()));
	}

	/// `path` made absolute against the working directory.
	pub(crate) fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
		let path = path.as_ref();
		if path.is_absolute() { path.to_path_buf() } else { self.cwd.join(path) }
	}

	/// Recomputes every tab's geometry for a `width` x `height` terminal.
	pub fn resize(&mut self, width: u16, height: u16) {
		self.size = (width, height);
		let area = layout::workspace_area(width, height);
		for window in &mut self.windows {
			window.readjust(area, false);
		}
		self.recenter_dialog();
		debug!(width, height, "resized");
	}

	/// Opens the file or directory named on the command line, then makes
	/// sure the first tab has an active pane.
	pub fn open_initial(&mut self, path: Option<&Path>) {
		let encoding = self.default_encoding;
		let result = match path.map(|p| self.resolve(p)) {
			Some(path) if !path.exists() => self.create_file(&path, encoding),
			Some(path) => self.open_path(&path, encoding),
			None => Ok(()),
		};
		if let Err(err) = result {
			self.report(err);
		}
		if self.active_window().active_pane().is_none()
			&& let Err(err) = self.activate_pane(0)
		{
			self.report(err);
		}
	}

	pub fn handle_event(&mut self, event: Event) {
		match event {
			Event::Key(key) => self.handle_key(key),
			Event::Resize { width, height } => self.resize(width, height),
		}
	}

	pub fn handle_key(&mut self, key: Key) {
		let key = key.normalized();
		if self.alert.is_some() {
			if self.keys.is(key, LogicalKey::CloseWindow) || self.keys.is(key, LogicalKey::FinalizeChoice) {
				self.alert = None;
			}
			return;
		}
		let KeyOutcome::PassThrough(key) = self.global_key(key) else {
			return;
		};
		if self.dialog.is_some() {
			self.handle_dialog_key(key);
			return;
		}
		let Some(pane) = self.active_window_mut().active_pane_mut() else {
			return;
		};
		if pane.handle_key(key) == PaneInput::Rejected {
			self.ring();
		}
	}

	/// Runs the workspace action bound to `key`, unless a dialog is open.
	fn global_key(&mut self, key: Key) -> KeyOutcome {
		if self.dialog.is_some() {
			return KeyOutcome::PassThrough(key);
		}
		let Some(action) = self.keys.global_action(key) else {
			return KeyOutcome::PassThrough(key);
		};
		debug!(%action, %key, "action");
		if let Err(err) = self.run_action(action) {
			self.report(err);
		}
		KeyOutcome::Consumed
	}

	/// Drives the workspace until it quits or input ends.
	pub fn run(&mut self, term: &mut dyn Terminal) -> Result<()> {
		let (width, height) = term.size()?;
		self.resize(width, height);
		term.present(&self.paint())?;
		while !self.quit {
			let Some(event) = term.read_event()? else {
				debug!("input closed");
				break;
			};
			self.handle_event(event);
			if self.take_bell() {
				term.bell()?;
			}
			let live = term.size()?;
			if live != self.size {
				self.resize(live.0, live.1);
			}
			term.present(&self.paint())?;
		}
		Ok(())
	}
}
