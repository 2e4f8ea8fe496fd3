//! Fixtures shared by the crate's unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tessel_primitives::Key;

use crate::buffer::FilePool;
use crate::config::Config;
use crate::session::SessionStore;
use crate::workspace::Workspace;

/// A workspace over a fresh temporary directory, sized 80x24.
pub(crate) struct Fixture {
	pub dir: TempDir,
	pub ws: Workspace,
}

impl Fixture {
	pub fn new() -> Self {
		Self::with_config(&Config::default())
	}

	pub fn with_config(config: &Config) -> Self {
		let dir = TempDir::new().expect("tempdir");
		let pool = FilePool::new(dir.path());
		let mut ws = Workspace::new(config, Box::new(pool), SessionStore::in_memory(20), dir.path()).expect("workspace");
		ws.resize(80, 24);
		Self { dir, ws }
	}

	/// Writes `text` to `name` inside the fixture directory.
	pub fn file(&self, name: &str, text: &str) -> PathBuf {
		let path = self.dir.path().join(name);
		fs::write(&path, text).expect("write fixture");
		path
	}

	pub fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}

	/// Feeds each whitespace-separated key pattern to the workspace.
	pub fn keys(&mut self, keys: &str) {
		for pattern in keys.split_whitespace() {
			self.ws.handle_key(key(pattern));
		}
	}

	/// Types `text` literally.
	pub fn type_text(&mut self, text: &str) {
		for ch in text.chars() {
			self.ws.handle_key(Key::char(ch));
		}
	}

	pub fn dialog_title(&self) -> Option<&str> {
		self.ws.dialog().map(|d| d.title.as_str())
	}

	pub fn alert(&self) -> Option<&str> {
		self.ws.alert().map(|a| a.message.as_str())
	}

	pub fn active_text(&self) -> String {
		self.ws
			.active_window()
			.active_pane()
			.map(|pane| pane.content().to_string())
			.unwrap_or_default()
	}

	pub fn open(&mut self, path: &Path) {
		self.ws.open_initial(Some(path));
	}
}

pub(crate) fn key(pattern: &str) -> Key {
	tessel_keymap::parse(pattern).unwrap_or_else(|err| panic!("bad key `{pattern}`: {err}"))
}
