//! Most-recently-opened files and projects.
//!
//! Persisted as JSON so the recent-files dialog survives restarts. Write
//! failures are logged and otherwise ignored: the list is a convenience.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
	pub path: PathBuf,
	/// Opened as a project directory rather than a file.
	#[serde(default)]
	pub project: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
	recent: Vec<RecentEntry>,
}

#[derive(Debug)]
pub struct SessionStore {
	path: Option<PathBuf>,
	/// Oldest first.
	recent: Vec<RecentEntry>,
	limit: usize,
}

impl SessionStore {
	/// `$XDG_DATA_HOME/tessel/session.json`.
	pub fn default_path() -> Option<PathBuf> {
		dirs::data_dir().map(|dir| dir.join("tessel").join(SESSION_FILE))
	}

	/// A store that never touches the disk.
	pub fn in_memory(limit: usize) -> Self {
		Self {
			path: None,
			recent: Vec::new(),
			limit: limit.max(1),
		}
	}

	/// Loads the store at `path`; a missing or unreadable file starts empty.
	pub fn load(path: PathBuf, limit: usize) -> Self {
		let recent = match fs::read_to_string(&path) {
			Ok(text) => match serde_json::from_str::<SessionFile>(&text) {
				Ok(file) => file.recent,
				Err(error) => {
					warn!(path = %path.display(), %error, "ignoring corrupt session file");
					Vec::new()
				}
			},
			Err(_) => Vec::new(),
		};
		let mut store = Self {
			path: Some(path),
			recent,
			limit: limit.max(1),
		};
		store.truncate();
		store
	}

	fn truncate(&mut self) {
		if self.recent.len() > self.limit {
			let excess = self.recent.len() - self.limit;
			self.recent.drain(..excess);
		}
	}

	fn record(&mut self, path: &Path, project: bool) {
		self.recent.retain(|entry| entry.path != path);
		self.recent.push(RecentEntry {
			path: path.to_path_buf(),
			project,
		});
		self.truncate();
		self.save();
	}

	pub fn record_file(&mut self, path: &Path) {
		self.record(path, false);
	}

	pub fn record_project(&mut self, path: &Path) {
		self.record(path, true);
	}

	/// Entries, most recent first.
	pub fn recent(&self) -> impl Iterator<Item = &RecentEntry> {
		self.recent.iter().rev()
	}

	pub fn recent_files(&self) -> Vec<PathBuf> {
		self.recent().filter(|e| !e.project).map(|e| e.path.clone()).collect()
	}

	pub fn recent_projects(&self) -> Vec<PathBuf> {
		self.recent().filter(|e| e.project).map(|e| e.path.clone()).collect()
	}

	pub fn is_empty(&self) -> bool {
		self.recent.is_empty()
	}

	/// Forgets everything and removes the session file.
	pub fn destroy(&mut self) {
		self.recent.clear();
		if let Some(path) = &self.path {
			match fs::remove_file(path) {
				Ok(()) => debug!(path = %path.display(), "session destroyed"),
				Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
				Err(error) => warn!(path = %path.display(), %error, "cannot remove session file"),
			}
		}
	}

	fn save(&self) {
		let Some(path) = &self.path else {
			return;
		};
		let file = SessionFile {
			recent: self.recent.clone(),
		};
		let result = serde_json::to_string_pretty(&file)
			.map_err(std::io::Error::other)
			.and_then(|json| {
				if let Some(parent) = path.parent() {
					fs::create_dir_all(parent)?;
				}
				fs::write(path, json)
			});
		if let Err(error) = result {
			warn!(path = %path.display(), %error, "cannot write session file");
		}
	}
}
