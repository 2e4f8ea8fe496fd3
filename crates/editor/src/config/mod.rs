//! User configuration.
//!
//! Loaded once at startup from a TOML file:
//!
//! ```toml
//! [editor]
//! layout = "horizontal-2"
//! tab-size = 4
//!
//! [session]
//! recent-limit = 20
//!
//! [keys]
//! close-window = ["esc", "ctrl-w"]
//!
//! [theme]
//! form-field-focused = "black on cyan"
//! ```
//!
//! Every section is optional. Unknown keys and invalid values are rejected
//! before the workspace starts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tessel_keymap::{KeyBindings, KeymapError};
use tessel_primitives::Encoding;
use thiserror::Error;
use tracing::debug;

use crate::layout::LayoutKind;
use crate::pane::PanePrefs;
use crate::theme::Theme;


const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "tessel";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("cannot read {}: {error}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
	#[error("invalid configuration: {0}")]
	Toml(#[from] toml::de::Error),
	#[error(transparent)]
	Keymap(#[from] KeymapError),
	#[error("unknown theme token `{0}`")]
	UnknownToken(String),
	#[error("invalid style for `{token}`: `{value}`")]
	InvalidColor { token: String, value: String },
	#[error("invalid value for `{key}`: {message}")]
	InvalidValue { key: &'static str, message: String },
}

/// Default per-pane preferences and the initial layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EditorConfig {
	pub layout: LayoutKind,
	pub tab_size: u8,
	pub show_line_numbers: bool,
	pub word_wrap: bool,
	pub hard_wrap: bool,
	pub syntax_highlighting: bool,
	pub auto_close_pairs: bool,
	pub show_scrollbars: bool,
	pub encoding: Encoding,
}

impl Default for EditorConfig {
	fn default() -> Self {
		let prefs = PanePrefs::default();
		Self {
			layout: LayoutKind::default(),
			tab_size: prefs.tab_size,
			show_line_numbers: prefs.show_line_numbers,
			word_wrap: prefs.word_wrap,
			hard_wrap: prefs.hard_wrap,
			syntax_highlighting: prefs.syntax_highlighting,
			auto_close_pairs: prefs.auto_close_pairs,
			show_scrollbars: prefs.show_scrollbars,
			encoding: Encoding::default(),
		}
	}
}

impl EditorConfig {
	pub fn pane_prefs(&self) -> PanePrefs {
		PanePrefs {
			tab_size: self.tab_size,
			show_line_numbers: self.show_line_numbers,
			word_wrap: self.word_wrap,
			hard_wrap: self.hard_wrap,
			syntax_highlighting: self.syntax_highlighting,
			auto_close_pairs: self.auto_close_pairs,
			show_scrollbars: self.show_scrollbars,
			encoding_override: None,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SessionConfig {
	/// Maximum number of recent paths remembered.
	pub recent_limit: usize,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self { recent_limit: 20 }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub editor: EditorConfig,
	pub session: SessionConfig,
	/// Logical key name to physical keys.
	pub keys: BTreeMap<String, Vec<String>>,
	/// Theme token to style string.
	pub theme: BTreeMap<String, String>,
}

impl Config {
	/// Default location: `$XDG_CONFIG_HOME/tessel/config.toml`.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
	}

	/// Loads `path`, or the default location when `None`.
	///
	/// A missing file at the default location yields the built-in defaults;
	/// an explicitly requested file must exist.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let (path, explicit) = match path {
			Some(path) => (path.to_path_buf(), true),
			None => match Self::default_path() {
				Some(path) => (path, false),
				None => return Ok(Self::default()),
			},
		};
		if !explicit && !path.exists() {
			debug!(path = %path.display(), "no config file, using defaults");
			return Ok(Self::default());
		}
		let text = std::fs::read_to_string(&path).map_err(|error| ConfigError::Io { path: path.clone(), error })?;
		let config = Self::parse(&text)?;
		debug!(path = %path.display(), "config loaded");
		Ok(config)
	}

	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if !(1..=9).contains(&self.editor.tab_size) {
			return Err(ConfigError::InvalidValue {
				key: "editor.tab-size",
				message: format!("{} is not in [1,9]", self.editor.tab_size),
			});
		}
		if self.session.recent_limit == 0 {
			return Err(ConfigError::InvalidValue {
				key: "session.recent-limit",
				message: "must be at least 1".to_string(),
			});
		}
		self.key_bindings()?;
		self.theme()?;
		Ok(())
	}

	pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
		Ok(KeyBindings::with_overrides(&self.keys)?)
	}

	pub fn theme(&self) -> Result<Theme, ConfigError> {
		Theme::with_overrides(&self.theme)
	}
}
