//! Resolution of physical keys to logical actions.

use std::collections::{BTreeMap, HashMap};

use tessel_primitives::Key;
use thiserror::Error;

use crate::logical::LogicalKey;
use crate::parser::{ParseError, parse};

/// Errors raised while applying user key overrides.
#[derive(Debug, Error)]
pub enum KeymapError {
	#[error("unknown key action `{0}`")]
	UnknownAction(String),
	#[error("invalid key `{key}` for `{action}`: {source}")]
	Parse {
		action: String,
		key: String,
		#[source]
		source: ParseError,
	},
}

/// Table mapping every [`LogicalKey`] to the physical keys that trigger it.
///
/// A key may trigger several logical actions (`ctrl-s` is both `save` and
/// `save-and-close-window`); callers ask for the action that makes sense in
/// their context via [`KeyBindings::is`].
#[derive(Debug, Clone)]
pub struct KeyBindings {
	map: HashMap<LogicalKey, Vec<Key>>,
}

impl Default for KeyBindings {
	fn default() -> Self {
		Self::defaults()
	}
}

impl KeyBindings {
	/// Built-in bindings.
	pub fn defaults() -> Self {
		let mut map = HashMap::with_capacity(LogicalKey::ALL.len());
		for &logical in LogicalKey::ALL {
			// Built-in patterns are covered by tests; a bad one is skipped, not fatal.
			let keys = logical.default_keys().iter().filter_map(|p| parse(p).ok()).collect();
			map.insert(logical, keys);
		}
		Self { map }
	}

	/// Defaults with user overrides applied. Each override replaces the full
	/// list of keys for its action; an empty list unbinds it.
	pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self, KeymapError> {
		let mut bindings = Self::defaults();
		for (action, patterns) in overrides {
			let logical: LogicalKey = action
				.parse()
				.map_err(|()| KeymapError::UnknownAction(action.clone()))?;
			let keys = patterns
				.iter()
				.map(|pattern| {
					parse(pattern).map_err(|source| KeymapError::Parse {
						action: action.clone(),
						key: pattern.clone(),
						source,
					})
				})
				.collect::<Result<Vec<_>, _>>()?;
			bindings.map.insert(logical, keys);
		}
		Ok(bindings)
	}

	/// Whether `key` triggers `logical`.
	pub fn is(&self, key: Key, logical: LogicalKey) -> bool {
		let key = key.normalized();
		self.map.get(&logical).is_some_and(|keys| keys.contains(&key))
	}

	/// All actions bound to `key`, in declaration order.
	pub fn actions(&self, key: Key) -> impl Iterator<Item = LogicalKey> + '_ {
		LogicalKey::ALL.iter().copied().filter(move |&logical| self.is(key, logical))
	}

	/// First non-dialog action bound to `key`.
	pub fn global_action(&self, key: Key) -> Option<LogicalKey> {
		self.actions(key).find(|logical| !logical.is_dialog_key())
	}

	pub fn keys(&self, logical: LogicalKey) -> &[Key] {
		self.map.get(&logical).map(Vec::as_slice).unwrap_or_default()
	}

	/// `(action, keys, description)` rows for the help screen.
	pub fn list(&self) -> Vec<(LogicalKey, String, &'static str)> {
		LogicalKey::ALL
			.iter()
			.map(|&logical| {
				let keys = self
					.keys(logical)
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", ");
				(logical, keys, logical.description())
			})
			.collect()
	}
}
