use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported buffer encodings, in the order they are offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
	#[default]
	Utf8,
	Ascii,
	Utf7,
	Utf16,
	Utf32,
	Latin1,
}

/// Returned when an encoding name is not one of [`Encoding::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown encoding: {0}")]
pub struct UnknownEncoding(pub String);

impl Encoding {
	pub const ALL: [Encoding; 6] = [
		Encoding::Utf8,
		Encoding::Ascii,
		Encoding::Utf7,
		Encoding::Utf16,
		Encoding::Utf32,
		Encoding::Latin1,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Utf8 => "utf-8",
			Self::Ascii => "ascii",
			Self::Utf7 => "utf-7",
			Self::Utf16 => "utf-16",
			Self::Utf32 => "utf-32",
			Self::Latin1 => "latin-1",
		}
	}

	/// Position of this encoding within [`Encoding::ALL`].
	pub fn index(self) -> usize {
		Self::ALL.iter().position(|e| *e == self).unwrap_or(0)
	}
}

impl fmt::Display for Encoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Encoding {
	type Err = UnknownEncoding;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
		Self::ALL
			.into_iter()
			.find(|e| e.name() == normalized || e.name().replace('-', "") == normalized)
			.ok_or_else(|| UnknownEncoding(s.to_string()))
	}
}

impl TryFrom<String> for Encoding {
	type Error = UnknownEncoding;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Encoding> for String {
	fn from(value: Encoding) -> Self {
		value.name().to_string()
	}
}
