//! Layout engine: named pane arrangements and their tiling geometry.
//!
//! A [`LayoutKind`] fixes how many panes a tab shows and how the workspace
//! area is carved up between them. Every layout tiles the area exactly: the
//! pane rectangles from [`dimensions`] plus the divider cells from
//! [`dividers`] cover each cell once.
//!
//! # Modules
//!
//! - `geometry` - tiling formulas
//! - `engine` - layout transition rules

mod engine;
mod geometry;

#[cfg(test)]
mod invariants;

use std::fmt;
use std::str::FromStr;

pub use engine::can_change_layout;
pub use geometry::{dimensions, dividers, workspace_area};
use serde::{Deserialize, Serialize};

/// Maximum number of panes any layout shows.
pub const MAX_PANES: usize = 6;

/// The available pane arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LayoutKind {
	#[default]
	Single,
	/// Two columns.
	Horizontal2,
	Horizontal3,
	Horizontal4,
	/// Two rows.
	Vertical2,
	Grid2x2,
	/// Two rows of three columns.
	Grid2x3,
	/// One pane on the left, two stacked on the right.
	OneLeftTwoRight,
	TwoLeftOneRight,
	/// One pane on top, two side by side below.
	OneTopTwoBottom,
	TwoTopOneBottom,
}

impl LayoutKind {
	pub const ALL: [LayoutKind; 11] = [
		LayoutKind::Single,
		LayoutKind::Horizontal2,
		LayoutKind::Horizontal3,
		LayoutKind::Horizontal4,
		LayoutKind::Vertical2,
		LayoutKind::Grid2x2,
		LayoutKind::Grid2x3,
		LayoutKind::OneLeftTwoRight,
		LayoutKind::TwoLeftOneRight,
		LayoutKind::OneTopTwoBottom,
		LayoutKind::TwoTopOneBottom,
	];

	pub const fn pane_count(self) -> usize {
		match self {
			Self::Single => 1,
			Self::Horizontal2 | Self::Vertical2 => 2,
			Self::Horizontal3 | Self::OneLeftTwoRight | Self::TwoLeftOneRight | Self::OneTopTwoBottom | Self::TwoTopOneBottom => 3,
			Self::Horizontal4 | Self::Grid2x2 => 4,
			Self::Grid2x3 => 6,
		}
	}

	/// Name used in configuration and the command input.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Single => "single",
			Self::Horizontal2 => "horizontal-2",
			Self::Horizontal3 => "horizontal-3",
			Self::Horizontal4 => "horizontal-4",
			Self::Vertical2 => "vertical-2",
			Self::Grid2x2 => "2x2",
			Self::Grid2x3 => "2x3",
			Self::OneLeftTwoRight => "1-left-2-right",
			Self::TwoLeftOneRight => "2-left-1-right",
			Self::OneTopTwoBottom => "1-top-2-bottom",
			Self::TwoTopOneBottom => "2-top-1-bottom",
		}
	}

	/// Human-readable label for the switch-layout dialog.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Single => "Single",
			Self::Horizontal2 => "Horizontal 2",
			Self::Horizontal3 => "Horizontal 3",
			Self::Horizontal4 => "Horizontal 4",
			Self::Vertical2 => "Vertical 2",
			Self::Grid2x2 => "Grid 2x2",
			Self::Grid2x3 => "Grid 2x3",
			Self::OneLeftTwoRight => "1 Left, 2 Right",
			Self::TwoLeftOneRight => "2 Left, 1 Right",
			Self::OneTopTwoBottom => "1 Top, 2 Bottom",
			Self::TwoTopOneBottom => "2 Top, 1 Bottom",
		}
	}
}

impl fmt::Display for LayoutKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Returned when a layout name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout: {0}")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutKind {
	type Err = UnknownLayout;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
		Self::ALL
			.into_iter()
			.find(|kind| kind.name() == wanted)
			.ok_or_else(|| UnknownLayout(s.to_string()))
	}
}

impl TryFrom<String> for LayoutKind {
	type Error = UnknownLayout;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<LayoutKind> for String {
	fn from(value: LayoutKind) -> Self {
		value.name().to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pane_counts() {
		let counts: Vec<usize> = LayoutKind::ALL.iter().map(|k| k.pane_count()).collect();
		assert_eq!(counts, vec![1, 2, 3, 4, 2, 4, 6, 3, 3, 3, 3]);
		assert!(counts.iter().all(|&n| n <= MAX_PANES));
	}

	#[test]
	fn names_parse() {
		for kind in LayoutKind::ALL {
			assert_eq!(kind.name().parse::<LayoutKind>(), Ok(kind));
		}
		assert_eq!("Horizontal_2".parse::<LayoutKind>(), Ok(LayoutKind::Horizontal2));
		assert!("3x3".parse::<LayoutKind>().is_err());
	}
}
