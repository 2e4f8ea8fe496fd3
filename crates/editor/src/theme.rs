//! Named style tokens.
//!
//! The theme maps each [`ThemeToken`] to a [`Style`]. It only affects how
//! things are painted, never what the workspace does.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
	Black,
	Red,
	Green,
	Yellow,
	Blue,
	Magenta,
	Cyan,
	White,
	Gray,
	DarkGray,
	Rgb(u8, u8, u8),
}

impl FromStr for Color {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let color = match s.to_ascii_lowercase().as_str() {
			"black" => Self::Black,
			"red" => Self::Red,
			"green" => Self::Green,
			"yellow" => Self::Yellow,
			"blue" => Self::Blue,
			"magenta" => Self::Magenta,
			"cyan" => Self::Cyan,
			"white" => Self::White,
			"gray" | "grey" => Self::Gray,
			"darkgray" | "darkgrey" | "dark-gray" | "dark-grey" => Self::DarkGray,
			hex => {
				let hex = hex.strip_prefix('#').ok_or(())?;
				if hex.len() != 6 {
					return Err(());
				}
				let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2).ok_or(())?, 16).map_err(|_| ());
				Self::Rgb(channel(0)?, channel(2)?, channel(4)?)
			}
		};
		Ok(color)
	}
}

/// Display attributes for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
	pub fg: Option<Color>,
	pub bg: Option<Color>,
	pub bold: bool,
	pub reverse: bool,
}

impl Style {
	pub const fn new(fg: Color, bg: Color) -> Self {
		Self {
			fg: Some(fg),
			bg: Some(bg),
			bold: false,
			reverse: false,
		}
	}

	pub const fn bold(mut self) -> Self {
		self.bold = true;
		self
	}

	pub const fn reversed(mut self) -> Self {
		self.reverse = true;
		self
	}
}

/// Parses `"<fg> [on <bg>] [bold] [reverse]"`, e.g. `"black on cyan bold"`.
impl FromStr for Style {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut style = Style::default();
		let mut words = s.split_whitespace();
		while let Some(word) = words.next() {
			match word {
				"bold" => style.bold = true,
				"reverse" => style.reverse = true,
				"on" => {
					let bg = words.next().ok_or_else(|| word.to_string())?;
					style.bg = Some(bg.parse().map_err(|()| bg.to_string())?);
				}
				fg if style.fg.is_none() => style.fg = Some(fg.parse().map_err(|()| fg.to_string())?),
				other => return Err(other.to_string()),
			}
		}
		Ok(style)
	}
}

macro_rules! theme_tokens {
	($($variant:ident => $name:literal;)*) => {
		/// Style slots the painter looks up.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum ThemeToken {
			$($variant,)*
		}

		impl ThemeToken {
			pub const ALL: &'static [ThemeToken] = &[$(ThemeToken::$variant),*];

			pub const fn name(self) -> &'static str {
				match self {
					$(ThemeToken::$variant => $name,)*
				}
			}
		}

		impl FromStr for ThemeToken {
			type Err = ();

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($name => Ok(ThemeToken::$variant),)*
					_ => Err(()),
				}
			}
		}
	};
}

theme_tokens! {
	Titlebar => "titlebar";
	Statusbar => "statusbar";
	Division => "division";
	Placeholder => "placeholder";
	Text => "text";
	LineNumber => "line-number";
	DialogBorder => "dialog-border";
	DialogTitle => "dialog-title";
	FormField => "form-field";
	FormFieldFocused => "form-field-focused";
	FormLabel => "form-label";
	ListItem => "list-item";
	ListSelected => "list-selected";
	ListHighlight => "list-highlight";
	Alert => "alert";
}

impl fmt::Display for ThemeToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone)]
pub struct Theme {
	styles: HashMap<ThemeToken, Style>,
}

impl Default for Theme {
	fn default() -> Self {
		use Color::*;
		let styles = [
			(ThemeToken::Titlebar, Style::new(Black, Cyan)),
			(ThemeToken::Statusbar, Style::new(Black, Gray)),
			(ThemeToken::Division, Style::new(DarkGray, Black)),
			(ThemeToken::Placeholder, Style::new(DarkGray, Black)),
			(ThemeToken::Text, Style::new(White, Black)),
			(ThemeToken::LineNumber, Style::new(DarkGray, Black)),
			(ThemeToken::DialogBorder, Style::new(White, Blue)),
			(ThemeToken::DialogTitle, Style::new(Yellow, Blue).bold()),
			(ThemeToken::FormField, Style::new(Black, Gray)),
			(ThemeToken::FormFieldFocused, Style::new(Black, Cyan)),
			(ThemeToken::FormLabel, Style::new(White, Blue)),
			(ThemeToken::ListItem, Style::new(White, Blue)),
			(ThemeToken::ListSelected, Style::new(Yellow, Blue).bold()),
			(ThemeToken::ListHighlight, Style::new(Black, Cyan)),
			(ThemeToken::Alert, Style::new(White, Red).bold()),
		];
		Self {
			styles: styles.into_iter().collect(),
		}
	}
}

impl Theme {
	/// Default theme with user overrides from the `[theme]` table.
	pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
		let mut theme = Self::default();
		for (name, value) in overrides {
			let token: ThemeToken = name
				.parse()
				.map_err(|()| ConfigError::UnknownToken(name.clone()))?;
			let style: Style = value.parse().map_err(|word| ConfigError::InvalidColor {
				token: name.clone(),
				value: word,
			})?;
			theme.styles.insert(token, style);
		}
		Ok(theme)
	}

	pub fn style(&self, token: ThemeToken) -> Style {
		self.styles.get(&token).copied().unwrap_or_default()
	}
}
