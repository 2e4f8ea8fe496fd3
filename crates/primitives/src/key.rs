//! Physical key events as delivered by the terminal backend.

use std::fmt;

/// Chord modifiers held with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	pub ctrl: bool,
	pub alt: bool,
	pub shift: bool,
}

impl Modifiers {
	pub const NONE: Self = Self::new(false, false, false);
	pub const CTRL: Self = Self::new(true, false, false);
	pub const ALT: Self = Self::new(false, true, false);
	pub const SHIFT: Self = Self::new(false, false, true);

	pub const fn new(ctrl: bool, alt: bool, shift: bool) -> Self {
		Self { ctrl, alt, shift }
	}

	// Builders for binding parsers: `Modifiers::NONE.ctrl().alt()`.
	pub const fn ctrl(self) -> Self {
		Self::new(true, self.alt, self.shift)
	}

	pub const fn alt(self) -> Self {
		Self::new(self.ctrl, true, self.shift)
	}

	pub const fn shift(self) -> Self {
		Self::new(self.ctrl, self.alt, true)
	}

	pub const fn is_empty(self) -> bool {
		!(self.ctrl || self.alt || self.shift)
	}
}

/// Binding-syntax prefix, e.g. `ctrl-alt-`; empty when nothing is held.
impl fmt::Display for Modifiers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (held, name) in [(self.ctrl, "ctrl-"), (self.alt, "alt-"), (self.shift, "shift-")] {
			if held {
				f.write_str(name)?;
			}
		}
		Ok(())
	}
}

/// The key that was pressed, without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	Char(char),
	Enter,
	Esc,
	Tab,
	BackTab,
	Backspace,
	Delete,
	Insert,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
	PageUp,
	PageDown,
	F(u8),
}

/// A key press: code plus modifiers.
///
/// Character keys never carry `shift`; backends fold it into the character
/// (`Shift+a` arrives as `'A'`) so bindings compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// An unmodified key.
	pub const fn plain(code: KeyCode) -> Self {
		Self::new(code, Modifiers::NONE)
	}

	/// An unmodified character key.
	pub const fn char(ch: char) -> Self {
		Self::plain(KeyCode::Char(ch))
	}

	/// `Ctrl` + character.
	pub const fn ctrl(ch: char) -> Self {
		Self::new(KeyCode::Char(ch), Modifiers::CTRL)
	}

	/// `Alt` + character.
	pub const fn alt(ch: char) -> Self {
		Self::new(KeyCode::Char(ch), Modifiers::ALT)
	}

	/// Returns the character for an unmodified (or shift-only) printable key.
	pub fn printable(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(ch) if !self.modifiers.ctrl && !self.modifiers.alt && !ch.is_control() => Some(ch),
			_ => None,
		}
	}

	/// Drops `shift` from character keys.
	pub fn normalized(self) -> Self {
		match self.code {
			KeyCode::Char(_) => Self {
				modifiers: Modifiers::new(self.modifiers.ctrl, self.modifiers.alt, false),
				..self
			},
			KeyCode::Tab if self.modifiers.shift => Self::plain(KeyCode::BackTab),
			KeyCode::BackTab => Self::plain(KeyCode::BackTab),
			_ => self,
		}
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::plain(code)
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.modifiers)?;
		match self.code {
			KeyCode::Char(' ') => f.write_str("space"),
			KeyCode::Char(ch) => write!(f, "{ch}"),
			KeyCode::Enter => f.write_str("enter"),
			KeyCode::Esc => f.write_str("esc"),
			KeyCode::Tab => f.write_str("tab"),
			KeyCode::BackTab => f.write_str("shift-tab"),
			KeyCode::Backspace => f.write_str("backspace"),
			KeyCode::Delete => f.write_str("del"),
			KeyCode::Insert => f.write_str("insert"),
			KeyCode::Up => f.write_str("up"),
			KeyCode::Down => f.write_str("down"),
			KeyCode::Left => f.write_str("left"),
			KeyCode::Right => f.write_str("right"),
			KeyCode::Home => f.write_str("home"),
			KeyCode::End => f.write_str("end"),
			KeyCode::PageUp => f.write_str("pageup"),
			KeyCode::PageDown => f.write_str("pagedown"),
			KeyCode::F(n) => write!(f, "f{n}"),
		}
	}
}
