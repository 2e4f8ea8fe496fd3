//! # Parser
//!
//! Parses plain-text key patterns such as `"ctrl-alt-q"`, `"shift-tab"` or
//! `"f5"` into [`Key`] values.
//!
//! ## Supported Syntax
//!
//! ```text
//! node      = modifiers* key
//! modifiers = modifier "-"
//! modifier  = "ctrl" | "alt" | "shift"
//! key       = fn-key | named-key | char
//! fn-key    = "f" digit digit?
//! named-key = "esc" | "enter" | "tab" | "space" | "pageup" | ...
//! char      = ascii-char
//! ```

use tessel_primitives::{Key, KeyCode, Modifiers};


/// Separator between modifiers and the key.
const KEY_SEP: char = '-';

/// Function pointer type for parser combinators.
type ParserFn<T> = fn(&mut Parser) -> Result<Option<T>, ParseError>;

/// Represents an error that occurred during parsing.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Parse error at position {}: {}", self.position, self.message)
	}
}

impl std::error::Error for ParseError {}

/// Maintains the parser's state for recursive descent parsing.
struct Parser<'a> {
	/// The input string being parsed.
	input: &'a str,
	/// Current byte position in the input.
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	fn peek_at(&self, n: usize) -> Option<char> {
		self.input.chars().nth(n)
	}

	/// Consumes and returns the next character, advancing the parser.
	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.position += ch.len_utf8();
		self.input = &self.input[ch.len_utf8()..];
		Some(ch)
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	/// Consumes the next character if it matches the expected one.
	fn take(&mut self, expected: char) -> Result<(), ParseError> {
		match self.next() {
			Some(ch) if ch == expected => Ok(()),
			Some(ch) => Err(ParseError {
				message: format!("expected '{expected}', found '{ch}'"),
				position: self.position - ch.len_utf8(),
			}),
			None => Err(ParseError {
				message: format!("expected '{expected}', found end of input"),
				position: self.position,
			}),
		}
	}

	/// Attempts to parse with a fallback: restores state if parsing fails.
	fn try_parse<T, F>(&mut self, f: F) -> Result<Option<T>, ParseError>
	where
		F: FnOnce(&mut Parser<'a>) -> Result<Option<T>, ParseError>,
	{
		let snapshot = (self.input, self.position);
		match f(self) {
			Ok(Some(val)) => Ok(Some(val)),
			Ok(None) | Err(_) => {
				self.input = snapshot.0;
				self.position = snapshot.1;
				Ok(None)
			}
		}
	}

	fn take_while<F>(&mut self, predicate: F) -> String
	where
		F: Fn(char) -> bool,
	{
		let mut result = String::new();
		while let Some(ch) = self.peek() {
			if !predicate(ch) {
				break;
			}
			result.push(ch);
			self.next();
		}
		result
	}

	/// Tries multiple parsers in sequence, returning the result of the first successful one.
	fn alt<T>(&mut self, parsers: &[ParserFn<T>]) -> Result<Option<T>, ParseError> {
		for p in parsers {
			if let Some(value) = p(self)? {
				return Ok(Some(value));
			}
		}
		Ok(None)
	}

	fn error(&self, message: String) -> ParseError {
		ParseError {
			message,
			position: self.position,
		}
	}
}

#[derive(Clone, Copy)]
enum Modifier {
	Ctrl,
	Alt,
	Shift,
}

impl Modifier {
	fn from_name(name: &str) -> Option<Self> {
		match name {
			"ctrl" | "c" => Some(Self::Ctrl),
			"alt" | "a" | "meta" => Some(Self::Alt),
			"shift" | "s" => Some(Self::Shift),
			_ => None,
		}
	}

	fn apply(self, modifiers: Modifiers) -> Modifiers {
		match self {
			Self::Ctrl => modifiers.ctrl(),
			Self::Alt => modifiers.alt(),
			Self::Shift => modifiers.shift(),
		}
	}
}

/// Parses a single key expression into a [`Key`].
///
/// The result is normalized the same way backends normalize incoming
/// events, so `"shift-tab"` yields `BackTab` and `"shift-a"` yields `'A'`.
pub fn parse(s: &str) -> Result<Key, ParseError> {
	let mut parser = Parser::new(s.trim());
	let key = parse_node(&mut parser)?;

	if let Some(ch) = parser.peek() {
		return Err(parser.error(format!("expect end of input, found: {ch}")));
	}

	Ok(key)
}

/// Grammar: `node = modifiers* key`
fn parse_node(parser: &mut Parser) -> Result<Key, ParseError> {
	let mut modifiers = Modifiers::NONE;

	for _ in 0..3 {
		let Some(modifier) = try_parse_modifier(parser)? else {
			break;
		};
		modifiers = modifier.apply(modifiers);
	}

	let code = parse_key(parser)?;
	let code = match code {
		KeyCode::Char(ch) if modifiers.shift && ch.is_ascii_lowercase() => KeyCode::Char(ch.to_ascii_uppercase()),
		other => other,
	};
	Ok(Key::new(code, modifiers).normalized())
}

/// Attempts to parse a single modifier, followed by a `-`.
fn try_parse_modifier(parser: &mut Parser) -> Result<Option<Modifier>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		let Some(modifier) = Modifier::from_name(&name.to_ascii_lowercase()) else {
			return Ok(None);
		};
		// A bare trailing modifier name is not a modifier.
		if p.peek() != Some(KEY_SEP) || p.peek_at(1).is_none() {
			return Ok(None);
		}
		p.take(KEY_SEP)?;
		Ok(Some(modifier))
	})
}

fn parse_key(parser: &mut Parser) -> Result<KeyCode, ParseError> {
	if parser.is_end() {
		return Err(parser.error("expected a valid key".to_string()));
	}
	match parser.alt(&[try_parse_fn_key, try_parse_named_key, try_parse_char])? {
		Some(key) => Ok(key),
		None => Err(parser.error("expected a valid key".to_string())),
	}
}

/// Attempts to parse a function key (`"f1"` to `"f24"`).
///
/// Once `f` is followed by a digit the number must be valid; there is no
/// silent fallback to a char key.
fn try_parse_fn_key(parser: &mut Parser) -> Result<Option<KeyCode>, ParseError> {
	if !matches!(parser.peek(), Some('f' | 'F')) {
		return Ok(None);
	}
	if !matches!(parser.peek_at(1), Some(ch) if ch.is_ascii_digit()) {
		return Ok(None);
	}

	parser.next();
	let num = parser.take_while(|ch| ch.is_ascii_digit());

	match num.parse::<u8>() {
		Ok(n) if (1..=24).contains(&n) => Ok(Some(KeyCode::F(n))),
		_ => Err(parser.error("invalid function key number (must be 1-24)".to_string())),
	}
}

fn try_parse_named_key(parser: &mut Parser) -> Result<Option<KeyCode>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		if name.len() < 2 {
			return Ok(None);
		}
		let code = match name.to_ascii_lowercase().as_str() {
			"esc" | "escape" => KeyCode::Esc,
			"enter" | "return" | "ret" => KeyCode::Enter,
			"tab" => KeyCode::Tab,
			"backtab" => KeyCode::BackTab,
			"space" | "spc" => KeyCode::Char(' '),
			"backspace" | "bs" => KeyCode::Backspace,
			"del" | "delete" => KeyCode::Delete,
			"insert" | "ins" => KeyCode::Insert,
			"up" => KeyCode::Up,
			"down" => KeyCode::Down,
			"left" => KeyCode::Left,
			"right" => KeyCode::Right,
			"home" => KeyCode::Home,
			"end" => KeyCode::End,
			"pageup" | "pgup" => KeyCode::PageUp,
			"pagedown" | "pgdown" => KeyCode::PageDown,
			"minus" => KeyCode::Char('-'),
			_ => return Ok(None),
		};
		Ok(Some(code))
	})
}

fn try_parse_char(parser: &mut Parser) -> Result<Option<KeyCode>, ParseError> {
	match parser.peek() {
		Some(ch) if ch.is_ascii() && !ch.is_ascii_control() => {
			parser.next();
			Ok(Some(KeyCode::Char(ch)))
		}
		_ => Ok(None),
	}
}

/// Parses a whitespace-separated list of alternatives, e.g. `"esc ctrl-q"`.
pub fn parse_list(s: &str) -> Result<Vec<Key>, ParseError> {
	s.split_whitespace().map(parse).collect()
}
