//! Editor panes.
//!
//! A pane is a view onto at most one pool buffer. It keeps a working copy of
//! the buffer's text so edits stay local until [`Pane::persist_into`] writes
//! them back; [`Pane::load_from`] is the explicit rebind that makes another
//! pane's persisted edits visible.

mod search;

use ropey::Rope;
use tessel_primitives::{BufferId, Encoding, Key, KeyCode, Rect};

use crate::buffer::Buffer;

#[cfg(test)]
mod tests;

/// Per-pane display preferences, edited through the preferences dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanePrefs {
	pub tab_size: u8,
	pub show_line_numbers: bool,
	pub word_wrap: bool,
	pub hard_wrap: bool,
	pub syntax_highlighting: bool,
	pub auto_close_pairs: bool,
	pub show_scrollbars: bool,
	/// Encoding used when the pane is not bound to a buffer.
	pub encoding_override: Option<Encoding>,
}

impl Default for PanePrefs {
	fn default() -> Self {
		Self {
			tab_size: 4,
			show_line_numbers: true,
			word_wrap: false,
			hard_wrap: false,
			syntax_highlighting: true,
			auto_close_pairs: true,
			show_scrollbars: true,
			encoding_override: None,
		}
	}
}

/// Zero-based cursor location. `col` counts chars within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
	pub row: usize,
	pub col: usize,
}

impl Cursor {
	pub const fn new(row: usize, col: usize) -> Self {
		Self { row, col }
	}
}

/// Result of offering a key to a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneInput {
	Edited,
	Moved,
	/// The move would leave the document; nothing changed.
	Rejected,
	Ignored,
}

#[derive(Debug, Clone)]
pub struct Pane {
	slot: usize,
	buffer: Option<BufferId>,
	area: Rect,
	focused: bool,
	prefs: PanePrefs,
	content: Rope,
	cursor: Cursor,
	scroll: usize,
	hscroll: usize,
	modified: bool,
}

impl Pane {
	pub fn new(slot: usize, prefs: PanePrefs) -> Self {
		Self {
			slot,
			buffer: None,
			area: Rect::default(),
			focused: false,
			prefs,
			content: Rope::new(),
			cursor: Cursor::default(),
			scroll: 0,
			hscroll: 0,
			modified: false,
		}
	}

	pub fn slot(&self) -> usize {
		self.slot
	}

	pub(crate) fn set_slot(&mut self, slot: usize) {
		self.slot = slot;
	}

	pub fn buffer(&self) -> Option<BufferId> {
		self.buffer
	}

	pub fn area(&self) -> Rect {
		self.area
	}

	pub fn set_area(&mut self, area: Rect) {
		self.area = area;
		self.scroll_to_cursor();
	}

	pub fn is_focused(&self) -> bool {
		self.focused
	}

	pub fn focus(&mut self) {
		self.focused = true;
	}

	pub fn blur(&mut self) {
		self.focused = false;
	}

	pub fn prefs(&self) -> &PanePrefs {
		&self.prefs
	}

	pub fn set_prefs(&mut self, prefs: PanePrefs) {
		self.prefs = prefs;
		self.scroll_to_cursor();
	}

	pub fn content(&self) -> &Rope {
		&self.content
	}

	/// Whether the working copy differs from what was last loaded or persisted.
	pub fn is_modified(&self) -> bool {
		self.modified
	}

	pub fn is_blank(&self) -> bool {
		self.content.len_chars() == 0
	}

	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	/// First visible row and column.
	pub fn scroll(&self) -> (usize, usize) {
		(self.scroll, self.hscroll)
	}

	/// Moves the cursor, clamping it to the document.
	pub fn set_cursor(&mut self, cursor: Cursor) {
		let row = cursor.row.min(self.line_count().saturating_sub(1));
		let col = cursor.col.min(self.line_len(row));
		self.cursor = Cursor::new(row, col);
		self.scroll_to_cursor();
	}

	/// Binds the pane to `buffer` and reloads its content.
	///
	/// Rebinding the same buffer keeps the cursor where it was.
	pub fn load_from(&mut self, buffer: &Buffer) {
		let same = self.buffer == Some(buffer.id());
		self.buffer = Some(buffer.id());
		self.content = buffer.content().clone();
		self.modified = false;
		let cursor = if same { self.cursor } else { Cursor::default() };
		if !same {
			self.scroll = 0;
			self.hscroll = 0;
		}
		self.set_cursor(cursor);
	}

	/// Writes the working copy back to its buffer.
	pub fn persist_into(&mut self, buffer: &mut Buffer) {
		if self.modified && self.buffer == Some(buffer.id()) {
			buffer.set_content(self.content.clone());
		}
		self.modified = false;
	}

	pub fn line_count(&self) -> usize {
		self.content.len_lines()
	}

	/// Length of `row` in chars, excluding the line ending.
	pub fn line_len(&self, row: usize) -> usize {
		if row >= self.content.len_lines() {
			return 0;
		}
		let line = self.content.line(row);
		let mut len = line.len_chars();
		if len > 0 && line.char(len - 1) == '\n' {
			len -= 1;
			if len > 0 && line.char(len - 1) == '\r' {
				len -= 1;
			}
		}
		len
	}

	/// Width of the line-number gutter, including one cell of padding.
	pub fn gutter_width(&self) -> u16 {
		if !self.prefs.show_line_numbers {
			return 0;
		}
		let digits = self.line_count().max(1).ilog10() as u16 + 1;
		digits + 1
	}

	fn char_index(&self, cursor: Cursor) -> usize {
		self.content.line_to_char(cursor.row) + cursor.col
	}

	fn cursor_at(&self, char_index: usize) -> Cursor {
		let row = self.content.char_to_line(char_index);
		Cursor::new(row, char_index - self.content.line_to_char(row))
	}

	fn insert(&mut self, text: &str) {
		let at = self.char_index(self.cursor);
		self.content.insert(at, text);
		self.modified = true;
		self.cursor = self.cursor_at(at + text.chars().count());
	}

	/// Handles an editing or navigation key.
	pub fn handle_key(&mut self, key: Key) -> PaneInput {
		let result = self.apply_key(key);
		if result != PaneInput::Ignored {
			self.scroll_to_cursor();
		}
		result
	}

	fn apply_key(&mut self, key: Key) -> PaneInput {
		if let Some(ch) = key.printable() {
			self.insert_char(ch);
			return PaneInput::Edited;
		}
		if !key.modifiers.is_empty() {
			return PaneInput::Ignored;
		}

		let Cursor { row, col } = self.cursor;
		let last_row = self.line_count().saturating_sub(1);
		let page = usize::from(self.area.height.max(2) - 1);

		match key.code {
			KeyCode::Enter => {
				self.insert("\n");
				PaneInput::Edited
			}
			KeyCode::Tab => {
				let tab = usize::from(self.prefs.tab_size.max(1));
				self.insert(&" ".repeat(tab - col % tab));
				PaneInput::Edited
			}
			KeyCode::Backspace => {
				let at = self.char_index(self.cursor);
				if at == 0 {
					return PaneInput::Rejected;
				}
				// Removes a whole CRLF pair when joining lines.
				let start = if col == 0 && at >= 2 && self.content.char(at - 2) == '\r' { at - 2 } else { at - 1 };
				self.content.remove(start..at);
				self.modified = true;
				self.cursor = self.cursor_at(start);
				PaneInput::Edited
			}
			KeyCode::Delete => {
				let at = self.char_index(self.cursor);
				if at >= self.content.len_chars() {
					return PaneInput::Rejected;
				}
				let end = if self.content.char(at) == '\r' && self.content.get_char(at + 1) == Some('\n') { at + 2 } else { at + 1 };
				self.content.remove(at..end);
				self.modified = true;
				PaneInput::Edited
			}
			KeyCode::Left if col > 0 => self.move_to(row, col - 1),
			KeyCode::Left if row > 0 => self.move_to(row - 1, self.line_len(row - 1)),
			KeyCode::Right if col < self.line_len(row) => self.move_to(row, col + 1),
			KeyCode::Right if row < last_row => self.move_to(row + 1, 0),
			KeyCode::Up if row > 0 => self.move_to(row - 1, col),
			KeyCode::Down if row < last_row => self.move_to(row + 1, col),
			KeyCode::PageUp if row > 0 => self.move_to(row.saturating_sub(page), col),
			KeyCode::PageDown if row < last_row => self.move_to((row + page).min(last_row), col),
			KeyCode::Home => self.move_to(row, 0),
			KeyCode::End => self.move_to(row, self.line_len(row)),
			KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
				PaneInput::Rejected
			}
			_ => PaneInput::Ignored,
		}
	}

	fn insert_char(&mut self, ch: char) {
		let closing = match ch {
			'(' => Some(')'),
			'[' => Some(']'),
			'{' => Some('}'),
			'"' => Some('"'),
			'\'' => Some('\''),
			_ => None,
		};
		match closing {
			Some(close) if self.prefs.auto_close_pairs => {
				self.insert(&format!("{ch}{close}"));
				self.cursor.col -= 1;
			}
			_ => self.insert(ch.encode_utf8(&mut [0; 4])),
		}
	}

	fn move_to(&mut self, row: usize, col: usize) -> PaneInput {
		self.set_cursor(Cursor::new(row, col));
		PaneInput::Moved
	}

	fn text_size(&self) -> (usize, usize) {
		let width = self.area.width.saturating_sub(self.gutter_width());
		(usize::from(width.max(1)), usize::from(self.area.height.max(1)))
	}

	fn scroll_to_cursor(&mut self) {
		let (width, height) = self.text_size();
		let Cursor { row, col } = self.cursor;
		if row < self.scroll {
			self.scroll = row;
		} else if row >= self.scroll + height {
			self.scroll = row + 1 - height;
		}
		if col < self.hscroll {
			self.hscroll = col;
		} else if col >= self.hscroll + width {
			self.hscroll = col + 1 - width;
		}
	}
}
