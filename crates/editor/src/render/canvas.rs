//! Off-screen grid of styled cells.

use tessel_primitives::{Position, Rect};
use unicode_width::UnicodeWidthChar;

use crate::theme::Style;

/// One terminal cell. A wide character occupies its own cell plus
/// continuation cells holding [`Cell::CONTINUATION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
	pub ch: char,
	pub style: Style,
}

impl Cell {
	pub const CONTINUATION: char = '\0';

	pub const fn new(ch: char, style: Style) -> Self {
		Self { ch, style }
	}

	pub fn is_continuation(&self) -> bool {
		self.ch == Self::CONTINUATION
	}
}

impl Default for Cell {
	fn default() -> Self {
		Self::new(' ', Style::default())
	}
}

/// A full frame, painted by the workspace and shown by a terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
	width: u16,
	height: u16,
	cells: Vec<Cell>,
	cursor: Option<Position>,
}

impl Canvas {
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
			cursor: None,
		}
	}

	pub fn width(&self) -> u16 {
		self.width
	}

	pub fn height(&self) -> u16 {
		self.height
	}

	pub fn area(&self) -> Rect {
		Rect::new(0, 0, self.width, self.height)
	}

	pub fn cursor(&self) -> Option<Position> {
		self.cursor
	}

	pub fn set_cursor(&mut self, position: Option<Position>) {
		self.cursor = position.filter(|&p| self.area().contains(p));
	}

	fn index(&self, x: u16, y: u16) -> Option<usize> {
		(x < self.width && y < self.height).then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
	}

	pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
		self.cells.get(self.index(x, y)?)
	}

	pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
		let index = self.index(x, y)?;
		self.cells.get_mut(index)
	}

	/// Fills `rect`, clipped to the canvas, with `ch`.
	pub fn fill(&mut self, rect: Rect, ch: char, style: Style) {
		for pos in rect.positions() {
			if let Some(cell) = self.cell_mut(pos.x, pos.y) {
				*cell = Cell::new(ch, style);
			}
		}
	}

	/// Writes `text` from `(x, y)`, using at most `max_width` columns.
	///
	/// Control and zero-width characters are skipped; a wide character that
	/// would not fit entirely is dropped along with the rest of the text.
	/// Returns the column after the last cell written.
	pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
		let limit = x.saturating_add(max_width).min(self.width);
		let mut col = x;
		for ch in text.chars().filter(|ch| !ch.is_control()) {
			let width = ch.width().unwrap_or(0) as u16;
			if width == 0 {
				continue;
			}
			if col.saturating_add(width) > limit {
				break;
			}
			if let Some(cell) = self.cell_mut(col, y) {
				*cell = Cell::new(ch, style);
			}
			for extra in 1..width {
				if let Some(cell) = self.cell_mut(col + extra, y) {
					*cell = Cell::new(Cell::CONTINUATION, style);
				}
			}
			col += width;
		}
		col
	}

	/// Visible text of row `y`, continuation cells omitted.
	pub fn row_text(&self, y: u16) -> String {
		(0..self.width)
			.filter_map(|x| self.cell(x, y))
			.filter(|cell| !cell.is_continuation())
			.map(|cell| cell.ch)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn put_str_clips_to_width() {
		let mut canvas = Canvas::new(6, 1);
		let end = canvas.put_str(2, 0, "abcdef", 3, Style::default());
		assert_eq!(end, 5);
		assert_eq!(canvas.row_text(0), "  abc ");
	}

	#[test]
	fn wide_chars_take_two_cells() {
		let mut canvas = Canvas::new(5, 1);
		let end = canvas.put_str(0, 0, "a漢b漢", 5, Style::default());
		assert_eq!(end, 4);
		assert!(canvas.cell(2, 0).unwrap().is_continuation());
		assert_eq!(canvas.row_text(0), "a漢b ");
	}

	#[test]
	fn out_of_bounds_writes_are_ignored() {
		let mut canvas = Canvas::new(3, 2);
		canvas.fill(Rect::new(1, 1, 10, 10), '#', Style::default());
		canvas.put_str(0, 5, "zzz", 3, Style::default());
		assert_eq!(canvas.row_text(0), "   ");
		assert_eq!(canvas.row_text(1), " ##");
		canvas.set_cursor(Some(Position::new(3, 0)));
		assert_eq!(canvas.cursor(), None);
	}
}
