//! Cell-addressed rectangles.
//!
//! All coordinates are terminal cells with the origin at the top-left corner.
//! Edges follow the usual half-open convention: `left`/`top` are inclusive,
//! `right`/`bottom` are exclusive.


/// A single terminal cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
	pub x: u16,
	pub y: u16,
}

impl Position {
	pub const fn new(x: u16, y: u16) -> Self {
		Self { x, y }
	}
}

/// A rectangular block of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
	pub x: u16,
	pub y: u16,
	pub width: u16,
	pub height: u16,
}

impl Rect {
	/// Creates a rectangle, clamping the size so the far edges stay within `u16`.
	pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
		Self {
			x,
			y,
			width: width.min(u16::MAX - x),
			height: height.min(u16::MAX - y),
		}
	}

	pub const fn left(self) -> u16 {
		self.x
	}

	pub const fn right(self) -> u16 {
		self.x + self.width
	}

	pub const fn top(self) -> u16 {
		self.y
	}

	pub const fn bottom(self) -> u16 {
		self.y + self.height
	}

	/// Number of cells covered.
	pub const fn area(self) -> u32 {
		self.width as u32 * self.height as u32
	}

	pub const fn is_empty(self) -> bool {
		self.width == 0 || self.height == 0
	}

	pub fn contains(self, pos: Position) -> bool {
		pos.x >= self.left() && pos.x < self.right() && pos.y >= self.top() && pos.y < self.bottom()
	}

	pub fn intersects(self, other: Rect) -> bool {
		self.left() < other.right() && other.left() < self.right() && self.top() < other.bottom() && other.top() < self.bottom()
	}

	/// Returns a `width` x `height` rectangle centered inside `self`.
	///
	/// Returns `None` when the requested size does not fit.
	pub fn centered(self, width: u16, height: u16) -> Option<Rect> {
		if width > self.width || height > self.height {
			return None;
		}
		let x = self.x + (self.width - width) / 2;
		let y = self.y + (self.height - height) / 2;
		Some(Rect::new(x, y, width, height))
	}

	/// Shrinks the rectangle by `margin` cells on every side.
	pub fn inner(self, margin: u16) -> Rect {
		let doubled = margin.saturating_mul(2);
		Rect {
			x: self.x.saturating_add(margin),
			y: self.y.saturating_add(margin),
			width: self.width.saturating_sub(doubled),
			height: self.height.saturating_sub(doubled),
		}
	}

	/// Translates a rectangle expressed relative to `self` into absolute cells.
	pub fn offset(self, relative: Rect) -> Rect {
		Rect::new(self.x.saturating_add(relative.x), self.y.saturating_add(relative.y), relative.width, relative.height)
	}

	/// Iterates every cell inside the rectangle in row-major order.
	pub fn positions(self) -> impl Iterator<Item = Position> {
		(self.top()..self.bottom()).flat_map(move |y| (self.left()..self.right()).map(move |x| Position::new(x, y)))
	}
}
