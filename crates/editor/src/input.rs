//! Terminal boundary: input events and the surface the workspace paints to.

use std::io;

use tessel_primitives::Key;

use crate::render::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	Key(Key),
	Resize { width: u16, height: u16 },
}

/// Result of offering a key to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
	/// The handler acted on the key; nobody else sees it.
	Consumed,
	/// The handler ignored the key; the next layer gets it.
	PassThrough(Key),
}

/// A terminal the workspace can drive.
pub trait Terminal {
	/// Current size in cells, `(width, height)`.
	fn size(&mut self) -> io::Result<(u16, u16)>;

	/// Blocks for the next event. `Ok(None)` means input has ended.
	fn read_event(&mut self) -> io::Result<Option<Event>>;

	/// Shows a fully painted frame.
	fn present(&mut self, canvas: &Canvas) -> io::Result<()>;

	/// Audible alert for rejected input.
	fn bell(&mut self) -> io::Result<()>;
}
