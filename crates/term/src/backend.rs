//! Crossterm implementation of the workspace [`Terminal`].

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::QueueableCommand;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use tessel_editor::{Canvas, Color, Event, Style, Terminal};
use tessel_primitives::{Key, KeyCode, Modifiers};

/// Raw-mode, alternate-screen terminal on stdout.
///
/// Frames are diffed against the previously presented one; only changed
/// cells are written. Dropping the backend restores the terminal.
pub struct CrosstermBackend {
	out: BufWriter<Stdout>,
	last: Option<Canvas>,
}

impl CrosstermBackend {
	pub fn new() -> io::Result<Self> {
		terminal::enable_raw_mode()?;
		let mut out = BufWriter::new(io::stdout());
		out.queue(EnterAlternateScreen)?.queue(Hide)?;
		out.flush()?;
		Ok(Self { out, last: None })
	}

	fn apply_style(&mut self, style: Style) -> io::Result<()> {
		self.out
			.queue(SetAttribute(Attribute::Reset))?
			.queue(SetForegroundColor(map_color(style.fg)))?
			.queue(SetBackgroundColor(map_color(style.bg)))?;
		if style.bold {
			self.out.queue(SetAttribute(Attribute::Bold))?;
		}
		if style.reverse {
			self.out.queue(SetAttribute(Attribute::Reverse))?;
		}
		Ok(())
	}
}

impl Drop for CrosstermBackend {
	fn drop(&mut self) {
		let _ = self.out.flush();
		let _ = restore();
	}
}

/// Leaves the alternate screen and raw mode. Safe to call more than once.
pub fn restore() -> io::Result<()> {
	let mut out = io::stdout();
	out.queue(SetAttribute(Attribute::Reset))?
		.queue(Show)?
		.queue(LeaveAlternateScreen)?;
	out.flush()?;
	terminal::disable_raw_mode()
}

impl Terminal for CrosstermBackend {
	fn size(&mut self) -> io::Result<(u16, u16)> {
		terminal::size()
	}

	fn read_event(&mut self) -> io::Result<Option<Event>> {
		loop {
			match event::read()? {
				event::Event::Key(key) if key.kind != KeyEventKind::Release => {
					if let Some(key) = map_key(key) {
						return Ok(Some(Event::Key(key)));
					}
				}
				event::Event::Resize(width, height) => return Ok(Some(Event::Resize { width, height })),
				_ => {}
			}
		}
	}

	fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
		let full = self
			.last
			.as_ref()
			.is_none_or(|last| (last.width(), last.height()) != (canvas.width(), canvas.height()));
		self.out.queue(Hide)?;
		if full {
			self.out.queue(SetAttribute(Attribute::Reset))?.queue(Clear(ClearType::All))?;
		}

		let mut pen = None;
		let mut next = None;
		for y in 0..canvas.height() {
			for x in 0..canvas.width() {
				let Some(cell) = canvas.cell(x, y) else {
					continue;
				};
				if cell.is_continuation() {
					continue;
				}
				let unchanged = !full && self.last.as_ref().and_then(|last| last.cell(x, y)) == Some(cell);
				if unchanged {
					continue;
				}
				if next != Some((x, y)) {
					self.out.queue(MoveTo(x, y))?;
				}
				if pen != Some(cell.style) {
					self.apply_style(cell.style)?;
					pen = Some(cell.style);
				}
				self.out.queue(Print(cell.ch))?;
				next = Some((x + cell_span(canvas, x, y), y));
			}
		}

		self.out.queue(SetAttribute(Attribute::Reset))?;
		if let Some(cursor) = canvas.cursor() {
			self.out.queue(MoveTo(cursor.x, cursor.y))?.queue(Show)?;
		}
		self.out.flush()?;
		self.last = Some(canvas.clone());
		Ok(())
	}

	fn bell(&mut self) -> io::Result<()> {
		self.out.write_all(b"\x07")?;
		self.out.flush()
	}
}

/// Columns covered by the cell at `(x, y)`, counting its continuations.
fn cell_span(canvas: &Canvas, x: u16, y: u16) -> u16 {
	let mut span = 1;
	while canvas.cell(x + span, y).is_some_and(|cell| cell.is_continuation()) {
		span += 1;
	}
	span
}

fn map_color(color: Option<Color>) -> crossterm::style::Color {
	use crossterm::style::Color as C;
	match color {
		None => C::Reset,
		Some(Color::Black) => C::Black,
		Some(Color::Red) => C::DarkRed,
		Some(Color::Green) => C::DarkGreen,
		Some(Color::Yellow) => C::DarkYellow,
		Some(Color::Blue) => C::DarkBlue,
		Some(Color::Magenta) => C::DarkMagenta,
		Some(Color::Cyan) => C::DarkCyan,
		Some(Color::White) => C::White,
		Some(Color::Gray) => C::Grey,
		Some(Color::DarkGray) => C::DarkGrey,
		Some(Color::Rgb(r, g, b)) => C::Rgb { r, g, b },
	}
}

/// Translates a crossterm key press; keys the workspace has no name for
/// are dropped.
fn map_key(event: KeyEvent) -> Option<Key> {
	use crossterm::event::KeyCode as K;
	let code = match event.code {
		K::Char(ch) => KeyCode::Char(ch),
		K::Enter => KeyCode::Enter,
		K::Esc => KeyCode::Esc,
		K::Tab => KeyCode::Tab,
		K::BackTab => KeyCode::BackTab,
		K::Backspace => KeyCode::Backspace,
		K::Delete => KeyCode::Delete,
		K::Insert => KeyCode::Insert,
		K::Up => KeyCode::Up,
		K::Down => KeyCode::Down,
		K::Left => KeyCode::Left,
		K::Right => KeyCode::Right,
		K::Home => KeyCode::Home,
		K::End => KeyCode::End,
		K::PageUp => KeyCode::PageUp,
		K::PageDown => KeyCode::PageDown,
		K::F(n) => KeyCode::F(n),
		_ => return None,
	};
	let modifiers = Modifiers {
		ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
		alt: event.modifiers.contains(KeyModifiers::ALT),
		shift: event.modifiers.contains(KeyModifiers::SHIFT),
	};
	Some(Key::new(code, modifiers).normalized())
}
