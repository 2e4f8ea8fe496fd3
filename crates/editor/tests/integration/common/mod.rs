//! Common utilities for workspace integration tests.

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use tessel_editor::{Canvas, Config, Event, FilePool, SessionStore, Terminal, Workspace};
use tessel_primitives::Key;

/// A terminal that replays a fixed script and records every frame.
pub struct ScriptedTerminal {
	size: (u16, u16),
	events: VecDeque<Event>,
	pub frames: Vec<Canvas>,
	pub bells: usize,
}

impl ScriptedTerminal {
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			size: (width, height),
			events: VecDeque::new(),
			frames: Vec::new(),
			bells: 0,
		}
	}

	/// Queues whitespace-separated key patterns (`ctrl-s`, `esc`, `f2`).
	pub fn keys(&mut self, keys: &str) -> &mut Self {
		for pattern in keys.split_whitespace() {
			let key = tessel_keymap::parse(pattern).unwrap_or_else(|err| panic!("bad key `{pattern}`: {err}"));
			self.events.push_back(Event::Key(key));
		}
		self
	}

	/// Queues `text` as literal key presses.
	pub fn text(&mut self, text: &str) -> &mut Self {
		self.events.extend(text.chars().map(|ch| Event::Key(Key::char(ch))));
		self
	}

	pub fn resize(&mut self, width: u16, height: u16) -> &mut Self {
		self.events.push_back(Event::Resize { width, height });
		self
	}

	pub fn last_frame(&self) -> &Canvas {
		self.frames.last().expect("at least one frame was presented")
	}
}

impl Terminal for ScriptedTerminal {
	fn size(&mut self) -> io::Result<(u16, u16)> {
		Ok(self.size)
	}

	fn read_event(&mut self) -> io::Result<Option<Event>> {
		let event = self.events.pop_front();
		if let Some(Event::Resize { width, height }) = event {
			self.size = (width, height);
		}
		Ok(event)
	}

	fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
		self.frames.push(canvas.clone());
		Ok(())
	}

	fn bell(&mut self) -> io::Result<()> {
		self.bells += 1;
		Ok(())
	}
}

/// A workspace rooted at `dir` with default settings and no session file.
pub fn workspace(dir: &Path) -> Workspace {
	workspace_with(dir, SessionStore::in_memory(20))
}

pub fn workspace_with(dir: &Path, session: SessionStore) -> Workspace {
	Workspace::new(&Config::default(), Box::new(FilePool::new(dir)), session, dir).expect("default config is valid")
}
