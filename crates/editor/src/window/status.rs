//! Title and status row content.

use std::path::Path;

use crate::buffer::BufferPool;
use crate::pane::Pane;

/// Save state of a pane, as seen by the close/quit protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
	/// Bound to a file whose content matches the pane.
	Saved,
	/// Untitled buffer, or no buffer at all.
	UnsavedNoFile,
	/// Bound to a file with pending changes.
	UnsavedWithFile,
}

pub fn pane_state(pane: &Pane, pool: &dyn BufferPool) -> PaneState {
	let Some(buffer) = pane.buffer().and_then(|id| pool.get_buffer_by_id(id)) else {
		return PaneState::UnsavedNoFile;
	};
	if buffer.is_untitled() {
		PaneState::UnsavedNoFile
	} else if buffer.is_dirty() || pane.is_modified() {
		PaneState::UnsavedWithFile
	} else {
		PaneState::Saved
	}
}

/// Guesses a language name from a file extension.
pub fn language_for(path: Option<&Path>) -> &'static str {
	let extension = path
		.and_then(Path::extension)
		.and_then(|ext| ext.to_str())
		.map(str::to_ascii_lowercase);
	match extension.as_deref() {
		Some("rs") => "Rust",
		Some("py") => "Python",
		Some("c" | "h") => "C",
		Some("cc" | "cpp" | "cxx" | "hpp") => "C++",
		Some("go") => "Go",
		Some("java") => "Java",
		Some("js" | "mjs") => "JavaScript",
		Some("ts") => "TypeScript",
		Some("html" | "htm") => "HTML",
		Some("css") => "CSS",
		Some("json") => "JSON",
		Some("toml") => "TOML",
		Some("yaml" | "yml") => "YAML",
		Some("md") => "Markdown",
		Some("sh" | "bash") => "Shell",
		_ => "Plain text",
	}
}

fn human_size(bytes: usize) -> String {
	const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
	let mut size = bytes as f64;
	let mut unit = 0;
	while size >= 1024.0 && unit + 1 < UNITS.len() {
		size /= 1024.0;
		unit += 1;
	}
	if unit == 0 { format!("{bytes} B") } else { format!("{size:.1} {}", UNITS[unit]) }
}

/// Content of the title and status rows for the active pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
	pub title: String,
	pub status: String,
}

impl StatusLine {
	pub fn compose(pane: Option<&Pane>, pool: &dyn BufferPool) -> Self {
		let Some(pane) = pane else {
			return Self {
				title: "tessel".to_string(),
				status: " Inactive".to_string(),
			};
		};
		let buffer = pane.buffer().and_then(|id| pool.get_buffer_by_id(id));
		let name = buffer.map(|b| b.name()).unwrap_or_else(|| "untitled".to_string());
		let state = match pane_state(pane, pool) {
			PaneState::Saved => "Saved",
			PaneState::UnsavedWithFile => "Modified",
			PaneState::UnsavedNoFile => "Unsaved",
		};
		let content = pane.content();
		let lines = pane.line_count();
		let sloc = content.lines().filter(|line| line.chars().any(|ch| !ch.is_whitespace())).count();
		let cursor = pane.cursor();
		Self {
			title: format!("tessel - {name}"),
			status: format!(
				" {state} | {} | {lines} lines ({sloc} sloc) | {} | Ln {}, Col {}",
				language_for(buffer.and_then(|b| b.filename())),
				human_size(content.len_bytes()),
				cursor.row + 1,
				cursor.col + 1,
			),
		}
	}
}
