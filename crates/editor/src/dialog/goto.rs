//! Go-to-line dialog.

use tessel_primitives::Rect;

use super::{Dialog, DialogKind, Flow, Form, TextField, Widget};
use crate::pane::{Cursor, Pane};
use crate::workspace::Workspace;
use crate::{Result, WorkspaceError};

/// Parses `"<row>[.<col>]"`, both 1-based, into a zero-based cursor.
pub fn parse_target(text: &str) -> Result<Cursor> {
	let (row, col) = match text.split_once('.') {
		Some((row, col)) => (row, Some(col)),
		None => (text, None),
	};
	let number = |part: &str| part.parse::<usize>().ok().filter(|&n| n >= 1);
	let row = number(row).ok_or(WorkspaceError::InvalidLineNumber)?;
	let col = match col {
		Some(col) => number(col).ok_or(WorkspaceError::InvalidLineNumber)?,
		None => 1,
	};
	Ok(Cursor::new(row - 1, col - 1))
}

/// Whether `target` names an existing row, and a column no further than
/// the end of that row.
fn in_range(pane: &Pane, target: Cursor) -> bool {
	target.row < pane.line_count() && target.col <= pane.line_len(target.row)
}

fn line_filter(ch: char) -> bool {
	ch.is_ascii_digit() || ch == '.'
}

impl Workspace {
	pub fn show_go_to_line(&mut self) -> Result<()> {
		let rect = self.dialog_rect(5, 25)?;
		let origin = self.active_window().active_pane().ok_or(WorkspaceError::NoActivePane)?.cursor();
		let field = TextField::new((origin.row + 1).to_string()).with_filter(line_filter);
		let form = Form::new()
			.label(Rect::new(0, 0, 23, 1), "Line[.column]:")
			.with("line", Rect::new(0, 1, 23, 1), Widget::Text(field));
		self.install_dialog(Dialog::new("Go to line", rect, form, DialogKind::GoToLine { origin }));
		Ok(())
	}

	/// Moves the cursor tentatively while the target is typed.
	pub(super) fn preview_go_to(&mut self, text: &str, origin: Cursor) {
		let Some(pane) = self.active_window_mut().active_pane_mut() else {
			return;
		};
		match parse_target(text) {
			Ok(target) if in_range(pane, target) => pane.set_cursor(target),
			_ => pane.set_cursor(origin),
		}
	}

	/// Jumps to `text`. Out-of-range targets only ring the bell.
	pub(crate) fn go_to(&mut self, text: &str) -> Result<Flow> {
		if text.is_empty() {
			self.ring();
			return Ok(Flow::Stay);
		}
		let target = parse_target(text)?;
		let pane = self.active_window_mut().active_pane_mut().ok_or(WorkspaceError::NoActivePane)?;
		if in_range(pane, target) {
			pane.set_cursor(target);
			return Ok(Flow::Close);
		}
		self.ring();
		Ok(Flow::Stay)
	}
}
