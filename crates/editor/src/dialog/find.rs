//! Find and find/replace dialogs.

use tessel_primitives::Rect;
use tracing::debug;

use super::{CheckBox, Dialog, DialogKind, Flow, Form, TextField, Widget};
use crate::workspace::Workspace;
use crate::{Result, WorkspaceError};

impl Workspace {
	pub fn show_find(&mut self, replace: bool) -> Result<()> {
		let height = if replace { 9 } else { 7 };
		let rect = self.dialog_rect(height, 50)?;
		if self.active_window().active_pane().is_none() {
			return Err(WorkspaceError::NoActivePane);
		}
		let mut form = Form::new()
			.label(Rect::new(0, 0, 9, 1), "Find:")
			.with("find", Rect::new(9, 0, 39, 1), Widget::Text(TextField::new(self.last_search.clone())));
		let mut row = 2;
		if replace {
			form = form
				.label(Rect::new(0, row, 9, 1), "Replace:")
				.with("replace", Rect::new(9, row, 39, 1), Widget::Text(TextField::new("")));
			row += 2;
		}
		let hint = if replace { "enter: replace  ctrl-s: replace all" } else { "enter: find next" };
		form = form
			.with("case", Rect::new(0, row, 48, 1), Widget::Check(CheckBox::new("Match case", false)))
			.label(Rect::new(0, row + 2, 48, 1), hint);
		let title = if replace { "Find and replace" } else { "Find" };
		self.install_dialog(Dialog::new(title, rect, form, DialogKind::Find { replace }));
		Ok(())
	}

	/// Finds the next match, or in replace mode replaces the match under the
	/// cursor first. Rings the bell when nothing matches.
	pub(super) fn find_step(&mut self, form: &Form, replace: bool) -> Result<Flow> {
		let needle = form.text("find");
		let match_case = form.checked("case");
		if needle.is_empty() {
			self.ring();
			return Ok(Flow::Stay);
		}
		self.last_search = needle.to_string();
		let pane = self.active_window_mut().active_pane_mut().ok_or(WorkspaceError::NoActivePane)?;
		let found = (replace && pane.replace_current(needle, form.text("replace"), match_case)) || pane.find_next(needle, match_case).is_some();
		if !found {
			self.ring();
		}
		Ok(Flow::Stay)
	}

	pub(super) fn replace_everything(&mut self, form: &Form) -> Result<Flow> {
		let needle = form.text("find");
		if needle.is_empty() {
			self.ring();
			return Ok(Flow::Stay);
		}
		let pane = self.active_window_mut().active_pane_mut().ok_or(WorkspaceError::NoActivePane)?;
		let count = pane.replace_all(needle, form.text("replace"), form.checked("case"));
		debug!(pattern = needle, count, "replaced all");
		if count == 0 {
			self.ring();
		}
		Ok(Flow::Close)
	}
}
