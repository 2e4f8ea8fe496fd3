//! Per-pane preferences dialog.

use tessel_primitives::{Encoding, Rect};
use tracing::debug;

use super::files::ticked_encoding;
use super::{CheckBox, Dialog, DialogKind, Flow, Form, ListBox, ListItem, TextField, Widget};
use crate::pane::PanePrefs;
use crate::workspace::Workspace;
use crate::{Result, WorkspaceError};

/// Checkbox names, labels and the preference each one edits.
const FLAGS: [(&str, &str, fn(&mut PanePrefs) -> &mut bool); 6] = [
	("line-numbers", "Line numbers", |p| &mut p.show_line_numbers),
	("word-wrap", "Word wrap", |p| &mut p.word_wrap),
	("hard-wrap", "Hard wrap", |p| &mut p.hard_wrap),
	("highlighting", "Highlighting", |p| &mut p.syntax_highlighting),
	("close-pairs", "Close pairs", |p| &mut p.auto_close_pairs),
	("scrollbars", "Scrollbars", |p| &mut p.show_scrollbars),
];

fn tab_size(text: &str) -> Result<u8> {
	text.parse::<u8>()
		.ok()
		.filter(|size| (1..=9).contains(size))
		.ok_or(WorkspaceError::InvalidTabSize)
}

impl Workspace {
	pub fn show_preferences(&mut self) -> Result<()> {
		let rect = self.dialog_rect(17, 35)?;
		let pane = self.active_window().active_pane().ok_or(WorkspaceError::NoActivePane)?;
		let mut prefs = pane.prefs().clone();
		let encoding = pane
			.buffer()
			.and_then(|id| self.pool.get_buffer_by_id(id))
			.map(|buffer| buffer.encoding())
			.or(prefs.encoding_override)
			.unwrap_or(self.default_encoding);

		let mut encodings = ListBox::new(Encoding::ALL.iter().map(|e| ListItem::new(e.name())).collect(), "");
		encodings.tick(encoding.index());
		encodings.highlight_item(encoding.index());
		let size = TextField::new(prefs.tab_size.to_string()).with_filter(|ch| ch.is_ascii_digit());
		let mut form = Form::new()
			.label(Rect::new(0, 0, 12, 1), "Tab size:")
			.with("tab-size", Rect::new(12, 0, 4, 1), Widget::Text(size))
			.label(Rect::new(0, 2, 33, 1), "Encoding:")
			.with("encoding", Rect::new(0, 3, 33, 6), Widget::List(encodings));
		for (row, (name, label, flag)) in (9..).zip(FLAGS) {
			let checked = *flag(&mut prefs);
			form = form.with(name, Rect::new(0, row, 33, 1), Widget::Check(CheckBox::new(label, checked)));
		}
		self.install_dialog(Dialog::new("Preferences", rect, form, DialogKind::Preferences));
		Ok(())
	}

	/// Validates the tab size, then applies every field at once.
	pub(super) fn confirm_preferences(&mut self, form: &Form) -> Result<Flow> {
		let size = tab_size(form.text("tab-size"))?;
		let encoding = ticked_encoding(form);
		let (window, pool) = self.tab_and_pool();
		let pane = window.active_pane_mut().ok_or(WorkspaceError::NoActivePane)?;

		let mut prefs = pane.prefs().clone();
		prefs.tab_size = size;
		for (name, _, flag) in FLAGS {
			*flag(&mut prefs) = form.checked(name);
		}
		match pane.buffer().and_then(|id| pool.get_buffer_mut(id)) {
			Some(buffer) => buffer.set_encoding(encoding),
			None => prefs.encoding_override = Some(encoding),
		}
		debug!(pane = pane.slot(), ?prefs, "preferences applied");
		pane.set_prefs(prefs);
		Ok(Flow::Close)
	}
}
