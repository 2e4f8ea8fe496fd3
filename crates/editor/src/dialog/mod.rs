//! Modal dialogs.
//!
//! The workspace holds at most one [`Dialog`] in a single optional slot, so
//! showing a dialog replaces whatever was visible and there is no dialog
//! stack. While a dialog is open it receives every key; the active pane is
//! suspended until the dialog closes.
//!
//! Each dialog kind has a `show_*` constructor on [`Workspace`] that first
//! checks the screen has room (failing with
//! [`WorkspaceError::InsufficientScreenSpace`] before anything is built),
//! then assembles a [`Form`] and installs the dialog. Key handling works on
//! the logical actions of [`LogicalKey`], never on physical keys.

mod commands;
mod files;
mod find;
mod form;
mod goto;
mod help;
mod lists;
mod preferences;
mod prompt;
mod widgets;

use std::path::PathBuf;

pub use commands::{Command, parse_command};
pub use files::Listing;
pub use form::{Field, Form, Widget};
pub use goto::parse_target;
pub use prompt::{Alert, PendingAction, Question};
use tessel_keymap::LogicalKey;
use tessel_primitives::{BufferId, Key, Rect};
use tracing::debug;
pub use widgets::{CheckBox, ListBox, ListItem, TextField, WidgetEvent, filter_matches};

use crate::pane::Cursor;
use crate::workspace::Workspace;
use crate::{Result, WorkspaceError};

#[cfg(test)]
mod tests;

/// What happens once a save-as flow has written the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
	Nothing,
	/// Close the active pane (save requested by the close protocol).
	ClosePane,
}

#[derive(Debug, Clone)]
pub enum DialogKind {
	Find { replace: bool },
	GoToLine { origin: Cursor },
	Preferences,
	Open { listing: Listing },
	SaveAs { buffer: BufferId, then: AfterSave, listing: Listing },
	RecentFiles { files: Vec<PathBuf>, projects: Vec<PathBuf> },
	ActiveFiles { ids: Vec<BufferId> },
	ActiveTabs { origin: usize },
	ProjectExplorer { root: PathBuf, entries: Vec<PathBuf> },
	Help,
	Command,
	SwitchLayout,
	Question(Question),
}

#[derive(Debug, Clone)]
pub struct Dialog {
	pub title: String,
	pub rect: Rect,
	pub form: Form,
	pub kind: DialogKind,
}

impl Dialog {
	pub fn new(title: impl Into<String>, rect: Rect, form: Form, kind: DialogKind) -> Self {
		Self {
			title: title.into(),
			rect,
			form,
			kind,
		}
	}

	/// Area inside the border; form rectangles are relative to it.
	pub fn inner(&self) -> Rect {
		self.rect.inner(1)
	}
}

/// Whether a dialog stays open after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
	Stay,
	Close,
}

impl Workspace {
	/// Centered rectangle of `height` x `width` cells, if the screen has room.
	pub(crate) fn dialog_rect(&self, height: u16, width: u16) -> Result<Rect> {
		let (screen_width, screen_height) = self.size;
		Rect::new(0, 0, screen_width, screen_height)
			.centered(width, height)
			.ok_or(WorkspaceError::InsufficientScreenSpace {
				required_width: width,
				required_height: height,
				width: screen_width,
				height: screen_height,
			})
	}

	/// Makes `dialog` the input sink, hiding any dialog that was visible.
	pub(crate) fn install_dialog(&mut self, dialog: Dialog) {
		if let Some(previous) = self.dialog.take() {
			debug!(title = %previous.title, "dialog hidden");
		}
		debug!(title = %dialog.title, "dialog opened");
		self.dialog = Some(dialog);
	}

	/// Re-centers the open dialog after a resize.
	pub(crate) fn recenter_dialog(&mut self) {
		let (width, height) = self.size;
		if let Some(dialog) = &mut self.dialog {
			let (w, h) = (dialog.rect.width, dialog.rect.height);
			dialog.rect = Rect::new(0, 0, width, height)
				.centered(w, h)
				.unwrap_or(Rect::new(0, 0, w, h));
		}
	}

	/// Offers `key` to the open dialog.
	///
	/// The dialog is taken out of its slot while it runs so handlers can
	/// freely open another dialog; it goes back only if it stays open and
	/// nothing replaced it.
	pub(crate) fn handle_dialog_key(&mut self, key: Key) {
		let Some(mut dialog) = self.dialog.take() else {
			return;
		};
		let flow = self.dispatch_dialog_key(&mut dialog, key).unwrap_or_else(|err| {
			self.report(err);
			Flow::Stay
		});
		match flow {
			Flow::Stay if self.dialog.is_none() => self.dialog = Some(dialog),
			Flow::Stay => {}
			Flow::Close => debug!(title = %dialog.title, "dialog closed"),
		}
	}

	fn dispatch_dialog_key(&mut self, dialog: &mut Dialog, key: Key) -> Result<Flow> {
		if let DialogKind::Question(question) = &mut dialog.kind {
			return Ok(self.question_key(question, key));
		}
		if self.keys.is(key, LogicalKey::CloseWindow) {
			self.cancel_dialog(dialog);
			return Ok(Flow::Close);
		}
		if self.keys.is(key, LogicalKey::NextField) {
			dialog.form.focus_next();
			return Ok(Flow::Stay);
		}
		if self.keys.is(key, LogicalKey::PreviousField) {
			dialog.form.focus_previous();
			return Ok(Flow::Stay);
		}
		if matches!(dialog.kind, DialogKind::Help) && self.keys.is(key, LogicalKey::ShowHelp) {
			return Ok(Flow::Close);
		}
		if self.keys.is(key, LogicalKey::SaveAndCloseWindow) {
			return self.save_and_close_dialog(dialog);
		}
		if self.keys.is(key, LogicalKey::FinalizeChoice) {
			return self.confirm_dialog(dialog);
		}
		if self.keys.is(key, LogicalKey::ListMakeSelection) && matches!(dialog.form.focused_widget(), Some(Widget::List(_))) {
			if dialog.form.focused_name() == Some("encoding") {
				if let Some(list) = dialog.form.list_mut("encoding") {
					list.tick_highlighted();
				}
				return Ok(Flow::Stay);
			}
			return self.confirm_dialog(dialog);
		}
		match dialog.form.handle_key(key) {
			Some((name, WidgetEvent::Changed)) => self.dialog_changed(dialog, name),
			_ => Ok(Flow::Stay),
		}
	}

	/// Undoes live previews; nothing else is committed on cancel.
	fn cancel_dialog(&mut self, dialog: &Dialog) {
		match dialog.kind {
			DialogKind::GoToLine { origin } => {
				if let Some(pane) = self.active_window_mut().active_pane_mut() {
					pane.set_cursor(origin);
				}
			}
			DialogKind::ActiveTabs { origin } => self.select_tab(origin),
			_ => {}
		}
	}

	fn dialog_changed(&mut self, dialog: &mut Dialog, name: &'static str) -> Result<Flow> {
		match (&mut dialog.kind, name) {
			(DialogKind::GoToLine { origin }, "line") => {
				let origin = *origin;
				self.preview_go_to(dialog.form.text("line"), origin);
			}
			(DialogKind::Open { listing } | DialogKind::SaveAs { listing, .. }, "path") => {
				let path = self.resolve(dialog.form.text("path"));
				listing.follow(&path, &mut dialog.form);
			}
			(DialogKind::RecentFiles { .. } | DialogKind::ActiveFiles { .. } | DialogKind::ProjectExplorer { .. }, "search") => {
				let query = dialog.form.text("search").to_string();
				for list in ["files", "projects", "buffers"] {
					if let Some(list) = dialog.form.list_mut(list) {
						list.set_filter(&query);
					}
				}
			}
			(DialogKind::ActiveTabs { .. }, "search") => {
				let query = dialog.form.text("search").to_string();
				let Some(tabs) = dialog.form.list_mut("tabs") else {
					return Ok(Flow::Stay);
				};
				tabs.set_filter(&query);
				if let Some(index) = tabs.highlighted() {
					self.select_tab(index);
				}
			}
			(DialogKind::ActiveTabs { .. }, "tabs") => {
				if let Some(index) = dialog.form.list("tabs").and_then(ListBox::highlighted) {
					self.select_tab(index);
				}
			}
			_ => {}
		}
		Ok(Flow::Stay)
	}

	fn confirm_dialog(&mut self, dialog: &mut Dialog) -> Result<Flow> {
		match &dialog.kind {
			DialogKind::Find { replace } => {
				let replace = *replace;
				self.find_step(&dialog.form, replace)
			}
			DialogKind::GoToLine { .. } => self.go_to(dialog.form.text("line")),
			DialogKind::Preferences => self.confirm_preferences(&dialog.form),
			DialogKind::Open { .. } | DialogKind::SaveAs { .. } => self.confirm_file_dialog(dialog),
			DialogKind::RecentFiles { files, projects } => {
				let (files, projects) = (files.clone(), projects.clone());
				self.confirm_recent(&dialog.form, &files, &projects)
			}
			DialogKind::ActiveFiles { ids } => {
				let ids = ids.clone();
				self.confirm_active_file(&dialog.form, &ids)
			}
			DialogKind::ActiveTabs { .. } => Ok(self.confirm_active_tab(&dialog.form)),
			DialogKind::Help => Ok(Flow::Close),
			DialogKind::ProjectExplorer { root, entries } => {
				let (root, entries) = (root.clone(), entries.clone());
				self.confirm_explorer(&dialog.form, &root, &entries)
			}
			DialogKind::Command => self.confirm_command(dialog.form.text("command")),
			DialogKind::SwitchLayout => self.confirm_switch_layout(&dialog.form),
			DialogKind::Question(_) => Ok(Flow::Stay),
		}
	}

	fn save_and_close_dialog(&mut self, dialog: &mut Dialog) -> Result<Flow> {
		match dialog.kind {
			DialogKind::Find { replace: true } => self.replace_everything(&dialog.form),
			DialogKind::Find { replace: false } => {
				self.find_step(&dialog.form, false)?;
				Ok(Flow::Close)
			}
			_ => self.confirm_dialog(dialog),
		}
	}
}
