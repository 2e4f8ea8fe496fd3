//! Open and save-as dialogs.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use tessel_primitives::{BufferId, Encoding, Rect};
use tracing::debug;

use super::{AfterSave, Dialog, DialogKind, Flow, Form, ListBox, ListItem, PendingAction, Question, TextField, Widget};
use crate::pane::Pane;
use crate::workspace::Workspace;
use crate::{Result, WorkspaceError};

const HEIGHT: u16 = 20;
const WIDTH: u16 = 80;

/// The directory shown by a file dialog. Entries line up with the items of
/// the dialog's `files` list: the parent first (when there is one), then
/// subdirectories, then files, each group sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
	dir: PathBuf,
	has_parent: bool,
	entries: Vec<PathBuf>,
}

impl Listing {
	pub fn read(dir: &Path) -> Self {
		let mut dirs = Vec::new();
		let mut files = Vec::new();
		match fs::read_dir(dir) {
			Ok(read) => {
				for entry in read.flatten() {
					let path = entry.path();
					if path.is_dir() {
						dirs.push(path);
					} else {
						files.push(path);
					}
				}
			}
			Err(error) => debug!(dir = %dir.display(), %error, "cannot list directory"),
		}
		dirs.sort();
		files.sort();

		let parent = dir.parent().map(Path::to_path_buf);
		let has_parent = parent.is_some();
		let entries = parent.into_iter().chain(dirs).chain(files).collect();
		Self {
			dir: dir.to_path_buf(),
			has_parent,
			entries,
		}
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn entries(&self) -> &[PathBuf] {
		&self.entries
	}

	pub fn items(&self) -> Vec<ListItem> {
		self.entries
			.iter()
			.enumerate()
			.map(|(index, path)| {
				if index == 0 && self.has_parent {
					return ListItem::new("../");
				}
				let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
				if path.is_dir() { ListItem::new(format!("{name}/")) } else { ListItem::new(name) }
			})
			.collect()
	}

	/// Re-lists when `path` leads into another directory.
	pub(crate) fn follow(&mut self, path: &Path, form: &mut Form) {
		let target = if path.is_dir() { Some(path) } else { path.parent() };
		let Some(target) = target.filter(|t| *t != self.dir && t.is_dir()) else {
			return;
		};
		*self = Listing::read(target);
		if let Some(list) = form.list_mut("files") {
			list.set_items(self.items());
		}
	}

	/// Navigates into `dir`, rewriting the path field to match.
	fn enter(&mut self, dir: &Path, form: &mut Form) {
		*self = Listing::read(dir);
		form.set_text("path", dir_text(dir));
		if let Some(list) = form.list_mut("files") {
			list.set_items(self.items());
		}
	}
}

fn dir_text(dir: &Path) -> String {
	let mut text = dir.display().to_string();
	if !text.ends_with(MAIN_SEPARATOR) {
		text.push(MAIN_SEPARATOR);
	}
	text
}

fn encoding_list(selected: Encoding) -> ListBox {
	let mut list = ListBox::new(Encoding::ALL.iter().map(|e| ListItem::new(e.name())).collect(), "");
	list.tick(selected.index());
	list.highlight_item(selected.index());
	list
}

/// Encoding ticked in the form's `encoding` list.
pub(super) fn ticked_encoding(form: &Form) -> Encoding {
	form.list("encoding")
		.and_then(ListBox::ticked)
		.and_then(|index| Encoding::ALL.get(index).copied())
		.unwrap_or_default()
}

fn file_form(path: String, listing: &Listing, encoding: Encoding) -> Form {
	Form::new()
		.label(Rect::new(0, 0, 78, 1), "Path:")
		.with("path", Rect::new(0, 1, 78, 1), Widget::Text(TextField::new(path)))
		.label(Rect::new(0, 3, 50, 1), "Files:")
		.with("files", Rect::new(0, 4, 50, 14), Widget::List(ListBox::new(listing.items(), "(empty)")))
		.label(Rect::new(52, 3, 26, 1), "Encoding:")
		.with("encoding", Rect::new(52, 4, 26, 6), Widget::List(encoding_list(encoding)))
}

impl Workspace {
	pub fn show_open(&mut self) -> Result<()> {
		let rect = self.dialog_rect(HEIGHT, WIDTH)?;
		let listing = Listing::read(&self.cwd);
		let form = file_form(dir_text(&self.cwd), &listing, self.default_encoding);
		self.install_dialog(Dialog::new("Open file", rect, form, DialogKind::Open { listing }));
		Ok(())
	}

	/// Asks where to save `buffer`. Cancelling leaves the buffer untouched.
	pub fn show_save_as(&mut self, buffer: BufferId, then: AfterSave) -> Result<()> {
		let rect = self.dialog_rect(HEIGHT, WIDTH)?;
		let target = self.pool.get_buffer_by_id(buffer).ok_or(WorkspaceError::BufferNotFound(buffer))?;
		let encoding = target.encoding();
		let (dir, path) = match target.filename() {
			Some(file) => {
				let dir = file.parent().map_or_else(|| self.cwd.clone(), Path::to_path_buf);
				(dir, file.display().to_string())
			}
			None => (self.cwd.clone(), dir_text(&self.cwd)),
		};
		let listing = Listing::read(&dir);
		let form = file_form(path, &listing, encoding);
		self.install_dialog(Dialog::new("Save as", rect, form, DialogKind::SaveAs { buffer, then, listing }));
		Ok(())
	}

	pub(super) fn confirm_file_dialog(&mut self, dialog: &mut Dialog) -> Result<Flow> {
		let encoding = ticked_encoding(&dialog.form);
		let listing = match &mut dialog.kind {
			DialogKind::Open { listing } | DialogKind::SaveAs { listing, .. } => listing,
			_ => return Ok(Flow::Stay),
		};
		let picked = if dialog.form.focused_name() == Some("files") {
			dialog.form
				.list("files")
				.and_then(ListBox::highlighted)
				.and_then(|index| listing.entries().get(index).cloned())
		} else {
			None
		};
		if let Some(entry) = &picked
			&& entry.is_dir()
		{
			listing.enter(entry, &mut dialog.form);
			return Ok(Flow::Stay);
		}

		let path = match picked {
			Some(path) => path,
			None => self.resolve(dialog.form.text("path")),
		};
		match dialog.kind {
			DialogKind::SaveAs { buffer, then, .. } => self.save_as_target(buffer, &path, encoding, then),
			_ => {
				self.open_path(&path, encoding)?;
				Ok(Flow::Close)
			}
		}
	}

	/// Saves `buffer` to `path`, asking first when a file is already there.
	pub(crate) fn save_as_target(&mut self, buffer: BufferId, path: &Path, encoding: Encoding, then: AfterSave) -> Result<Flow> {
		if path.is_dir() || path.file_name().is_none() {
			return Err(WorkspaceError::InvalidFilename(path.to_path_buf()));
		}
		if path.exists() {
			self.show_question(Question::yes_no(
				"File already exists, overwrite?",
				PendingAction::Overwrite {
					buffer,
					path: path.to_path_buf(),
					encoding,
					then,
				},
			))?;
			return Ok(Flow::Close);
		}
		self.complete_save_as(buffer, path, encoding, then)?;
		Ok(Flow::Close)
	}

	/// Writes `buffer` to `path` in `encoding`.
	///
	/// The active pane's edits are persisted first when it shows `buffer`.
	/// On failure the buffer keeps its encoding, file name and dirty flag.
	pub(crate) fn complete_save_as(&mut self, buffer: BufferId, path: &Path, encoding: Encoding, then: AfterSave) -> Result<()> {
		let (window, pool) = self.tab_and_pool();
		if window.active_pane().and_then(Pane::buffer) == Some(buffer) {
			window.persist_active(pool);
		}
		let stale = pool.get_buffer_by_filename(path).filter(|&id| id != buffer);
		let target = pool.get_buffer_mut(buffer).ok_or(WorkspaceError::BufferNotFound(buffer))?;
		let (previous, dirty) = (target.encoding(), target.is_dirty());
		target.set_encoding(encoding);
		if let Err(err) = pool.save_buffer(buffer, path) {
			if let Some(target) = pool.get_buffer_mut(buffer) {
				target.revert_encoding(previous, dirty);
			}
			return Err(err);
		}
		if let Some(saved) = pool.get_buffer_by_id(buffer).and_then(|b| b.filename()).map(Path::to_path_buf) {
			self.session.record_file(&saved);
		}
		// One buffer per file: whatever else had `path` open now shows this one.
		if let Some(stale) = stale {
			self.retire_buffer(stale, buffer);
		}
		if then == AfterSave::ClosePane {
			self.close_active();
		}
		Ok(())
	}
}
