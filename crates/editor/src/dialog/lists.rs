//! List-driven dialogs: recent files, active files, active tabs, project
//! explorer and layout switching.
//!
//! Search fields filter their lists by case-insensitive substring, keeping
//! the original order (see [`super::filter_matches`]).

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tessel_primitives::{BufferId, Rect};
use tracing::{debug, warn};

use super::{Dialog, DialogKind, Flow, Form, ListBox, ListItem, TextField, Widget};
use crate::layout::LayoutKind;
use crate::workspace::{AppMode, Workspace};
use crate::{Result, WorkspaceError};

fn search_field() -> Widget {
	Widget::Text(TextField::new(""))
}

fn path_items(paths: &[PathBuf]) -> Vec<ListItem> {
	paths.iter().map(|path| ListItem::new(path.display().to_string())).collect()
}

/// Files and directories under `root`, honouring ignore files, in path
/// order. Hidden entries are skipped.
pub(crate) fn project_entries(root: &Path) -> Vec<PathBuf> {
	let mut entries = Vec::new();
	for result in WalkBuilder::new(root).sort_by_file_path(Path::cmp).build() {
		match result {
			Ok(entry) if entry.depth() > 0 => {
				if let Ok(relative) = entry.path().strip_prefix(root) {
					entries.push(relative.to_path_buf());
				}
			}
			Ok(_) => {}
			Err(error) => warn!(root = %root.display(), %error, "project walk error"),
		}
	}
	entries
}

impl Workspace {
	pub fn show_recent_files(&mut self) -> Result<()> {
		let rect = self.dialog_rect(20, 80)?;
		if self.session.is_empty() {
			return Err(WorkspaceError::NoRecentFiles);
		}
		let files = self.session.recent_files();
		let projects = self.session.recent_projects();
		let form = Form::new()
			.label(Rect::new(0, 0, 78, 1), "Search:")
			.with("search", Rect::new(0, 1, 78, 1), search_field())
			.label(Rect::new(0, 3, 38, 1), "Files:")
			.with("files", Rect::new(0, 4, 38, 14), Widget::List(ListBox::new(path_items(&files), "(no files)")))
			.label(Rect::new(40, 3, 38, 1), "Projects:")
			.with("projects", Rect::new(40, 4, 38, 14), Widget::List(ListBox::new(path_items(&projects), "(no projects)")));
		self.install_dialog(Dialog::new("Recent files", rect, form, DialogKind::RecentFiles { files, projects }));
		Ok(())
	}

	pub(super) fn confirm_recent(&mut self, form: &Form, files: &[PathBuf], projects: &[PathBuf]) -> Result<Flow> {
		let (list, paths) = match form.focused_name() {
			Some("projects") => ("projects", projects),
			_ => ("files", files),
		};
		let Some(path) = form.list(list).and_then(ListBox::highlighted).and_then(|index| paths.get(index)) else {
			self.ring();
			return Ok(Flow::Stay);
		};
		if !path.exists() {
			return Err(WorkspaceError::NotFound(path.clone()));
		}
		let encoding = self.default_encoding;
		self.open_path(path, encoding)?;
		Ok(Flow::Close)
	}

	pub fn show_active_files(&mut self) -> Result<()> {
		let rect = self.dialog_rect(14, 60)?;
		let ids = self.pool.buffer_ids();
		let items = ids
			.iter()
			.filter_map(|&id| self.pool.get_buffer_by_id(id))
			.map(|buffer| {
				let marker = if buffer.is_dirty() { "*" } else { " " };
				let location = buffer.filename().map(|p| p.display().to_string()).unwrap_or_default();
				ListItem::new(format!("{marker} {}  {location}", buffer.name()))
			})
			.collect();
		let form = Form::new()
			.label(Rect::new(0, 0, 58, 1), "Search:")
			.with("search", Rect::new(0, 1, 58, 1), search_field())
			.with("buffers", Rect::new(0, 3, 58, 9), Widget::List(ListBox::new(items, "(no buffers)")));
		self.install_dialog(Dialog::new("Active files", rect, form, DialogKind::ActiveFiles { ids }));
		Ok(())
	}

	pub(super) fn confirm_active_file(&mut self, form: &Form, ids: &[BufferId]) -> Result<Flow> {
		let Some(&id) = form.list("buffers").and_then(ListBox::highlighted).and_then(|index| ids.get(index)) else {
			self.ring();
			return Ok(Flow::Stay);
		};
		self.present_buffer(id)?;
		Ok(Flow::Close)
	}

	/// Lists the open tabs; moving the highlight, directly or by searching,
	/// switches to that tab until the dialog is cancelled.
	pub fn show_active_tabs(&mut self) -> Result<()> {
		let rect = self.dialog_rect(12, 40)?;
		let items = self
			.windows
			.iter()
			.map(|window| ListItem::new(format!("{} ({} panes)", window.name(), window.pane_count())))
			.collect();
		let mut tabs = ListBox::new(items, "");
		tabs.highlight_item(self.active_window);
		let form = Form::new()
			.label(Rect::new(0, 0, 38, 1), "Search:")
			.with("search", Rect::new(0, 1, 38, 1), search_field())
			.with("tabs", Rect::new(0, 3, 38, 7), Widget::List(tabs));
		let origin = self.active_window;
		self.install_dialog(Dialog::new("Active tabs", rect, form, DialogKind::ActiveTabs { origin }));
		Ok(())
	}

	pub(super) fn confirm_active_tab(&mut self, form: &Form) -> Flow {
		let Some(index) = form.list("tabs").and_then(ListBox::highlighted) else {
			self.ring();
			return Flow::Stay;
		};
		self.select_tab(index);
		Flow::Close
	}

	pub fn show_project_explorer(&mut self) -> Result<()> {
		let rect = self.dialog_rect(20, 80)?;
		let AppMode::Project { root } = &self.mode else {
			return Err(WorkspaceError::NoProject);
		};
		let root = root.clone();
		let entries = project_entries(&root);
		let items = entries
			.iter()
			.map(|relative| {
				let label = relative.display().to_string();
				if root.join(relative).is_dir() { ListItem::heading(format!("{label}/")) } else { ListItem::new(label) }
			})
			.collect();
		debug!(root = %root.display(), entries = entries.len(), "project listed");
		let form = Form::new()
			.label(Rect::new(0, 0, 78, 1), "Search:")
			.with("search", Rect::new(0, 1, 78, 1), search_field())
			.with("files", Rect::new(0, 3, 78, 15), Widget::List(ListBox::new(items, "(empty project)")));
		let title = format!("Project: {}", root.display());
		self.install_dialog(Dialog::new(title, rect, form, DialogKind::ProjectExplorer { root, entries }));
		Ok(())
	}

	pub(super) fn confirm_explorer(&mut self, form: &Form, root: &Path, entries: &[PathBuf]) -> Result<Flow> {
		let Some(relative) = form.list("files").and_then(ListBox::highlighted).and_then(|index| entries.get(index)) else {
			self.ring();
			return Ok(Flow::Stay);
		};
		let encoding = self.default_encoding;
		self.open_path(&root.join(relative), encoding)?;
		Ok(Flow::Close)
	}

	pub fn show_switch_layout(&mut self) -> Result<()> {
		let rect = self.dialog_rect(9, 40)?;
		let current = self.active_window().layout();
		let items = LayoutKind::ALL.iter().map(|kind| ListItem::new(kind.label())).collect();
		let mut layouts = ListBox::new(items, "");
		let index = LayoutKind::ALL.iter().position(|&kind| kind == current).unwrap_or(0);
		layouts.tick(index);
		layouts.highlight_item(index);
		let form = Form::new().with("layouts", Rect::new(0, 0, 38, 7), Widget::List(layouts));
		self.install_dialog(Dialog::new("Switch layout", rect, form, DialogKind::SwitchLayout));
		Ok(())
	}

	pub(super) fn confirm_switch_layout(&mut self, form: &Form) -> Result<Flow> {
		let Some(&kind) = form.list("layouts").and_then(ListBox::highlighted).and_then(|index| LayoutKind::ALL.get(index)) else {
			return Ok(Flow::Stay);
		};
		self.set_layout(kind)?;
		Ok(Flow::Close)
	}
}
