//! Getting buffers in front of the user: opening paths, choosing between
//! the active pane and a new tab, and dropping buffers nobody shows.

use std::fs;
use std::path::Path;

use tessel_primitives::{BufferId, Encoding};
use tracing::debug;

use super::{AppMode, Workspace};
use crate::buffer::NewBuffer;
use crate::dialog::{PendingAction, Question};
use crate::layout::{self, LayoutKind};
use crate::pane::Pane;
use crate::window::Window;
use crate::{Result, WorkspaceError};

const NEW_TAB_QUESTION: &str = "Open file/buffer in new tab?";

impl Workspace {
	/// Buffer bound to the active pane.
	pub(crate) fn active_buffer(&self) -> Option<BufferId> {
		self.active_window().active_pane().and_then(Pane::buffer)
	}

	/// Fails unless a buffer could be shown right now: either the new-tab
	/// question fits on screen or the active tab has a free slot. Checked
	/// before any buffer is created.
	pub(crate) fn ensure_target(&self) -> Result<()> {
		let window = self.active_window();
		if window.active_pane().is_some() {
			let width = u16::try_from(NEW_TAB_QUESTION.len() + 6).unwrap_or(u16::MAX).max(40);
			self.dialog_rect(7, width).map(|_| ())
		} else if window.first_free_slot().is_some() {
			Ok(())
		} else {
			Err(WorkspaceError::NoFreePane)
		}
	}

	/// Shows `buffer`: with a pane active the user picks between a new tab
	/// and the active pane, otherwise it lands in the first free slot.
	pub(crate) fn present_buffer(&mut self, buffer: BufferId) -> Result<()> {
		self.offer_buffer(buffer, NEW_TAB_QUESTION)
	}

	pub(crate) fn offer_buffer(&mut self, buffer: BufferId, question: &str) -> Result<()> {
		if self.active_window().active_pane().is_some() {
			return self.show_question(Question::yes_no(question, PendingAction::ShowBuffer { buffer }));
		}
		let (window, pool) = self.tab_and_pool();
		window.place(buffer, pool)?;
		Ok(())
	}

	/// Binds `buffer` into the active pane, or the first free slot.
	pub(crate) fn bind_here(&mut self, buffer: BufferId) -> Result<()> {
		let (window, pool) = self.tab_and_pool();
		if window.active_pane().is_some() {
			window.bind_active(buffer, pool)?;
		} else {
			window.place(buffer, pool)?;
		}
		self.prune_orphans();
		Ok(())
	}

	/// Appends a single-pane tab showing `buffer` and switches to it.
	pub(crate) fn open_tab(&mut self, buffer: BufferId) -> Result<()> {
		let area = layout::workspace_area(self.size.0, self.size.1);
		let name = format!("Tab {}", self.tabs_opened + 1);
		let mut window = Window::new(name, LayoutKind::Single, area, self.defaults.clone());
		window.place(buffer, self.pool.as_mut())?;
		let (current, pool) = self.tab_and_pool();
		current.persist_active(pool);
		self.tabs_opened += 1;
		self.windows.push(window);
		self.active_window = self.windows.len() - 1;
		debug!(tab = self.active_window, %buffer, "tab opened");
		Ok(())
	}

	/// Switches to tab `index`, reloading its active pane.
	pub(crate) fn select_tab(&mut self, index: usize) {
		if index >= self.windows.len() || index == self.active_window {
			return;
		}
		let (current, pool) = self.tab_and_pool();
		current.persist_active(pool);
		self.active_window = index;
		let (next, pool) = self.tab_and_pool();
		next.reload_active(pool);
		debug!(tab = index, "tab selected");
	}

	/// Moves `step` tabs forward or back, wrapping around.
	pub(crate) fn cycle_tab(&mut self, step: isize) {
		let len = self.windows.len() as isize;
		let index = (self.active_window as isize + step).rem_euclid(len);
		self.select_tab(index as usize);
	}

	/// Opens `path`: a directory becomes the project, a file is shown
	/// (reusing its buffer when already open), a missing file is offered for
	/// creation.
	pub(crate) fn open_path(&mut self, path: &Path, encoding: Encoding) -> Result<()> {
		let path = self.resolve(path);
		if path.is_dir() {
			self.open_project(&path);
			return Ok(());
		}
		if path.is_file() {
			if self.pool.is_binary(&path, encoding) {
				return Err(WorkspaceError::BinaryFile(path));
			}
			let id = match self.pool.get_buffer_by_filename(&path) {
				Some(id) => id,
				None => {
					self.ensure_target()?;
					let backup = self.pool.backup_exists(&path);
					let request = NewBuffer::file(&path).with_encoding(encoding).with_backup(backup);
					let Some(id) = self.pool.create_buffer(request)? else {
						debug!(path = %path.display(), "buffer creation cancelled");
						return Ok(());
					};
					id
				}
			};
			self.record_buffer(id);
			return self.present_buffer(id);
		}
		if !path.parent().is_some_and(Path::is_dir) {
			return Err(WorkspaceError::NotFound(path));
		}
		self.show_question(Question::yes_no(
			"The selected file does not exist, create?",
			PendingAction::CreateFile { path, encoding },
		))
	}

	/// Creates a buffer for a file that is not on disk yet and shows it.
	pub(crate) fn create_file(&mut self, path: &Path, encoding: Encoding) -> Result<()> {
		if !path.parent().is_some_and(Path::is_dir) {
			return Err(WorkspaceError::NotFound(path.to_path_buf()));
		}
		self.ensure_target()?;
		let Some(id) = self.pool.create_buffer(NewBuffer::file(path).with_encoding(encoding))? else {
			return Ok(());
		};
		self.record_buffer(id);
		self.present_buffer(id)
	}

	/// Switches to project mode rooted at `root`.
	pub(crate) fn open_project(&mut self, root: &Path) {
		let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
		self.session.record_project(&root);
		self.cwd = root.clone();
		debug!(root = %root.display(), "project opened");
		self.mode = AppMode::Project { root };
	}

	fn record_buffer(&mut self, id: BufferId) {
		if let Some(path) = self.pool.get_buffer_by_id(id).and_then(|b| b.filename()) {
			let path = path.to_path_buf();
			self.session.record_file(&path);
		}
	}

	/// Whether any pane in any tab shows `buffer`.
	pub(crate) fn is_shown(&self, buffer: BufferId) -> bool {
		self.windows
			.iter()
			.flat_map(Window::panes)
			.any(|pane| pane.buffer() == Some(buffer))
	}

	pub(crate) fn discard_if_orphan(&mut self, buffer: BufferId) {
		if !self.is_shown(buffer) {
			self.pool.discard_buffer(buffer);
		}
	}

	/// Replaces `stale` with `replacement` everywhere it is shown, then
	/// drops it from the pool.
	pub(crate) fn retire_buffer(&mut self, stale: BufferId, replacement: BufferId) {
		if stale == replacement {
			return;
		}
		if let Some(target) = self.pool.get_buffer_by_id(replacement) {
			for window in &mut self.windows {
				window.rebind(stale, target);
			}
		}
		self.pool.discard_buffer(stale);
		debug!(%stale, %replacement, "buffer retired");
	}

	/// Drops empty untitled buffers that no pane shows any more.
	pub(crate) fn prune_orphans(&mut self) {
		let orphans: Vec<BufferId> = self
			.pool
			.buffer_ids()
			.into_iter()
			.filter(|&id| {
				self.pool
					.get_buffer_by_id(id)
					.is_some_and(|b| b.is_untitled() && b.is_empty() && !b.is_dirty())
			})
			.filter(|&id| !self.is_shown(id))
			.collect();
		for id in orphans {
			self.pool.discard_buffer(id);
		}
	}
}
