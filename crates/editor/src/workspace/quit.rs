//! The close/quit protocol.
//!
//! `quit` closes the active pane according to its save state. Once no pane
//! is active it closes an empty tab, refuses while panes remain, or asks
//! about unsaved buffers before quitting.

use tracing::{debug, info, warn};

use super::{AppMode, Workspace};
use crate::dialog::{PendingAction, Question};
use crate::window::{PaneState, Window, pane_state};
use crate::{Result, WorkspaceError};

impl Workspace {
	/// Closes the active pane, or quits when nothing is left to close.
	pub fn request_close(&mut self) -> Result<()> {
		let (window, pool) = self.tab_and_pool();
		window.persist_active(pool);
		let Some(pane) = window.active_pane() else {
			return self.close_without_pane();
		};
		let state = pane_state(pane, pool);
		let (buffer, blank) = (pane.buffer(), pane.is_blank());

		let total: usize = self.windows.iter().map(Window::pane_count).sum();
		if total <= 1 && self.mode == AppMode::File && self.pool.unsaved_count() == 0 {
			debug!("last pane closed with nothing unsaved");
			self.quit();
			return Ok(());
		}

		match (state, buffer) {
			(PaneState::UnsavedNoFile, Some(buffer)) if !blank => self.show_question(Question::new(
				"Save changes to the untitled buffer?",
				vec!["Save", "Discard", "Cancel"],
				2,
				PendingAction::CloseUntitled { buffer },
			)),
			(PaneState::UnsavedNoFile, Some(buffer)) => {
				self.close_active();
				self.discard_if_orphan(buffer);
				Ok(())
			}
			_ => {
				self.close_active();
				Ok(())
			}
		}
	}

	fn close_without_pane(&mut self) -> Result<()> {
		if self.active_window().pane_count() > 0 {
			return Err(WorkspaceError::OtherPanesOpen);
		}
		if self.windows.len() > 1 {
			let closed = self.windows.remove(self.active_window);
			debug!(tab = closed.name(), "empty tab closed");
			self.active_window = self.active_window.min(self.windows.len() - 1);
			let (window, pool) = self.tab_and_pool();
			window.reload_active(pool);
			return Ok(());
		}
		self.quit_application()
	}

	/// Closes the active pane without asking, then drops orphaned buffers.
	pub(crate) fn close_active(&mut self) {
		let (window, pool) = self.tab_and_pool();
		if let Some(pane) = window.close_active_pane(pool) {
			debug!(slot = pane.slot(), buffer = ?pane.buffer(), "pane closed");
		}
		self.prune_orphans();
	}

	/// Quits, first asking what to do with unsaved buffers.
	pub fn quit_application(&mut self) -> Result<()> {
		for window in &mut self.windows {
			window.persist_all(self.pool.as_mut());
		}
		if self.pool.unsaved_count() == 0 {
			self.quit();
			return Ok(());
		}
		self.show_question(Question::new(
			"There are unsaved buffers. Save them before quitting?",
			vec!["Save all", "Discard all", "Cancel"],
			2,
			PendingAction::QuitUnsaved,
		))
	}

	/// Writes every buffer that has somewhere to go, then quits. Buffers
	/// that could not be written are lost.
	pub(crate) fn save_all_and_quit(&mut self) {
		if let Err(error) = self.save_all() {
			warn!(%error, "quitting with unsaved buffers");
		}
		self.quit();
	}

	pub(crate) fn quit(&mut self) {
		info!("quitting");
		self.quit = true;
	}

	/// Quits immediately, discarding unsaved work and the session store.
	pub fn force_quit(&mut self) {
		info!("force quit");
		self.session.destroy();
		self.quit = true;
	}
}
