//! Global actions: what the workspace does for each logical key.

use tessel_keymap::LogicalKey;
use tracing::debug;

use super::Workspace;
use crate::buffer::NewBuffer;
use crate::dialog::AfterSave;
use crate::layout::LayoutKind;
use crate::{Result, WorkspaceError};

impl Workspace {
	pub(crate) fn run_action(&mut self, action: LogicalKey) -> Result<()> {
		if let Some(index) = action.pane_index() {
			return self.activate_pane(index);
		}
		match action {
			LogicalKey::FileNew => self.file_new(),
			LogicalKey::FileOpen => self.show_open(),
			LogicalKey::Save => self.save_active(),
			LogicalKey::SaveAs => {
				let buffer = self.active_buffer().ok_or(WorkspaceError::NoActivePane)?;
				self.show_save_as(buffer, AfterSave::Nothing)
			}
			LogicalKey::SaveAll => self.save_all(),
			LogicalKey::ShowRecentFiles => self.show_recent_files(),
			LogicalKey::ActiveFiles => self.show_active_files(),
			LogicalKey::ShowActiveTabs => self.show_active_tabs(),
			LogicalKey::ShowProjectExplorer => self.show_project_explorer(),
			LogicalKey::GoToLine => self.show_go_to_line(),
			LogicalKey::Find => self.show_find(false),
			LogicalKey::FindReplace => self.show_find(true),
			LogicalKey::Preferences => self.show_preferences(),
			LogicalKey::SwitchLayout => self.show_switch_layout(),
			LogicalKey::CommandInput => self.show_command_input(),
			LogicalKey::ShowHelp => self.show_help(),
			LogicalKey::NextTab => {
				self.cycle_tab(1);
				Ok(())
			}
			LogicalKey::PrevTab => {
				self.cycle_tab(-1);
				Ok(())
			}
			LogicalKey::Quit => self.request_close(),
			LogicalKey::ForceQuit => {
				self.force_quit();
				Ok(())
			}
			_ => Ok(()),
		}
	}

	/// Focuses pane `index` of the active tab.
	pub fn activate_pane(&mut self, index: usize) -> Result<()> {
		let (window, pool) = self.tab_and_pool();
		window.activate_pane(index, pool)
	}

	/// Switches the active tab to `kind`, dropping panes it cannot show.
	pub fn set_layout(&mut self, kind: LayoutKind) -> Result<()> {
		let (window, pool) = self.tab_and_pool();
		window.set_layout(kind, pool)?;
		self.prune_orphans();
		Ok(())
	}

	/// Creates an untitled buffer for the active pane or a new tab.
	pub fn file_new(&mut self) -> Result<()> {
		self.ensure_target()?;
		let request = NewBuffer::untitled().with_encoding(self.default_encoding);
		let Some(buffer) = self.pool.create_buffer(request)? else {
			return Ok(());
		};
		self.offer_buffer(buffer, "Create buffer in new tab?")
	}

	/// Saves the active pane's buffer to its file, or asks for a name.
	pub fn save_active(&mut self) -> Result<()> {
		let (window, pool) = self.tab_and_pool();
		let buffer = window.active_pane().and_then(|p| p.buffer()).ok_or(WorkspaceError::NoActivePane)?;
		let Some(path) = pool.get_buffer_by_id(buffer).and_then(|b| b.filename()).map(|p| p.to_path_buf()) else {
			return self.show_save_as(buffer, AfterSave::Nothing);
		};
		window.persist_active(pool);
		pool.save_buffer(buffer, &path)?;
		self.session.record_file(&path);
		Ok(())
	}

	/// Writes every buffer that has a file name.
	pub fn save_all(&mut self) -> Result<()> {
		for window in &mut self.windows {
			window.persist_all(self.pool.as_mut());
		}
		let failed = self.pool.write_all_wherever_possible();
		debug!(failed, "save all");
		if failed > 0 {
			return Err(WorkspaceError::NotSaved(failed));
		}
		Ok(())
	}
}
