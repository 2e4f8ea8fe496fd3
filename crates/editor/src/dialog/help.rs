//! Help and command-input dialogs.

use tessel_primitives::Rect;
use tracing::debug;

use super::{Command, Dialog, DialogKind, Flow, Form, ListBox, ListItem, TextField, Widget, parse_command};
use crate::dialog::AfterSave;
use crate::workspace::Workspace;
use crate::{Result, WorkspaceError};

impl Workspace {
	pub fn show_help(&mut self) -> Result<()> {
		let rect = self.dialog_rect(20, 80)?;
		let mut items = vec![ListItem::heading("Key bindings")];
		items.extend(
			self.keys
				.list()
				.into_iter()
				.map(|(logical, keys, description)| ListItem::new(format!("{:<24}{keys:<16}{description}", logical.name()))),
		);
		items.push(ListItem::heading("Commands"));
		items.extend(Command::USAGE.iter().map(|(usage, summary)| ListItem::new(format!("{usage:<24}{summary}"))));
		let form = Form::new().with("bindings", Rect::new(0, 0, 78, 18), Widget::List(ListBox::new(items, "")));
		self.install_dialog(Dialog::new("Help", rect, form, DialogKind::Help));
		Ok(())
	}

	pub fn show_command_input(&mut self) -> Result<()> {
		let rect = self.dialog_rect(5, 60)?;
		let form = Form::new()
			.label(Rect::new(0, 0, 58, 1), "Command:")
			.with("command", Rect::new(0, 1, 58, 1), Widget::Text(TextField::new("")));
		self.install_dialog(Dialog::new("Command", rect, form, DialogKind::Command));
		Ok(())
	}

	pub(super) fn confirm_command(&mut self, input: &str) -> Result<Flow> {
		let command = parse_command(input)?;
		debug!(?command, "command");
		self.run_command(command)
	}

	/// Runs `command` as if its dialog or key had been used.
	pub(crate) fn run_command(&mut self, command: Command) -> Result<Flow> {
		match command {
			Command::New => self.file_new()?,
			Command::Open(path) => {
				let path = self.resolve(&path);
				let encoding = self.default_encoding;
				self.open_path(&path, encoding)?;
			}
			Command::Save => self.save_active()?,
			Command::SaveAs(path) => {
				let buffer = self.active_buffer().ok_or(WorkspaceError::NoActivePane)?;
				let path = self.resolve(&path);
				let encoding = self.pool.get_buffer_by_id(buffer).map(|b| b.encoding()).unwrap_or(self.default_encoding);
				return self.save_as_target(buffer, &path, encoding, AfterSave::Nothing);
			}
			Command::SaveAll => self.save_all()?,
			Command::GoTo(target) => return self.go_to(&target),
			Command::Layout(kind) => self.set_layout(kind)?,
			Command::Pane(n) => self.activate_pane(n - 1)?,
			Command::Tab(n) => {
				if n > self.windows.len() {
					return Err(WorkspaceError::TabNotAvailable(n - 1));
				}
				self.select_tab(n - 1);
			}
			Command::Close => self.request_close()?,
			Command::Quit => self.quit_application()?,
			Command::ForceQuit => self.force_quit(),
		}
		Ok(Flow::Close)
	}
}
