//! Command-input language.

use std::path::PathBuf;

use crate::layout::LayoutKind;
use crate::{Result, WorkspaceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	New,
	Open(PathBuf),
	Save,
	SaveAs(PathBuf),
	SaveAll,
	GoTo(String),
	Layout(LayoutKind),
	/// 1-based pane number.
	Pane(usize),
	/// 1-based tab number.
	Tab(usize),
	Close,
	Quit,
	ForceQuit,
}

impl Command {
	/// Usage line and summary for every command, as shown by the help dialog.
	pub const USAGE: [(&'static str, &'static str); 12] = [
		("new", "create an untitled buffer"),
		("open <path>", "open a file or project directory"),
		("save", "save the active buffer"),
		("saveas <path>", "save the active buffer under a new name"),
		("saveall", "save every buffer that has a file name"),
		("goto <row[.col]>", "move the cursor"),
		("layout <name>", "switch the tab's layout"),
		("pane <n>", "activate pane n"),
		("tab <n>", "switch to tab n"),
		("close", "close the active pane"),
		("quit", "quit, asking about unsaved buffers"),
		("forcequit", "quit discarding everything"),
	];
}

fn number(arg: &str, input: &str) -> Result<usize> {
	arg.parse::<usize>()
		.ok()
		.filter(|&n| n >= 1)
		.ok_or_else(|| WorkspaceError::UnknownCommand(input.to_string()))
}

/// Parses one command line. Names are case-insensitive; the argument is the
/// rest of the line with surrounding whitespace removed.
pub fn parse_command(input: &str) -> Result<Command> {
	let input = input.trim();
	let (name, arg) = match input.split_once(char::is_whitespace) {
		Some((name, arg)) => (name, arg.trim()),
		None => (input, ""),
	};
	let unknown = || WorkspaceError::UnknownCommand(input.to_string());
	let command = match (name.to_ascii_lowercase().as_str(), arg.is_empty()) {
		("new", true) => Command::New,
		("open", false) => Command::Open(PathBuf::from(arg)),
		("save", true) => Command::Save,
		("saveas", false) => Command::SaveAs(PathBuf::from(arg)),
		("saveall", true) => Command::SaveAll,
		("goto", false) => Command::GoTo(arg.to_string()),
		("layout", false) => Command::Layout(arg.parse().map_err(|_| unknown())?),
		("pane", false) => Command::Pane(number(arg, input)?),
		("tab", false) => Command::Tab(number(arg, input)?),
		("close", true) => Command::Close,
		("quit", true) => Command::Quit,
		("forcequit", true) => Command::ForceQuit,
		_ => return Err(unknown()),
	};
	Ok(command)
}
