//! Logical key actions and their default bindings.

use std::fmt;
use std::str::FromStr;

macro_rules! logical_keys {
	($($variant:ident => $name:literal, [$($key:literal),*], $desc:literal;)*) => {
		/// A named action that one or more physical keys can trigger.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum LogicalKey {
			$(
				#[doc = $desc]
				$variant,
			)*
		}

		impl LogicalKey {
			/// Every logical key, in help-listing order.
			pub const ALL: &'static [LogicalKey] = &[$(LogicalKey::$variant),*];

			/// Kebab-case name used in configuration files.
			pub const fn name(self) -> &'static str {
				match self {
					$(LogicalKey::$variant => $name,)*
				}
			}

			pub const fn description(self) -> &'static str {
				match self {
					$(LogicalKey::$variant => $desc,)*
				}
			}

			/// Built-in key patterns, parsed by [`crate::parse`].
			pub const fn default_keys(self) -> &'static [&'static str] {
				match self {
					$(LogicalKey::$variant => &[$($key),*],)*
				}
			}
		}

		impl FromStr for LogicalKey {
			type Err = ();

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($name => Ok(LogicalKey::$variant),)*
					_ => Err(()),
				}
			}
		}
	};
}

logical_keys! {
	CloseWindow => "close-window", ["esc"], "Close the active dialog";
	SaveAndCloseWindow => "save-and-close-window", ["ctrl-s"], "Confirm and close the active dialog";
	FinalizeChoice => "finalize-choice", ["enter"], "Confirm the current choice";
	ListMakeSelection => "list-make-selection", ["space"], "Select the highlighted list item";
	NextField => "next-field", ["tab"], "Move focus to the next field";
	PreviousField => "previous-field", ["shift-tab"], "Move focus to the previous field";
	FileNew => "file-new", ["ctrl-n"], "Create a new buffer";
	FileOpen => "file-open", ["ctrl-o"], "Open a file or project";
	Save => "save", ["ctrl-s"], "Save the active buffer";
	SaveAs => "save-as", ["f12"], "Save the active buffer under a new name";
	SaveAll => "save-all", ["alt-s"], "Save every modified buffer";
	ShowRecentFiles => "show-recent-files", ["ctrl-r"], "Show recently opened files and projects";
	ActiveFiles => "active-files", ["ctrl-b"], "Show open buffers";
	ShowActiveTabs => "show-active-tabs", ["ctrl-t"], "Show open tabs";
	ShowProjectExplorer => "show-project-explorer", ["ctrl-e"], "Browse files in the current project";
	GoToLine => "go-to-line", ["ctrl-g"], "Jump to a line number";
	Find => "find", ["ctrl-f"], "Find text";
	FindReplace => "find-replace", ["ctrl-h"], "Find and replace text";
	Preferences => "preferences", ["f4"], "Edit preferences of the active pane";
	SwitchLayout => "switch-layout", ["ctrl-l"], "Change the layout of the active tab";
	CommandInput => "command-input", ["f2"], "Enter a command";
	ShowHelp => "show-help", ["f1"], "Show key bindings";
	NextTab => "next-tab", ["alt-right"], "Switch to the next tab";
	PrevTab => "prev-tab", ["alt-left"], "Switch to the previous tab";
	ActivatePane1 => "activate-pane-1", ["alt-1"], "Focus pane 1";
	ActivatePane2 => "activate-pane-2", ["alt-2"], "Focus pane 2";
	ActivatePane3 => "activate-pane-3", ["alt-3"], "Focus pane 3";
	ActivatePane4 => "activate-pane-4", ["alt-4"], "Focus pane 4";
	ActivatePane5 => "activate-pane-5", ["alt-5"], "Focus pane 5";
	ActivatePane6 => "activate-pane-6", ["alt-6"], "Focus pane 6";
	Quit => "quit", ["ctrl-q"], "Close the active pane or quit";
	ForceQuit => "force-quit", ["alt-q"], "Quit without saving";
}

impl LogicalKey {
	/// Pane index targeted by the `activate-pane-N` actions.
	pub const fn pane_index(self) -> Option<usize> {
		match self {
			Self::ActivatePane1 => Some(0),
			Self::ActivatePane2 => Some(1),
			Self::ActivatePane3 => Some(2),
			Self::ActivatePane4 => Some(3),
			Self::ActivatePane5 => Some(4),
			Self::ActivatePane6 => Some(5),
			_ => None,
		}
	}

	/// Whether the action is only meaningful inside a dialog.
	pub const fn is_dialog_key(self) -> bool {
		matches!(
			self,
			Self::CloseWindow
				| Self::SaveAndCloseWindow
				| Self::FinalizeChoice
				| Self::ListMakeSelection
				| Self::NextField
				| Self::PreviousField
		)
	}
}

impl fmt::Display for LogicalKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
