//! Questions and alerts.
//!
//! A [`Question`] is an ordinary dialog whose answer runs a typed
//! [`PendingAction`]. An [`Alert`] is a one-slot layer drawn above
//! everything else; it holds no state besides its message.

use std::path::PathBuf;

use tessel_keymap::LogicalKey;
use tessel_primitives::{BufferId, Encoding, Key, KeyCode};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use super::{AfterSave, Dialog, DialogKind, Flow, Form};
use crate::buffer::NewBuffer;
use crate::workspace::Workspace;
use crate::Result;

/// What to do once a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
	/// Yes: show `buffer` in a new tab. No: bind it into the active pane.
	ShowBuffer { buffer: BufferId },
	/// Yes: create `path` as a new buffer.
	CreateFile { path: PathBuf, encoding: Encoding },
	/// Save, discard or keep the untitled buffer of the pane being closed.
	CloseUntitled { buffer: BufferId },
	/// Save all, discard all or keep working.
	QuitUnsaved,
	/// Yes: replace the file at `path` with `buffer`.
	Overwrite {
		buffer: BufferId,
		path: PathBuf,
		encoding: Encoding,
		then: AfterSave,
	},
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
	pub message: String,
	pub choices: Vec<&'static str>,
	pub selected: usize,
	/// Answer given by close-window.
	pub cancel: usize,
	pub action: PendingAction,
}

impl Question {
	pub fn new(message: impl Into<String>, choices: Vec<&'static str>, cancel: usize, action: PendingAction) -> Self {
		Self {
			message: message.into(),
			choices,
			selected: 0,
			cancel,
			action,
		}
	}

	pub fn yes_no(message: impl Into<String>, action: PendingAction) -> Self {
		Self::new(message, vec!["Yes", "No"], 1, action)
	}

	fn cycle(&mut self, forward: bool) {
		let len = self.choices.len().max(1);
		self.selected = if forward { (self.selected + 1) % len } else { (self.selected + len - 1) % len };
	}

	/// Choice whose first letter is `ch`, ignoring case.
	fn shortcut(&self, ch: char) -> Option<usize> {
		self.choices
			.iter()
			.position(|choice| choice.chars().next().is_some_and(|first| first.eq_ignore_ascii_case(&ch)))
	}
}

/// A non-fatal message shown above any dialog until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
	pub message: String,
}

impl Alert {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}

	/// `(width, height)` including the border.
	pub fn size(&self) -> (u16, u16) {
		(text_width(&self.message).saturating_add(6).max(30), 5)
	}
}

fn text_width(text: &str) -> u16 {
	u16::try_from(text.width()).unwrap_or(u16::MAX)
}

impl Workspace {
	pub(crate) fn show_question(&mut self, question: Question) -> Result<()> {
		let width = text_width(&question.message).saturating_add(6).max(40);
		let rect = self.dialog_rect(7, width)?;
		self.install_dialog(Dialog::new("Question", rect, Form::new(), DialogKind::Question(question)));
		Ok(())
	}

	pub(super) fn question_key(&mut self, question: &mut Question, key: Key) -> Flow {
		let answer = if self.keys.is(key, LogicalKey::FinalizeChoice) {
			Some(question.selected)
		} else if self.keys.is(key, LogicalKey::CloseWindow) {
			Some(question.cancel)
		} else if key.code == KeyCode::Left || self.keys.is(key, LogicalKey::PreviousField) {
			question.cycle(false);
			None
		} else if key.code == KeyCode::Right || self.keys.is(key, LogicalKey::NextField) {
			question.cycle(true);
			None
		} else {
			key.printable().and_then(|ch| question.shortcut(ch))
		};
		let Some(choice) = answer else {
			return Flow::Stay;
		};
		debug!(question = %question.message, answer = question.choices.get(choice).copied().unwrap_or(""), "question answered");
		if let Err(err) = self.answer(question.action.clone(), choice) {
			self.report(err);
		}
		Flow::Close
	}

	fn answer(&mut self, action: PendingAction, choice: usize) -> Result<()> {
		match (action, choice) {
			(PendingAction::ShowBuffer { buffer }, 0) => self.open_tab(buffer),
			(PendingAction::ShowBuffer { buffer }, _) => self.bind_here(buffer),
			(PendingAction::CreateFile { path, encoding }, 0) => {
				self.ensure_target()?;
				let Some(id) = self.pool.create_buffer(NewBuffer::file(&path).with_encoding(encoding))? else {
					return Ok(());
				};
				self.session.record_file(&path);
				self.present_buffer(id)
			}
			(PendingAction::CloseUntitled { buffer }, 0) => self.show_save_as(buffer, AfterSave::ClosePane),
			(PendingAction::CloseUntitled { buffer }, 1) => {
				self.close_active();
				self.discard_if_orphan(buffer);
				Ok(())
			}
			(PendingAction::QuitUnsaved, 0) => {
				self.save_all_and_quit();
				Ok(())
			}
			(PendingAction::QuitUnsaved, 1) => {
				self.quit();
				Ok(())
			}
			(PendingAction::Overwrite { buffer, path, encoding, then }, 0) => self.complete_save_as(buffer, &path, encoding, then),
			_ => Ok(()),
		}
	}
}
