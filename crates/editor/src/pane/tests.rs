use ropey::Rope;
use tessel_primitives::{BufferId, Encoding, Key, KeyCode, Modifiers, Rect};

use super::*;
use crate::buffer::Buffer;

fn pane_with(text: &str) -> Pane {
	let mut buffer = Buffer::new(BufferId(1), None, Rope::from_str(text), Encoding::Utf8, 1);
	let mut pane = Pane::new(0, PanePrefs::default());
	pane.set_area(Rect::new(0, 1, 40, 10));
	pane.load_from(&buffer);
	pane.persist_into(&mut buffer);
	pane
}

fn press(pane: &mut Pane, code: KeyCode) -> PaneInput {
	pane.handle_key(Key::plain(code))
}

#[test]
fn typing_marks_modified_until_persisted() {
	let mut buffer = Buffer::new(BufferId(7), None, Rope::new(), Encoding::Utf8, 1);
	let mut pane = Pane::new(0, PanePrefs::default());
	pane.load_from(&buffer);

	assert_eq!(pane.handle_key(Key::char('h')), PaneInput::Edited);
	pane.handle_key(Key::char('i'));
	assert!(pane.is_modified());
	assert!(!buffer.is_dirty());

	pane.persist_into(&mut buffer);
	assert!(!pane.is_modified());
	assert!(buffer.is_dirty());
	assert_eq!(buffer.content().to_string(), "hi");
}

#[test]
fn rebinding_shows_other_pane_edits() {
	let mut buffer = Buffer::new(BufferId(3), None, Rope::from_str("one"), Encoding::Utf8, 1);
	let mut left = Pane::new(0, PanePrefs::default());
	let mut right = Pane::new(1, PanePrefs::default());
	left.load_from(&buffer);
	right.load_from(&buffer);

	left.handle_key(Key::plain(KeyCode::End));
	left.handle_key(Key::char('!'));
	assert_eq!(right.content().to_string(), "one");

	left.persist_into(&mut buffer);
	right.load_from(&buffer);
	assert_eq!(right.content().to_string(), "one!");
}

#[test]
fn boundary_moves_are_rejected() {
	let mut pane = pane_with("ab\ncd");
	assert_eq!(press(&mut pane, KeyCode::Up), PaneInput::Rejected);
	assert_eq!(press(&mut pane, KeyCode::Left), PaneInput::Rejected);
	assert_eq!(press(&mut pane, KeyCode::Backspace), PaneInput::Rejected);
	assert_eq!(press(&mut pane, KeyCode::Down), PaneInput::Moved);
	assert_eq!(press(&mut pane, KeyCode::End), PaneInput::Moved);
	assert_eq!(pane.cursor(), Cursor::new(1, 2));
	assert_eq!(press(&mut pane, KeyCode::Right), PaneInput::Rejected);
	assert_eq!(press(&mut pane, KeyCode::Delete), PaneInput::Rejected);
	assert!(!pane.is_modified());
}

#[test]
fn arrows_wrap_across_lines() {
	let mut pane = pane_with("ab\ncd");
	pane.set_cursor(Cursor::new(0, 2));
	press(&mut pane, KeyCode::Right);
	assert_eq!(pane.cursor(), Cursor::new(1, 0));
	press(&mut pane, KeyCode::Left);
	assert_eq!(pane.cursor(), Cursor::new(0, 2));
}

#[test]
fn backspace_joins_crlf_lines() {
	let mut pane = pane_with("ab\r\ncd");
	assert_eq!(pane.line_len(0), 2);
	pane.set_cursor(Cursor::new(1, 0));
	press(&mut pane, KeyCode::Backspace);
	assert_eq!(pane.content().to_string(), "abcd");
	assert_eq!(pane.cursor(), Cursor::new(0, 2));
}

#[test]
fn tab_expands_to_next_stop() {
	let mut pane = pane_with("");
	pane.handle_key(Key::char('x'));
	press(&mut pane, KeyCode::Tab);
	assert_eq!(pane.content().to_string(), "x   ");
	assert_eq!(pane.cursor(), Cursor::new(0, 4));
}

#[test]
fn auto_close_pairs_follow_prefs() {
	let mut pane = pane_with("");
	pane.handle_key(Key::char('('));
	assert_eq!(pane.content().to_string(), "()");
	assert_eq!(pane.cursor(), Cursor::new(0, 1));

	let mut pane = pane_with("");
	pane.set_prefs(PanePrefs {
		auto_close_pairs: false,
		..PanePrefs::default()
	});
	pane.handle_key(Key::char('('));
	assert_eq!(pane.content().to_string(), "(");
}

#[test]
fn chords_are_not_inserted() {
	let mut pane = pane_with("");
	assert_eq!(pane.handle_key(Key::ctrl('x')), PaneInput::Ignored);
	assert_eq!(pane.handle_key(Key::new(KeyCode::Up, Modifiers::ALT)), PaneInput::Ignored);
	assert!(pane.is_blank());
}

#[test]
fn scroll_follows_cursor() {
	let text = (0..30).map(|i| format!("line {i}\n")).collect::<String>();
	let mut pane = pane_with(&text);
	pane.set_cursor(Cursor::new(25, 0));
	assert_eq!(pane.scroll().0, 16);
	pane.set_cursor(Cursor::new(3, 0));
	assert_eq!(pane.scroll().0, 3);
}

#[test]
fn find_wraps_and_respects_case() {
	let mut pane = pane_with("Foo bar\nfoo");
	assert_eq!(pane.find_next("foo", true), Some(Cursor::new(1, 0)));
	assert_eq!(pane.find_next("foo", false), Some(Cursor::new(0, 0)));
	assert_eq!(pane.find_next("FOO", false), Some(Cursor::new(1, 0)));
	assert_eq!(pane.find_next("zzz", false), None);
	assert_eq!(pane.cursor(), Cursor::new(1, 0));
}

#[test]
fn replace_current_then_all() {
	let mut pane = pane_with("a-a-a");
	assert!(!pane.replace_current("b", "c", true));
	assert!(pane.replace_current("a", "x", true));
	assert_eq!(pane.content().to_string(), "x-a-a");
	assert_eq!(pane.cursor(), Cursor::new(0, 2));
	assert_eq!(pane.replace_all("a", "y", true), 2);
	assert_eq!(pane.content().to_string(), "x-y-y");
	assert!(pane.is_modified());
}
