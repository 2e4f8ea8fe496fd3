//! The event loop driven end to end through a scripted terminal.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tessel_editor::LayoutKind;
use tessel_primitives::Rect;

use crate::common::{ScriptedTerminal, workspace};

#[test]
fn edit_save_and_quit() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("notes.txt");
	fs::write(&path, "hello\n").unwrap();

	let mut ws = workspace(dir.path());
	ws.open_initial(Some(&path));
	let mut term = ScriptedTerminal::new(80, 24);
	term.text("> ").keys("ctrl-s ctrl-q");
	ws.run(&mut term).unwrap();

	assert!(ws.should_quit());
	assert_eq!(fs::read_to_string(&path).unwrap(), "> hello\n");
	assert_eq!(term.frames.len(), 5, "one frame up front and one per event");
	assert!(term.frames[0].row_text(0).contains("notes.txt"));
	assert!(term.frames[2].row_text(1).contains("> hello"));
}

#[test]
fn end_of_input_stops_without_quitting() {
	let dir = TempDir::new().unwrap();
	let mut ws = workspace(dir.path());
	ws.open_initial(None);
	let mut term = ScriptedTerminal::new(80, 24);
	ws.run(&mut term).unwrap();

	assert!(!ws.should_quit());
	assert_eq!(term.frames.len(), 1);
	assert!(term.last_frame().cursor().is_some());
}

#[test]
fn resize_retiles_and_repaints() {
	let dir = TempDir::new().unwrap();
	let mut ws = workspace(dir.path());
	ws.open_initial(None);
	let mut term = ScriptedTerminal::new(80, 24);
	term.resize(100, 30);
	ws.run(&mut term).unwrap();

	let frame = term.last_frame();
	assert_eq!((frame.width(), frame.height()), (100, 30));
	assert_eq!(ws.size(), (100, 30));
	let pane = ws.active_window().active_pane().unwrap();
	assert_eq!(pane.area(), Rect::new(0, 1, 100, 28));
}

#[test]
fn rejected_keys_ring_the_terminal_bell() {
	let dir = TempDir::new().unwrap();
	let mut ws = workspace(dir.path());
	ws.open_initial(None);
	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("up left").text("a").keys("backspace backspace");
	ws.run(&mut term).unwrap();

	assert_eq!(term.bells, 3);
}

#[test]
fn go_to_line_through_the_loop() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("lines.txt");
	fs::write(&path, "one\ntwo\nthree\n").unwrap();

	let mut ws = workspace(dir.path());
	ws.open_initial(Some(&path));
	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("ctrl-g").text("3").keys("enter");
	ws.run(&mut term).unwrap();

	assert!(ws.dialog().is_none());
	assert_eq!(ws.active_window().active_pane().unwrap().cursor().row, 2);
	let frame = term.last_frame();
	assert_eq!(frame.cursor().map(|c| c.y), Some(3));
	assert!(!frame.row_text(9).contains("Go to line"));
}

#[test]
fn alert_frame_is_dismissed_with_escape() {
	let dir = TempDir::new().unwrap();
	let mut ws = workspace(dir.path());
	ws.open_initial(None);
	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("ctrl-r").text("typed while alerted").keys("esc");
	ws.run(&mut term).unwrap();

	let alerted = &term.frames[1];
	assert!((0..24).any(|y| alerted.row_text(y).contains("No recent files")));
	assert!(ws.alert().is_none());
	assert!(!term.last_frame().row_text(1).contains("typed"));
	assert_eq!(ws.pool().unsaved_count(), 0);
}

#[test]
fn layout_switch_through_the_dialog() {
	let dir = TempDir::new().unwrap();
	let mut ws = workspace(dir.path());
	ws.open_initial(None);
	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("ctrl-l down enter");
	ws.run(&mut term).unwrap();

	assert!(ws.dialog().is_none());
	assert_eq!(ws.active_window().layout(), LayoutKind::Horizontal2);
	let frame = term.last_frame();
	assert!((1..23).any(|y| frame.row_text(y).contains('│') || frame.row_text(y).contains('─')));
}

#[test]
fn quit_from_command_input() {
	let dir = TempDir::new().unwrap();
	let mut ws = workspace(dir.path());
	ws.open_initial(None);
	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("f2").text("quit").keys("enter");
	ws.run(&mut term).unwrap();

	assert!(ws.should_quit());
}
