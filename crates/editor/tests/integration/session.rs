//! Recent-files persistence across workspace lifetimes.

use std::fs;

use tempfile::TempDir;
use tessel_editor::SessionStore;

use crate::common::{ScriptedTerminal, workspace_with};

#[test]
fn recent_files_survive_a_restart() {
	let dir = TempDir::new().unwrap();
	let store = dir.path().join("state").join("session.json");
	let path = dir.path().join("kept.txt");
	fs::write(&path, "kept\n").unwrap();

	let mut first = workspace_with(dir.path(), SessionStore::load(store.clone(), 20));
	first.open_initial(Some(&path));
	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("ctrl-q");
	first.run(&mut term).unwrap();
	assert!(first.should_quit());
	assert!(store.is_file());

	let mut second = workspace_with(dir.path(), SessionStore::load(store, 20));
	let recent = second.session().recent_files();
	assert_eq!(recent.len(), 1);
	assert!(recent[0].ends_with("kept.txt"));

	let mut term = ScriptedTerminal::new(80, 24);
	term.keys("ctrl-r tab enter");
	second.run(&mut term).unwrap();
	let pane = second.active_window().active_pane().unwrap();
	assert_eq!(pane.content().to_string(), "kept\n");
}

#[test]
fn force_quit_removes_the_session_file() {
	let dir = TempDir::new().unwrap();
	let store = dir.path().join("session.json");
	let path = dir.path().join("scratch.txt");
	fs::write(&path, "").unwrap();

	let mut ws = workspace_with(dir.path(), SessionStore::load(store.clone(), 20));
	ws.open_initial(Some(&path));
	assert!(store.is_file());

	let mut term = ScriptedTerminal::new(80, 24);
	term.text("unsaved").keys("alt-q");
	ws.run(&mut term).unwrap();

	assert!(ws.should_quit());
	assert!(!store.exists());
	assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn corrupt_session_file_starts_empty() {
	let dir = TempDir::new().unwrap();
	let store = dir.path().join("session.json");
	fs::write(&store, "{ not json").unwrap();

	let ws = workspace_with(dir.path(), SessionStore::load(store, 20));
	assert!(ws.session().is_empty());
}
