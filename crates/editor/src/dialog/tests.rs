use std::fs;

use pretty_assertions::assert_eq;

use super::*;
use crate::layout::LayoutKind;
use crate::test_support::Fixture;

fn numbered_lines(count: usize) -> String {
	(1..=count).map(|n| format!("line {n}\n")).collect()
}

fn cursor(fx: &Fixture) -> Cursor {
	fx.ws.active_window().active_pane().expect("active pane").cursor()
}

fn with_file(name: &str, text: &str) -> Fixture {
	let mut fx = Fixture::new();
	let path = fx.file(name, text);
	fx.open(&path);
	fx
}

#[test]
fn go_to_line_previews_then_commits() {
	let mut fx = with_file("lines.txt", &numbered_lines(20));
	fx.keys("ctrl-g");
	assert_eq!(fx.ws.dialog().unwrap().form.text("line"), "1");

	fx.keys("backspace");
	fx.type_text("12.5");
	assert_eq!(cursor(&fx), Cursor::new(11, 4));

	fx.keys("enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(cursor(&fx), Cursor::new(11, 4));
}

#[test]
fn go_to_line_out_of_range_stays_open_and_cancel_restores() {
	let mut fx = with_file("lines.txt", &numbered_lines(20));
	fx.keys("down down ctrl-g");
	assert_eq!(fx.ws.dialog().unwrap().form.text("line"), "3");

	fx.keys("backspace");
	fx.type_text("7");
	assert_eq!(cursor(&fx), Cursor::new(6, 0));

	fx.type_text("7");
	assert_eq!(cursor(&fx), Cursor::new(2, 0), "invalid targets fall back to the origin");
	fx.keys("enter");
	assert!(fx.ws.take_bell());
	assert_eq!(fx.dialog_title(), Some("Go to line"));

	fx.keys("backspace esc");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(cursor(&fx), Cursor::new(2, 0));
}

#[test]
fn go_to_line_past_the_end_of_a_short_document_is_rejected() {
	let mut fx = with_file("short.txt", &numbered_lines(5));
	fx.keys("down ctrl-g backspace");
	fx.type_text("12.5");
	assert_eq!(cursor(&fx), Cursor::new(1, 0));

	fx.keys("enter");
	assert!(fx.ws.take_bell());
	assert_eq!(fx.alert(), None);
	assert_eq!(fx.dialog_title(), Some("Go to line"));
	assert_eq!(cursor(&fx), Cursor::new(1, 0));
}

#[test]
fn malformed_line_number_raises_alert_over_dialog() {
	let mut fx = with_file("lines.txt", &numbered_lines(5));
	fx.keys("ctrl-g");
	fx.type_text("..x");
	assert_eq!(fx.ws.dialog().unwrap().form.text("line"), "1..");

	fx.keys("enter");
	assert_eq!(fx.alert(), Some("Invalid line number specified"));
	assert_eq!(fx.dialog_title(), Some("Go to line"));

	fx.keys("esc");
	assert_eq!(fx.alert(), None);
	assert_eq!(fx.dialog_title(), Some("Go to line"));
	fx.keys("esc");
	assert!(fx.ws.dialog().is_none());
}

#[test]
fn dialogs_refuse_to_open_without_room() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.ws.resize(30, 8);
	fx.keys("ctrl-l");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.alert(), Some("Insufficient screen space: 40x9 required, 30x8 available"));
}

#[test]
fn showing_a_dialog_replaces_the_visible_one() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("ctrl-g");
	fx.ws.show_help().unwrap();
	assert_eq!(fx.dialog_title(), Some("Help"));
	fx.keys("f1");
	assert!(fx.ws.dialog().is_none());
}

#[test]
fn save_as_cancel_leaves_buffer_untouched() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.type_text("abc");
	fx.keys("f12");
	assert_eq!(fx.dialog_title(), Some("Save as"));

	fx.keys("esc");
	assert!(fx.ws.dialog().is_none());
	let id = fx.ws.active_buffer().unwrap();
	assert!(fx.ws.pool().get_buffer_by_id(id).unwrap().is_untitled());
	assert_eq!(fx.active_text(), "abc");
	assert_eq!(fs::read_dir(fx.dir.path()).unwrap().count(), 0);
}

#[test]
fn save_as_writes_and_renames_buffer() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.type_text("abc");
	fx.keys("f12");
	fx.type_text("out.txt");
	fx.keys("enter");

	assert!(fx.ws.dialog().is_none(), "{:?}", fx.alert());
	assert_eq!(fs::read_to_string(fx.path("out.txt")).unwrap(), "abc");
	let id = fx.ws.active_buffer().unwrap();
	let buffer = fx.ws.pool().get_buffer_by_id(id).unwrap();
	assert_eq!(buffer.name(), "out.txt");
	assert!(!buffer.is_dirty());
	assert_eq!(fx.ws.session().recent_files().len(), 1);
}

#[test]
fn save_as_over_existing_file_asks_first() {
	let mut fx = Fixture::new();
	fx.file("out.txt", "old");
	fx.ws.open_initial(None);
	fx.type_text("new");
	fx.keys("f12");
	fx.type_text("out.txt");
	fx.keys("enter");

	let Some(DialogKind::Question(question)) = fx.ws.dialog().map(|d| &d.kind) else {
		panic!("expected the overwrite question");
	};
	assert_eq!(question.message, "File already exists, overwrite?");
	assert_eq!(fs::read_to_string(fx.path("out.txt")).unwrap(), "old");

	fx.keys("enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fs::read_to_string(fx.path("out.txt")).unwrap(), "new");
}

#[test]
fn save_as_over_an_open_file_retires_its_buffer() {
	let mut fx = with_file("a.txt", "old\n");
	let old = fx.ws.active_buffer().unwrap();
	fx.keys("ctrl-n");
	fx.type_text("y");
	fx.type_text("new");
	fx.keys("f12");
	fx.type_text("a.txt");
	fx.keys("enter enter");

	assert!(fx.ws.dialog().is_none(), "{:?}", fx.alert());
	let saved = fx.ws.active_buffer().unwrap();
	assert_ne!(saved, old);
	assert!(fx.ws.pool().get_buffer_by_id(old).is_none());
	assert_eq!(fx.ws.pool().get_buffer_by_filename(&fx.path("a.txt")), Some(saved));
	let first_tab = fx.ws.windows()[0].active_pane().unwrap();
	assert_eq!(first_tab.buffer(), Some(saved));
	assert_eq!(first_tab.content().to_string(), "new");
}

#[test]
fn save_as_rejects_directory_targets() {
	let mut fx = Fixture::new();
	fs::create_dir(fx.path("sub")).unwrap();
	fx.ws.open_initial(None);
	fx.type_text("x");
	fx.keys("f12");
	fx.type_text("sub");
	fx.keys("enter");
	assert_eq!(fx.alert(), Some("Invalid filename"));
	assert_eq!(fx.dialog_title(), Some("Save as"));
}

#[test]
fn preferences_validate_tab_size_before_applying() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("f4");
	assert_eq!(fx.dialog_title(), Some("Preferences"));

	fx.keys("backspace");
	fx.type_text("0");
	fx.keys("tab tab space enter");
	assert_eq!(fx.alert(), Some("Incorrect tab size: should be in [1,9]"));
	let prefs = fx.ws.active_window().active_pane().unwrap().prefs().clone();
	assert_eq!(prefs.tab_size, 4);
	assert!(prefs.show_line_numbers, "nothing is applied on failure");

	fx.keys("esc");
	fx.ws.dialog.as_mut().unwrap().form.set_text("tab-size", "2");
	fx.keys("enter");
	assert!(fx.ws.dialog().is_none());
	let prefs = fx.ws.active_window().active_pane().unwrap().prefs();
	assert_eq!(prefs.tab_size, 2);
	assert!(!prefs.show_line_numbers);
}

#[test]
fn preferences_encoding_applies_to_bound_buffer() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("f4 tab");
	assert_eq!(fx.ws.dialog().unwrap().form.focused_name(), Some("encoding"));
	fx.keys("down space enter");

	let id = fx.ws.active_buffer().unwrap();
	let encoding = fx.ws.pool().get_buffer_by_id(id).unwrap().encoding();
	assert_eq!(encoding, tessel_primitives::Encoding::ALL[1]);
}

#[test]
fn recent_files_filter_and_open() {
	let mut fx = Fixture::new();
	let alpha = fx.file("alpha.txt", "alpha\n");
	let beta = fx.file("beta.txt", "beta\n");
	fx.ws.session.record_file(&alpha);
	fx.ws.session.record_file(&beta);

	fx.keys("ctrl-r");
	assert_eq!(fx.dialog_title(), Some("Recent files"));
	fx.type_text("ALP");
	let files = fx.ws.dialog().unwrap().form.list("files").unwrap();
	assert_eq!(files.visible_len(), 1);
	assert!(files.items()[files.highlighted().unwrap()].label.ends_with("alpha.txt"));

	fx.keys("tab enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.active_text(), "alpha\n");
}

#[test]
fn recent_files_report_missing_entries() {
	let mut fx = Fixture::new();
	fx.keys("ctrl-r");
	assert_eq!(fx.alert(), Some("No recent files"));
	fx.keys("esc");

	let gone = fx.path("gone.txt");
	fx.ws.session.record_file(&gone);
	fx.keys("ctrl-r tab enter");
	assert_eq!(fx.alert(), Some("The selected file/directory does not exist"));
	assert_eq!(fx.dialog_title(), Some("Recent files"));
}

#[test]
fn open_dialog_walks_into_directories() {
	let mut fx = Fixture::new();
	fs::create_dir(fx.path("sub")).unwrap();
	fs::write(fx.path("sub").join("inner.txt"), "inner\n").unwrap();

	fx.keys("ctrl-o tab");
	let listing_len = fx.ws.dialog().unwrap().form.list("files").unwrap().visible_len();
	assert_eq!(listing_len, 2);
	fx.keys("down enter");
	let dialog = fx.ws.dialog().unwrap();
	assert!(dialog.form.text("path").ends_with("sub/"));
	let labels: Vec<&str> = dialog.form.list("files").unwrap().items().iter().map(|i| i.label.as_str()).collect();
	assert_eq!(labels, vec!["../", "inner.txt"]);

	fx.keys("down enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.active_text(), "inner\n");
}

#[test]
fn open_missing_file_offers_creation() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("ctrl-o");
	fx.type_text("fresh.txt");
	fx.keys("enter");
	let Some(DialogKind::Question(question)) = fx.ws.dialog().map(|d| &d.kind) else {
		panic!("expected the create question");
	};
	assert_eq!(question.message, "The selected file does not exist, create?");

	// Create, then answer the new-tab question with "no".
	fx.type_text("yn");
	assert!(fx.ws.dialog().is_none());
	let id = fx.ws.active_buffer().unwrap();
	assert_eq!(fx.ws.pool().get_buffer_by_id(id).unwrap().name(), "fresh.txt");
	assert_eq!(fx.ws.windows().len(), 1);
	assert!(!fx.path("fresh.txt").exists());
}

#[test]
fn new_buffer_question_picks_tab_or_pane() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);

	fx.keys("ctrl-n");
	fx.type_text("n");
	assert_eq!(fx.ws.windows().len(), 1);
	assert_eq!(fx.ws.pool().buffer_ids().len(), 1, "the replaced empty buffer is pruned");
	let id = fx.ws.active_buffer().unwrap();
	assert_eq!(fx.ws.pool().get_buffer_by_id(id).unwrap().name(), "untitled-2");

	fx.keys("ctrl-n");
	fx.type_text("y");
	assert_eq!(fx.ws.windows().len(), 2);
	assert_eq!(fx.ws.active_window_index(), 1);
	assert_eq!(fx.ws.active_window().name(), "Tab 2");

	fx.keys("ctrl-n esc");
	assert_eq!(fx.ws.windows().len(), 2, "cancel means the active pane");
}

#[test]
fn question_cycles_with_arrows() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("ctrl-n right right");
	let Some(DialogKind::Question(question)) = fx.ws.dialog().map(|d| &d.kind) else {
		panic!("expected a question");
	};
	assert_eq!(question.selected, 0);
	fx.keys("left enter");
	assert_eq!(fx.ws.windows().len(), 1);
}

#[test]
fn switch_layout_applies_highlighted_entry() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("ctrl-l down enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.ws.active_window().layout(), LayoutKind::Horizontal2);
	assert_eq!(fx.ws.active_window().slots().len(), 2);
}

#[test]
fn active_tabs_switch_live_and_cancel_restores() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("ctrl-n");
	fx.type_text("y");
	assert_eq!(fx.ws.active_window_index(), 1);

	fx.keys("ctrl-t tab up");
	assert_eq!(fx.ws.active_window_index(), 0);
	fx.keys("esc");
	assert_eq!(fx.ws.active_window_index(), 1);

	fx.keys("ctrl-t tab up enter");
	assert_eq!(fx.ws.active_window_index(), 0);
	assert!(fx.ws.dialog().is_none());
}

#[test]
fn active_tabs_search_filters_and_switches() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	for _ in 0..2 {
		fx.keys("ctrl-n");
		fx.type_text("y");
	}
	assert_eq!(fx.ws.active_window_index(), 2);

	fx.keys("ctrl-t");
	assert_eq!(fx.dialog_title(), Some("Active tabs"));
	fx.type_text("tab 2");
	let tabs = fx.ws.dialog().unwrap().form.list("tabs").unwrap();
	assert_eq!(tabs.visible_len(), 1);
	assert_eq!(tabs.highlighted(), Some(1));
	assert_eq!(fx.ws.active_window_index(), 1);

	fx.type_text("x");
	assert_eq!(fx.ws.dialog().unwrap().form.list("tabs").unwrap().visible_len(), 0);
	assert_eq!(fx.ws.active_window_index(), 1, "no match keeps the last tab shown");
	fx.keys("enter");
	assert!(fx.ws.take_bell());
	assert_eq!(fx.dialog_title(), Some("Active tabs"));

	fx.keys("backspace enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.ws.active_window_index(), 1);
}

#[test]
fn find_moves_to_next_match_and_replace_all_closes() {
	let mut fx = with_file("text.txt", "foo bar foo\n");
	fx.keys("ctrl-f");
	fx.type_text("foo");
	fx.keys("enter");
	assert_eq!(cursor(&fx), Cursor::new(0, 8));
	assert_eq!(fx.dialog_title(), Some("Find"));
	fx.keys("esc");

	fx.keys("ctrl-h");
	assert_eq!(fx.ws.dialog().unwrap().form.text("find"), "foo");
	fx.keys("tab");
	fx.type_text("baz");
	fx.keys("ctrl-s");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.active_text(), "baz bar baz\n");
}

#[test]
fn find_without_match_rings() {
	let mut fx = with_file("text.txt", "abc\n");
	fx.keys("ctrl-f");
	fx.type_text("zzz");
	fx.keys("enter");
	assert!(fx.ws.take_bell());
	assert_eq!(cursor(&fx), Cursor::new(0, 0));
}

#[test]
fn command_input_runs_commands() {
	let mut fx = Fixture::new();
	fx.ws.open_initial(None);
	fx.keys("f2");
	fx.type_text("layout 2x2");
	fx.keys("enter");
	assert!(fx.ws.dialog().is_none());
	assert_eq!(fx.ws.active_window().layout(), LayoutKind::Grid2x2);

	fx.keys("f2");
	fx.type_text("tab 3");
	fx.keys("enter");
	assert_eq!(fx.alert(), Some("Tab 3 is not available"));
	fx.keys("esc esc");

	fx.keys("f2");
	fx.type_text("frobnicate");
	fx.keys("enter");
	assert_eq!(fx.alert(), Some("Unknown command: frobnicate"));
}

#[test]
fn project_explorer_needs_a_project() {
	let mut fx = Fixture::new();
	fx.keys("ctrl-e");
	assert_eq!(fx.alert(), Some("No project is open"));
	fx.keys("esc");

	fs::create_dir(fx.path("src")).unwrap();
	fs::write(fx.path("src").join("main.rs"), "fn main() {}\n").unwrap();
	let root = fx.dir.path().to_path_buf();
	fx.open(&root);
	assert!(matches!(fx.ws.mode(), crate::AppMode::Project { .. }));

	fx.keys("ctrl-e");
	let dialog = fx.ws.dialog().unwrap();
	let files = dialog.form.list("files").unwrap();
	let labels: Vec<&str> = files.items().iter().map(|i| i.label.as_str()).collect();
	assert_eq!(labels, vec!["src/", "src/main.rs"]);
	assert_eq!(files.highlighted(), Some(1), "directories are not selectable");

	fx.keys("tab enter");
	assert_eq!(fx.dialog_title(), Some("Question"));
	fx.type_text("n");
	assert_eq!(fx.active_text(), "fn main() {}\n");
}
