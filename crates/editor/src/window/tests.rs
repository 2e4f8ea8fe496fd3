use std::fs;

use ropey::Rope;
use tempfile::TempDir;
use tessel_primitives::Key;

use super::*;
use crate::buffer::{FilePool, NewBuffer};

fn area() -> Rect {
	layout::workspace_area(80, 24)
}

fn untitled(pool: &mut FilePool, text: &str) -> BufferId {
	let id = pool.create_buffer(NewBuffer::untitled()).unwrap().unwrap();
	if !text.is_empty() {
		pool.get_buffer_mut(id).unwrap().set_content(Rope::from_str(text));
	}
	id
}

fn saved_file(dir: &TempDir, pool: &mut FilePool, name: &str) -> BufferId {
	let path = dir.path().join(name);
	fs::write(&path, "saved\n").expect("write");
	pool.create_buffer(NewBuffer::file(path)).unwrap().unwrap()
}

fn window(layout: LayoutKind) -> Window {
	Window::new("Tab 1", layout, area(), PanePrefs::default())
}

#[test]
fn activate_out_of_range_fails() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal2);
	let err = win.activate_pane(2, &mut pool).unwrap_err();
	assert!(matches!(err, WorkspaceError::PaneNotAvailable(2)));
	assert_eq!(err.to_string(), "Pane 3 is not available");
	assert_eq!(win.active_index(), None);
}

#[test]
fn activate_persists_and_blurs_previous() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal2);
	let id = untitled(&mut pool, "");
	win.place(id, &mut pool).unwrap();
	win.active_pane_mut().unwrap().handle_key(Key::char('x'));

	win.activate_pane(1, &mut pool).unwrap();

	assert_eq!(win.active_index(), Some(1));
	let first = win.pane(0).unwrap();
	assert!(!first.is_focused());
	assert!(!first.is_modified());
	assert!(pool.get_buffer_by_id(id).unwrap().is_dirty());
	let second = win.pane(1).unwrap();
	assert!(second.is_focused());
	let fresh = second.buffer().expect("untitled buffer bound");
	assert_ne!(fresh, id);
	assert!(pool.get_buffer_by_id(fresh).unwrap().is_untitled());
	assert_eq!(second.area(), layout::dimensions(LayoutKind::Horizontal2, area())[1]);
}

#[test]
fn activate_same_pane_is_noop() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Single);
	let id = untitled(&mut pool, "");
	win.place(id, &mut pool).unwrap();
	win.active_pane_mut().unwrap().handle_key(Key::char('x'));
	win.activate_pane(0, &mut pool).unwrap();
	assert!(win.active_pane().unwrap().is_modified());
}

#[test]
fn shared_buffer_edits_show_after_rebind() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal2);
	let id = untitled(&mut pool, "");
	win.place(id, &mut pool).unwrap();
	win.place(id, &mut pool).unwrap();
	win.active_pane_mut().unwrap().handle_key(Key::char('z'));

	win.activate_pane(0, &mut pool).unwrap();
	assert_eq!(win.pane(0).unwrap().content().to_string(), "z");
}

#[test]
fn close_middle_pane_focuses_previous() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal3);
	let ids: Vec<_> = (0..3).map(|_| untitled(&mut pool, "")).collect();
	for &id in &ids {
		win.place(id, &mut pool).unwrap();
	}
	win.activate_pane(1, &mut pool).unwrap();

	let closed = win.close_active_pane(&mut pool).unwrap();
	assert_eq!(closed.buffer(), Some(ids[1]));
	assert_eq!(win.active_index(), Some(0));
	assert_eq!(win.slots().len(), 3);
	assert_eq!(win.pane(1).unwrap().buffer(), Some(ids[2]));
	assert_eq!(win.pane(1).unwrap().slot(), 1);
	assert!(win.pane(2).is_none());
}

#[test]
fn close_first_pane_focuses_new_first() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal2);
	let a = untitled(&mut pool, "");
	let b = untitled(&mut pool, "");
	win.place(a, &mut pool).unwrap();
	win.place(b, &mut pool).unwrap();
	win.activate_pane(0, &mut pool).unwrap();

	win.close_active_pane(&mut pool);
	assert_eq!(win.active_index(), Some(0));
	assert_eq!(win.active_pane().unwrap().buffer(), Some(b));

	win.close_active_pane(&mut pool);
	assert_eq!(win.active_index(), None);
	assert_eq!(win.pane_count(), 0);
	assert!(win.close_active_pane(&mut pool).is_none());
}

#[test]
fn close_falls_back_to_first_occupied_slot() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal3);
	let a = untitled(&mut pool, "");
	win.place(a, &mut pool).unwrap();
	win.activate_pane(2, &mut pool).unwrap();
	// Slots: [a, empty, blank]; closing slot 2 prefers slot 1, which is empty.
	win.close_active_pane(&mut pool);
	assert_eq!(win.active_index(), Some(0));
}

#[test]
fn growing_layout_appends_empty_slots() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Single);
	let id = untitled(&mut pool, "dirty");
	win.place(id, &mut pool).unwrap();

	win.set_layout(LayoutKind::Grid2x2, &mut pool).unwrap();
	assert_eq!(win.slots().len(), 4);
	assert_eq!(win.pane_count(), 1);
	assert_eq!(win.active_index(), Some(0));
	assert_eq!(win.pane(0).unwrap().area(), layout::dimensions(LayoutKind::Grid2x2, area())[0]);
}

#[test]
fn shrinking_over_unsaved_pane_is_blocked() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal2);
	let clean = saved_file(&dir, &mut pool, "a.txt");
	let draft = untitled(&mut pool, "draft");
	win.place(clean, &mut pool).unwrap();
	win.place(draft, &mut pool).unwrap();

	let err = win.set_layout(LayoutKind::Single, &mut pool).unwrap_err();
	assert!(matches!(err, WorkspaceError::LayoutBlocked));
	assert_eq!(win.layout(), LayoutKind::Horizontal2);
	assert_eq!(win.pane_count(), 2);
}

#[test]
fn shrinking_drops_clean_trailing_panes() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal3);
	let draft = untitled(&mut pool, "draft");
	let clean = saved_file(&dir, &mut pool, "b.txt");
	let empty = untitled(&mut pool, "");
	win.place(draft, &mut pool).unwrap();
	win.place(clean, &mut pool).unwrap();
	win.place(empty, &mut pool).unwrap();

	win.set_layout(LayoutKind::Single, &mut pool).unwrap();
	assert_eq!(win.slots().len(), 1);
	assert_eq!(win.pane(0).unwrap().buffer(), Some(draft));
	assert_eq!(win.active_index(), None);
	assert_eq!(win.pane(0).unwrap().area(), area());
}

#[test]
fn readjust_tracks_resize() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Vertical2);
	let id = untitled(&mut pool, "");
	win.place(id, &mut pool).unwrap();
	win.activate_pane(1, &mut pool).unwrap();

	let resized = layout::workspace_area(51, 17);
	win.readjust(resized, false);
	let expected = layout::dimensions(LayoutKind::Vertical2, resized);
	assert_eq!(win.pane(0).unwrap().area(), expected[0]);
	assert_eq!(win.pane(1).unwrap().area(), expected[1]);
}

#[test]
fn place_rejects_an_unknown_buffer() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Single);
	let id = untitled(&mut pool, "");
	pool.discard_buffer(id);

	let err = win.place(id, &mut pool).unwrap_err();
	assert!(matches!(err, WorkspaceError::BufferNotFound(gone) if gone == id));
	assert_eq!(win.pane_count(), 0);
}

#[test]
fn bind_active_rejects_an_unknown_buffer() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Single);
	let shown = untitled(&mut pool, "kept\n");
	let gone = untitled(&mut pool, "");
	pool.discard_buffer(gone);
	win.place(shown, &mut pool).unwrap();

	let err = win.bind_active(gone, &mut pool).unwrap_err();
	assert!(matches!(err, WorkspaceError::BufferNotFound(_)));
	assert_eq!(win.active_pane().unwrap().buffer(), Some(shown));
}

#[test]
fn rebind_moves_every_pane_showing_a_buffer() {
	let dir = TempDir::new().expect("tempdir");
	let mut pool = FilePool::new(dir.path());
	let mut win = window(LayoutKind::Horizontal3);
	let old = saved_file(&dir, &mut pool, "a.txt");
	let other = untitled(&mut pool, "other\n");
	let new = untitled(&mut pool, "new\n");
	win.place(old, &mut pool).unwrap();
	win.place(other, &mut pool).unwrap();
	win.place(old, &mut pool).unwrap();

	let moved = win.rebind(old, pool.get_buffer_by_id(new).unwrap());

	assert_eq!(moved, 2);
	let bound: Vec<_> = win.panes().map(|pane| pane.buffer()).collect();
	assert_eq!(bound, vec![Some(new), Some(other), Some(new)]);
	assert_eq!(win.pane(0).unwrap().content().to_string(), "new\n");
}
