//! Machine-checkable invariants for layout geometry and transitions.

use std::fs;

use proptest::prelude::*;
use ropey::Rope;
use tempfile::TempDir;
use tessel_primitives::Rect;

use super::*;
use crate::buffer::{BufferPool, FilePool, NewBuffer};
use crate::pane::{Pane, PanePrefs};

fn assert_tiles(kind: LayoutKind, area: Rect) {
	let panes = dimensions(kind, area);
	let divs = dividers(kind, area);
	assert_eq!(panes.len(), kind.pane_count(), "{kind}: wrong pane count");

	let all: Vec<Rect> = panes.iter().chain(&divs).copied().collect();
	for (i, a) in all.iter().enumerate() {
		assert!(
			a.left() >= area.left() && a.right() <= area.right() && a.top() >= area.top() && a.bottom() <= area.bottom(),
			"{kind}: {a:?} escapes {area:?}"
		);
		for b in &all[i + 1..] {
			assert!(!a.intersects(*b), "{kind}: {a:?} overlaps {b:?} in {area:?}");
		}
	}
	let covered: u32 = all.iter().map(|r| r.area()).sum();
	assert_eq!(covered, area.area(), "{kind}: cells left uncovered in {area:?}");
	assert!(panes.iter().all(|p| !p.is_empty()), "{kind}: empty pane in {area:?}");
}

/// Must tile the workspace exactly: panes plus one-cell dividers cover every
/// cell once, for even and odd extents.
///
/// - Enforced in: `layout::geometry::segments`
/// - Failure symptom: Stale cells between panes, or two panes drawing over
///   the same column after a resize.
#[cfg_attr(test, test)]
pub(crate) fn test_layouts_tile_workspace() {
	for (width, height) in [(80, 24), (81, 25), (120, 41), (33, 12), (200, 60)] {
		let area = workspace_area(width, height);
		for kind in LayoutKind::ALL {
			assert_tiles(kind, area);
		}
	}
}

/// Must keep two-pane layouts exact across resizes.
///
/// - Enforced in: `Window::readjust`
/// - Failure symptom: A column or row shared by both panes after the
///   terminal is resized to an odd size.
#[cfg_attr(test, test)]
pub(crate) fn test_two_pane_resize() {
	for (width, height) in [(80, 24), (79, 24), (80, 23), (79, 23)] {
		let area = workspace_area(width, height);
		for kind in [LayoutKind::Horizontal2, LayoutKind::Vertical2] {
			let panes = dimensions(kind, area);
			assert!(!panes[0].intersects(panes[1]));
			assert_eq!(panes[0].area() + panes[1].area() + dividers(kind, area)[0].area(), area.area());
		}
	}
}

#[derive(Debug, Clone, Copy)]
enum SlotState {
	Empty,
	BlankUnbound,
	UntitledEmpty,
	UntitledDraft,
	FileClean,
	FileModified,
}

impl SlotState {
	fn disposable(self) -> bool {
		!matches!(self, Self::UntitledDraft | Self::FileModified)
	}
}

fn slot_state() -> impl Strategy<Value = SlotState> {
	prop_oneof![
		Just(SlotState::Empty),
		Just(SlotState::BlankUnbound),
		Just(SlotState::UntitledEmpty),
		Just(SlotState::UntitledDraft),
		Just(SlotState::FileClean),
		Just(SlotState::FileModified),
	]
}

fn layout_kind() -> impl Strategy<Value = LayoutKind> {
	prop::sample::select(LayoutKind::ALL.to_vec())
}

fn build_slots(dir: &TempDir, pool: &mut FilePool, states: &[SlotState]) -> Vec<Option<Pane>> {
	states
		.iter()
		.enumerate()
		.map(|(slot, state)| {
			let mut pane = Pane::new(slot, PanePrefs::default());
			let buffer = match state {
				SlotState::Empty => return None,
				SlotState::BlankUnbound => return Some(pane),
				SlotState::UntitledEmpty | SlotState::UntitledDraft => {
					pool.create_buffer(NewBuffer::untitled()).unwrap().unwrap()
				}
				SlotState::FileClean | SlotState::FileModified => {
					let path = dir.path().join(format!("file-{slot}.txt"));
					fs::write(&path, "on disk").expect("write");
					pool.create_buffer(NewBuffer::file(path)).unwrap().unwrap()
				}
			};
			if matches!(state, SlotState::UntitledDraft | SlotState::FileModified) {
				pool.get_buffer_mut(buffer).unwrap().set_content(Rope::from_str("edited"));
			}
			pane.load_from(pool.get_buffer_by_id(buffer).unwrap());
			Some(pane)
		})
		.collect()
}

proptest! {
	/// Must tile every layout at arbitrary terminal sizes.
	#[test]
	fn prop_layouts_tile(width in 12u16..300, height in 8u16..120) {
		let area = workspace_area(width, height);
		for kind in LayoutKind::ALL {
			assert_tiles(kind, area);
		}
	}

	/// Must allow growth unconditionally and allow shrinking exactly when
	/// every dropped pane is empty-untitled or saved.
	#[test]
	fn prop_can_change_layout(
		from in layout_kind(),
		to in layout_kind(),
		states in prop::collection::vec(slot_state(), MAX_PANES),
	) {
		let dir = TempDir::new().expect("tempdir");
		let mut pool = FilePool::new(dir.path());
		let states = &states[..from.pane_count()];
		let slots = build_slots(&dir, &mut pool, states);

		let allowed = can_change_layout(&slots, to, &pool);
		if to.pane_count() >= from.pane_count() {
			prop_assert!(allowed);
		} else {
			let expected = states[to.pane_count()..].iter().all(|s| s.disposable());
			prop_assert_eq!(allowed, expected);
		}
	}
}
