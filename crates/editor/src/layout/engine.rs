use tracing::trace;

use super::LayoutKind;
use crate::buffer::BufferPool;
use crate::pane::Pane;

/// Whether a pane can be dropped by a shrinking layout without losing text:
/// it is empty and untitled, or everything it shows is saved.
pub(crate) fn is_disposable(pane: &Pane, pool: &dyn BufferPool) -> bool {
	let Some(buffer) = pane.buffer().and_then(|id| pool.get_buffer_by_id(id)) else {
		return pane.is_blank();
	};
	if buffer.is_untitled() {
		return pane.is_blank() && buffer.is_empty();
	}
	!buffer.is_dirty() && !pane.is_modified()
}

/// Whether the panes in `slots` may be rearranged into `new`.
///
/// Growing never discards anything. Shrinking requires every pane in a slot
/// the new layout drops to be [disposable](is_disposable).
pub fn can_change_layout(slots: &[Option<Pane>], new: LayoutKind, pool: &dyn BufferPool) -> bool {
	let keep = new.pane_count();
	if keep >= slots.len() {
		return true;
	}
	let allowed = slots[keep..].iter().flatten().all(|pane| is_disposable(pane, pool));
	trace!(layout = %new, allowed, "layout change check");
	allowed
}
