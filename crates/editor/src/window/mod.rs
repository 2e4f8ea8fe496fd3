//! Workspace windows (tabs).
//!
//! A [`Window`] owns the pane slots of one tab: a vector sized to its
//! layout's pane count, where `None` marks a slot with no pane yet, plus the
//! active-pane index. Geometry comes from [`crate::layout`]; buffer content
//! moves in and out of panes only through [`BufferPool`].

mod status;

pub use status::{PaneState, StatusLine, language_for, pane_state};
use tessel_primitives::{BufferId, Rect};
use tracing::debug;

use crate::buffer::{Buffer, BufferPool, NewBuffer};
use crate::layout::{self, LayoutKind};
use crate::pane::{Pane, PanePrefs};
use crate::{Result, WorkspaceError};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct Window {
	name: String,
	layout: LayoutKind,
	slots: Vec<Option<Pane>>,
	active: Option<usize>,
	area: Rect,
	defaults: PanePrefs,
}

impl Window {
	/// Creates a tab with every slot empty and no active pane.
	pub fn new(name: impl Into<String>, layout: LayoutKind, area: Rect, defaults: PanePrefs) -> Self {
		Self {
			name: name.into(),
			layout,
			slots: vec![None; layout.pane_count()],
			active: None,
			area,
			defaults,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn layout(&self) -> LayoutKind {
		self.layout
	}

	pub fn area(&self) -> Rect {
		self.area
	}

	pub fn slots(&self) -> &[Option<Pane>] {
		&self.slots
	}

	pub fn pane(&self, index: usize) -> Option<&Pane> {
		self.slots.get(index)?.as_ref()
	}

	pub fn panes(&self) -> impl Iterator<Item = &Pane> {
		self.slots.iter().flatten()
	}

	pub fn pane_count(&self) -> usize {
		self.panes().count()
	}

	pub fn active_index(&self) -> Option<usize> {
		self.active
	}

	pub fn active_pane(&self) -> Option<&Pane> {
		self.pane(self.active?)
	}

	pub fn active_pane_mut(&mut self) -> Option<&mut Pane> {
		self.slots.get_mut(self.active?)?.as_mut()
	}

	pub fn first_free_slot(&self) -> Option<usize> {
		self.slots.iter().position(Option::is_none)
	}

	/// Writes the active pane's working copy back into its buffer.
	pub fn persist_active(&mut self, pool: &mut dyn BufferPool) {
		if let Some(pane) = self.active_pane_mut() {
			persist(pane, pool);
		}
	}

	/// Writes every pane's working copy back into its buffer.
	pub fn persist_all(&mut self, pool: &mut dyn BufferPool) {
		for pane in self.slots.iter_mut().flatten() {
			persist(pane, pool);
		}
	}

	/// Reloads the active pane from its buffer to pick up edits persisted
	/// through other panes.
	pub fn reload_active(&mut self, pool: &dyn BufferPool) {
		if let Some(pane) = self.active_pane_mut()
			&& let Some(buffer) = pane.buffer().and_then(|id| pool.get_buffer_by_id(id))
		{
			pane.load_from(buffer);
		}
	}

	/// Recomputes pane rectangles for `area`.
	///
	/// Skipped when the area is unchanged unless `force` is set.
	pub fn readjust(&mut self, area: Rect, force: bool) {
		if !force && area == self.area {
			return;
		}
		self.area = area;
		let rects = layout::dimensions(self.layout, area);
		for (slot, rect) in self.slots.iter_mut().zip(rects) {
			if let Some(pane) = slot {
				pane.set_area(rect);
			}
		}
	}

	/// Focuses pane `index`, creating it if the slot is empty.
	///
	/// The previously active pane is persisted and blurred; the target pane
	/// reloads its buffer so edits made through other panes show up. A pane
	/// without a buffer gets a fresh untitled one.
	pub fn activate_pane(&mut self, index: usize, pool: &mut dyn BufferPool) -> Result<()> {
		if index >= self.slots.len() {
			return Err(WorkspaceError::PaneNotAvailable(index));
		}
		if self.active == Some(index) {
			return Ok(());
		}

		if let Some(current) = self.active_pane_mut() {
			persist(current, pool);
			current.blur();
		}

		let defaults = &self.defaults;
		let pane = self.slots[index].get_or_insert_with(|| Pane::new(index, defaults.clone()));
		let bound = match pane.buffer() {
			Some(id) => Some(id),
			None => {
				let request = match pane.prefs().encoding_override {
					Some(encoding) => NewBuffer::untitled().with_encoding(encoding),
					None => NewBuffer::untitled(),
				};
				pool.create_buffer(request)?
			}
		};
		if let Some(buffer) = bound.and_then(|id| pool.get_buffer_by_id(id)) {
			pane.load_from(buffer);
		}
		pane.focus();
		self.active = Some(index);
		debug!(window = %self.name, pane = index, "pane activated");
		self.readjust(self.area, true);
		Ok(())
	}

	/// Binds `buffer` into the active pane, persisting whatever it showed.
	pub fn bind_active(&mut self, buffer: BufferId, pool: &mut dyn BufferPool) -> Result<()> {
		let pane = self.active_pane_mut().ok_or(WorkspaceError::NoActivePane)?;
		persist(pane, pool);
		let target = pool.get_buffer_by_id(buffer).ok_or(WorkspaceError::BufferNotFound(buffer))?;
		pane.load_from(target);
		Ok(())
	}

	/// Points every pane showing `from` at `to`, dropping their unsaved
	/// edits. Returns how many panes moved.
	pub fn rebind(&mut self, from: BufferId, to: &Buffer) -> usize {
		let mut moved = 0;
		for pane in self.slots.iter_mut().flatten().filter(|pane| pane.buffer() == Some(from)) {
			pane.load_from(to);
			moved += 1;
		}
		if moved > 0 {
			debug!(window = %self.name, %from, to = %to.id(), panes = moved, "panes rebound");
		}
		moved
	}

	/// Creates a pane bound to `buffer` in the first empty slot and focuses it.
	pub fn place(&mut self, buffer: BufferId, pool: &mut dyn BufferPool) -> Result<usize> {
		let slot = self.first_free_slot().ok_or(WorkspaceError::NoFreePane)?;
		let target = pool.get_buffer_by_id(buffer).ok_or(WorkspaceError::BufferNotFound(buffer))?;
		let mut pane = Pane::new(slot, self.defaults.clone());
		pane.load_from(target);
		self.slots[slot] = Some(pane);
		self.activate_pane(slot, pool)?;
		Ok(slot)
	}

	/// Removes the active pane and picks the next one to focus.
	///
	/// The slot vector keeps its size: later panes shift down one slot and
	/// an empty slot is appended. The new active pane is the one now at the
	/// removed index when that was slot 0, else the one before it; if that
	/// slot is empty the first occupied slot wins, and with no panes left
	/// nothing is active.
	pub fn close_active_pane(&mut self, pool: &mut dyn BufferPool) -> Option<Pane> {
		let index = self.active?;
		self.slots.get(index)?.as_ref()?;
		let mut closed = self.slots.remove(index)?;
		self.slots.push(None);
		persist(&mut closed, pool);
		closed.blur();
		for (slot, pane) in self.slots.iter_mut().enumerate() {
			if let Some(pane) = pane {
				pane.set_slot(slot);
			}
		}

		let preferred = if index == 0 { 0 } else { index - 1 };
		let next = if self.slots[preferred].is_some() {
			Some(preferred)
		} else {
			self.slots.iter().position(Option::is_some)
		};
		self.active = None;
		debug!(window = %self.name, closed = index, next = ?next, "pane closed");
		match next {
			Some(next) => {
				// Cannot fail: `next` is an occupied slot within range.
				let _ = self.activate_pane(next, pool);
			}
			None => self.readjust(self.area, true),
		}
		Some(closed)
	}

	/// Switches to `new`, dropping trailing panes a smaller layout cannot show.
	pub fn set_layout(&mut self, new: LayoutKind, pool: &mut dyn BufferPool) -> Result<()> {
		if !layout::can_change_layout(&self.slots, new, pool) {
			return Err(WorkspaceError::LayoutBlocked);
		}
		let keep = new.pane_count();
		for mut pane in self.slots.drain(keep.min(self.slots.len())..).flatten() {
			persist(&mut pane, pool);
		}
		self.slots.resize_with(keep, || None);
		if self.active.is_some_and(|active| active >= keep) {
			self.active = None;
		}
		debug!(window = %self.name, from = %self.layout, to = %new, "layout changed");
		self.layout = new;
		self.readjust(self.area, true);
		Ok(())
	}
}

fn persist(pane: &mut Pane, pool: &mut dyn BufferPool) {
	if let Some(buffer) = pane.buffer().and_then(|id| pool.get_buffer_mut(id)) {
		pane.persist_into(buffer);
	}
}
