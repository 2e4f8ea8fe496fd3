//! Leaf widgets composed into dialog forms.

use tessel_primitives::{Key, KeyCode};

/// What a widget did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
	/// The widget's value changed.
	Changed,
	/// The key was handled without changing the value.
	Unchanged,
	Ignored,
}

/// Single-line text input with an optional character filter.
#[derive(Debug, Clone, Default)]
pub struct TextField {
	value: String,
	/// Cursor position in chars.
	cursor: usize,
	accept: Option<fn(char) -> bool>,
}

impl TextField {
	pub fn new(value: impl Into<String>) -> Self {
		let value = value.into();
		let cursor = value.chars().count();
		Self {
			value,
			cursor,
			accept: None,
		}
	}

	/// Restricts typed characters to those `accept` allows.
	pub fn with_filter(mut self, accept: fn(char) -> bool) -> Self {
		self.accept = Some(accept);
		self
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn set_value(&mut self, value: impl Into<String>) {
		self.value = value.into();
		self.cursor = self.value.chars().count();
	}

	fn byte_at(&self, char_index: usize) -> usize {
		self.value
			.char_indices()
			.nth(char_index)
			.map_or(self.value.len(), |(i, _)| i)
	}

	pub fn handle_key(&mut self, key: Key) -> WidgetEvent {
		if let Some(ch) = key.printable() {
			if self.accept.is_some_and(|accept| !accept(ch)) {
				return WidgetEvent::Unchanged;
			}
			let at = self.byte_at(self.cursor);
			self.value.insert(at, ch);
			self.cursor += 1;
			return WidgetEvent::Changed;
		}
		if !key.modifiers.is_empty() {
			return WidgetEvent::Ignored;
		}
		let len = self.value.chars().count();
		match key.code {
			KeyCode::Backspace if self.cursor > 0 => {
				self.cursor -= 1;
				let at = self.byte_at(self.cursor);
				self.value.remove(at);
				WidgetEvent::Changed
			}
			KeyCode::Delete if self.cursor < len => {
				let at = self.byte_at(self.cursor);
				self.value.remove(at);
				WidgetEvent::Changed
			}
			KeyCode::Left if self.cursor > 0 => {
				self.cursor -= 1;
				WidgetEvent::Unchanged
			}
			KeyCode::Right if self.cursor < len => {
				self.cursor += 1;
				WidgetEvent::Unchanged
			}
			KeyCode::Home => {
				self.cursor = 0;
				WidgetEvent::Unchanged
			}
			KeyCode::End => {
				self.cursor = len;
				WidgetEvent::Unchanged
			}
			KeyCode::Backspace | KeyCode::Delete | KeyCode::Left | KeyCode::Right => WidgetEvent::Unchanged,
			_ => WidgetEvent::Ignored,
		}
	}
}

#[derive(Debug, Clone)]
pub struct CheckBox {
	pub label: String,
	pub checked: bool,
}

impl CheckBox {
	pub fn new(label: impl Into<String>, checked: bool) -> Self {
		Self {
			label: label.into(),
			checked,
		}
	}

	pub fn handle_key(&mut self, key: Key) -> WidgetEvent {
		if key == Key::char(' ') {
			self.checked = !self.checked;
			WidgetEvent::Changed
		} else {
			WidgetEvent::Ignored
		}
	}
}

#[derive(Debug, Clone)]
pub struct ListItem {
	pub label: String,
	/// Non-selectable items (headings, directories in the explorer) are
	/// shown but skipped by the highlight.
	pub selectable: bool,
}

impl ListItem {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			selectable: true,
		}
	}

	pub fn heading(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			selectable: false,
		}
	}
}

/// Indices of `labels` containing `query`, compared case-insensitively, in
/// their original order.
pub fn filter_matches<'a>(labels: impl IntoIterator<Item = &'a str>, query: &str) -> Vec<usize> {
	let query = query.to_lowercase();
	labels
		.into_iter()
		.enumerate()
		.filter(|(_, label)| query.is_empty() || label.to_lowercase().contains(&query))
		.map(|(index, _)| index)
		.collect()
}

/// Scrollable, filterable list with a highlight and an optional tick mark.
#[derive(Debug, Clone, Default)]
pub struct ListBox {
	items: Vec<ListItem>,
	/// Item indices passing the filter.
	visible: Vec<usize>,
	/// Position within `visible`.
	highlight: Option<usize>,
	ticked: Option<usize>,
	scroll: usize,
	height: usize,
	placeholder: String,
}

impl ListBox {
	pub fn new(items: Vec<ListItem>, placeholder: impl Into<String>) -> Self {
		let mut list = Self {
			placeholder: placeholder.into(),
			height: 1,
			..Self::default()
		};
		list.set_items(items);
		list
	}

	pub fn set_items(&mut self, items: Vec<ListItem>) {
		self.items = items;
		self.ticked = None;
		self.set_filter("");
	}

	/// Shows only items matching `query`; the highlight moves to the first
	/// selectable match.
	pub fn set_filter(&mut self, query: &str) {
		self.visible = filter_matches(self.items.iter().map(|item| item.label.as_str()), query);
		self.scroll = 0;
		self.highlight = self.next_selectable(0, true);
		self.scroll_to_highlight();
	}

	pub(crate) fn set_height(&mut self, height: u16) {
		self.height = usize::from(height.max(1));
		self.scroll_to_highlight();
	}

	pub fn items(&self) -> &[ListItem] {
		&self.items
	}

	pub fn placeholder(&self) -> &str {
		&self.placeholder
	}

	/// Visible `(item index, item)` pairs within the scroll window.
	pub fn window(&self) -> impl Iterator<Item = (usize, &ListItem)> {
		self.visible
			.iter()
			.skip(self.scroll)
			.take(self.height)
			.map(|&index| (index, &self.items[index]))
	}

	pub fn visible_len(&self) -> usize {
		self.visible.len()
	}

	/// Item index under the highlight.
	pub fn highlighted(&self) -> Option<usize> {
		self.visible.get(self.highlight?).copied()
	}

	pub fn ticked(&self) -> Option<usize> {
		self.ticked
	}

	pub fn tick(&mut self, index: usize) {
		if index < self.items.len() {
			self.ticked = Some(index);
		}
	}

	/// Ticks the highlighted item. Returns whether anything changed.
	pub fn tick_highlighted(&mut self) -> bool {
		let Some(index) = self.highlighted() else {
			return false;
		};
		let changed = self.ticked != Some(index);
		self.ticked = Some(index);
		changed
	}

	/// Moves the highlight onto item `index` if it is visible and selectable.
	pub fn highlight_item(&mut self, index: usize) {
		if let Some(pos) = self.visible.iter().position(|&i| i == index)
			&& self.items[index].selectable
		{
			self.highlight = Some(pos);
			self.scroll_to_highlight();
		}
	}

	fn next_selectable(&self, from: usize, forward: bool) -> Option<usize> {
		let selectable = |pos: &usize| self.items[self.visible[*pos]].selectable;
		if forward {
			(from..self.visible.len()).find(selectable)
		} else {
			(0..=from.min(self.visible.len().checked_sub(1)?)).rev().find(selectable)
		}
	}

	fn scroll_to_highlight(&mut self) {
		let Some(pos) = self.highlight else {
			return;
		};
		if pos < self.scroll {
			self.scroll = pos;
		} else if pos >= self.scroll + self.height {
			self.scroll = pos + 1 - self.height;
		}
	}

	fn move_highlight(&mut self, target: Option<usize>) -> WidgetEvent {
		match target {
			Some(pos) if Some(pos) != self.highlight => {
				self.highlight = Some(pos);
				self.scroll_to_highlight();
				WidgetEvent::Changed
			}
			_ => WidgetEvent::Unchanged,
		}
	}

	pub fn handle_key(&mut self, key: Key) -> WidgetEvent {
		if !key.modifiers.is_empty() {
			return WidgetEvent::Ignored;
		}
		let Some(current) = self.highlight else {
			return match key.code {
				KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home | KeyCode::End => {
					WidgetEvent::Unchanged
				}
				_ => WidgetEvent::Ignored,
			};
		};
		let page = self.height.max(1);
		let last = self.visible.len().saturating_sub(1);
		let target = match key.code {
			KeyCode::Down => self.next_selectable(current + 1, true),
			KeyCode::Up if current > 0 => self.next_selectable(current - 1, false),
			KeyCode::Up => None,
			KeyCode::PageDown => self
				.next_selectable((current + page).min(last), false)
				.filter(|&pos| pos > current)
				.or_else(|| self.next_selectable(current + 1, true)),
			KeyCode::PageUp => self
				.next_selectable(current.saturating_sub(page), true)
				.filter(|&pos| pos < current),
			KeyCode::Home => self.next_selectable(0, true),
			KeyCode::End => self.next_selectable(last, false),
			_ => return WidgetEvent::Ignored,
		};
		self.move_highlight(target)
	}
}
