//! Ordered widget registry with a single focus.

use tessel_primitives::{Key, Rect};

use super::widgets::{CheckBox, ListBox, TextField, WidgetEvent};

#[derive(Debug, Clone)]
pub enum Widget {
	Label(String),
	Text(TextField),
	Check(CheckBox),
	List(ListBox),
}

impl Widget {
	fn focusable(&self) -> bool {
		!matches!(self, Widget::Label(_))
	}

	fn handle_key(&mut self, key: Key) -> WidgetEvent {
		match self {
			Widget::Label(_) => WidgetEvent::Ignored,
			Widget::Text(field) => field.handle_key(key),
			Widget::Check(check) => check.handle_key(key),
			Widget::List(list) => list.handle_key(key),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Field {
	pub name: &'static str,
	/// Position relative to the dialog's inner area.
	pub rect: Rect,
	pub widget: Widget,
}

/// The widgets of one dialog, in tab order.
///
/// Focus is a single index into the registry, so at most one widget is ever
/// focused.
#[derive(Debug, Clone, Default)]
pub struct Form {
	fields: Vec<Field>,
	focus: Option<usize>,
}

impl Form {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a widget. The first focusable widget receives focus.
	pub fn with(mut self, name: &'static str, rect: Rect, mut widget: Widget) -> Self {
		if let Widget::List(list) = &mut widget {
			list.set_height(rect.height);
		}
		if self.focus.is_none() && widget.focusable() {
			self.focus = Some(self.fields.len());
		}
		self.fields.push(Field { name, rect, widget });
		self
	}

	pub fn label(self, rect: Rect, text: impl Into<String>) -> Self {
		self.with("", rect, Widget::Label(text.into()))
	}

	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn focused_index(&self) -> Option<usize> {
		self.focus
	}

	pub fn focused_name(&self) -> Option<&'static str> {
		Some(self.fields.get(self.focus?)?.name)
	}

	pub fn focused_widget(&self) -> Option<&Widget> {
		Some(&self.fields.get(self.focus?)?.widget)
	}

	pub fn focus(&mut self, name: &str) {
		if let Some(index) = self.fields.iter().position(|f| f.name == name && f.widget.focusable()) {
			self.focus = Some(index);
		}
	}

	fn cycle(&mut self, forward: bool) {
		let len = self.fields.len();
		let Some(current) = self.focus else {
			return;
		};
		let step = if forward { 1 } else { len - 1 };
		let mut index = current;
		for _ in 0..len {
			index = (index + step) % len;
			if self.fields[index].widget.focusable() {
				self.focus = Some(index);
				return;
			}
		}
	}

	pub fn focus_next(&mut self) {
		self.cycle(true);
	}

	pub fn focus_previous(&mut self) {
		self.cycle(false);
	}

	fn widget(&self, name: &str) -> Option<&Widget> {
		self.fields.iter().find(|f| f.name == name).map(|f| &f.widget)
	}

	fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
		self.fields.iter_mut().find(|f| f.name == name).map(|f| &mut f.widget)
	}

	/// Value of a text field; empty if there is none by that name.
	pub fn text(&self, name: &str) -> &str {
		match self.widget(name) {
			Some(Widget::Text(field)) => field.value(),
			_ => "",
		}
	}

	pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
		if let Some(Widget::Text(field)) = self.widget_mut(name) {
			field.set_value(value);
		}
	}

	pub fn checked(&self, name: &str) -> bool {
		matches!(self.widget(name), Some(Widget::Check(check)) if check.checked)
	}

	pub fn list(&self, name: &str) -> Option<&ListBox> {
		match self.widget(name)? {
			Widget::List(list) => Some(list),
			_ => None,
		}
	}

	pub fn list_mut(&mut self, name: &str) -> Option<&mut ListBox> {
		match self.widget_mut(name)? {
			Widget::List(list) => Some(list),
			_ => None,
		}
	}

	/// Offers `key` to the focused widget. Returns the widget's name and
	/// what it did, or `None` without a focused widget.
	pub fn handle_key(&mut self, key: Key) -> Option<(&'static str, WidgetEvent)> {
		let field = self.fields.get_mut(self.focus?)?;
		Some((field.name, field.widget.handle_key(key)))
	}
}
