//! Paints the workspace onto a [`Canvas`].
//!
//! Painting is a pure function of workspace state. Layers are drawn bottom
//! up: title and status rows, panes with their dividers, the open dialog,
//! then the alert. The terminal cursor follows the focused text input.

mod canvas;

pub use canvas::{Canvas, Cell};
use tessel_primitives::{Position, Rect};
use unicode_width::UnicodeWidthChar;

use crate::dialog::{Alert, Dialog, DialogKind, Form, ListBox, Question, TextField, Widget};
use crate::layout;
use crate::pane::Pane;
use crate::theme::{Style, Theme, ThemeToken};
use crate::window::{StatusLine, Window};
use crate::workspace::Workspace;


/// Display width of `ch` in cells; control characters count as one blank.
fn char_width(ch: char) -> u16 {
	if ch.is_control() { 1 } else { ch.width().unwrap_or(0) as u16 }
}

fn display(ch: char) -> char {
	if ch.is_control() { ' ' } else { ch }
}

fn str_width(text: &str) -> u16 {
	text.chars().map(char_width).fold(0, u16::saturating_add)
}

impl Workspace {
	/// Renders the current state into a fresh frame.
	pub fn paint(&self) -> Canvas {
		let (width, height) = self.size;
		let mut canvas = Canvas::new(width, height);
		let window = self.active_window();
		let status = StatusLine::compose(window.active_pane(), self.pool());

		self.paint_bars(&mut canvas, &status);
		paint_window(&mut canvas, window, &self.theme);

		if let Some(dialog) = &self.dialog {
			paint_dialog(&mut canvas, dialog, &self.theme);
		} else if let Some(pane) = window.active_pane() {
			canvas.set_cursor(pane_cursor(pane));
		}
		if let Some(alert) = &self.alert {
			paint_alert(&mut canvas, alert, &self.theme);
			canvas.set_cursor(None);
		}
		canvas
	}

	fn paint_bars(&self, canvas: &mut Canvas, status: &StatusLine) {
		let width = canvas.width();
		if canvas.height() == 0 {
			return;
		}
		let mut title = status.title.clone();
		if self.windows.len() > 1 {
			title.push_str(&format!(
				"  [{} {}/{}]",
				self.active_window().name(),
				self.active_window + 1,
				self.windows.len()
			));
		}
		let style = self.theme.style(ThemeToken::Titlebar);
		canvas.fill(Rect::new(0, 0, width, 1), ' ', style);
		canvas.put_str(1, 0, &title, width.saturating_sub(1), style);

		if canvas.height() < 2 {
			return;
		}
		let row = canvas.height() - 1;
		let style = self.theme.style(ThemeToken::Statusbar);
		canvas.fill(Rect::new(0, row, width, 1), ' ', style);
		canvas.put_str(0, row, &status.status, width, style);
	}
}

fn paint_window(canvas: &mut Canvas, window: &Window, theme: &Theme) {
	let area = window.area();
	let rects = layout::dimensions(window.layout(), area);
	for (index, rect) in rects.iter().enumerate() {
		match window.pane(index) {
			Some(pane) => paint_pane(canvas, pane, theme),
			None => paint_empty_slot(canvas, index, *rect, theme),
		}
	}
	let style = theme.style(ThemeToken::Division);
	for divider in layout::dividers(window.layout(), area) {
		let ch = if divider.width == 1 { '│' } else { '─' };
		canvas.fill(divider, ch, style);
	}
}

fn paint_empty_slot(canvas: &mut Canvas, index: usize, rect: Rect, theme: &Theme) {
	let style = theme.style(ThemeToken::Placeholder);
	canvas.fill(rect, ' ', style);
	if rect.is_empty() {
		return;
	}
	let text = format!("Pane {} (empty)", index + 1);
	let x = rect.x + rect.width.saturating_sub(str_width(&text)) / 2;
	let y = rect.y + rect.height / 2;
	canvas.put_str(x, y, &text, rect.right() - x, style);
}

fn paint_pane(canvas: &mut Canvas, pane: &Pane, theme: &Theme) {
	let area = pane.area();
	let text_style = theme.style(ThemeToken::Text);
	let number_style = theme.style(ThemeToken::LineNumber);
	canvas.fill(area, ' ', text_style);

	let gutter = pane.gutter_width().min(area.width);
	let text_x = area.x + gutter;
	let text_width = area.width - gutter;
	let (scroll, hscroll) = pane.scroll();
	let content = pane.content();
	for (offset, row) in (scroll..pane.line_count()).take(usize::from(area.height)).enumerate() {
		let y = area.y + offset as u16;
		if gutter > 0 {
			let number = format!("{:>width$} ", row + 1, width = usize::from(gutter - 1));
			canvas.put_str(area.x, y, &number, gutter, number_style);
		}
		let visible: String = content
			.line(row)
			.chars()
			.take(pane.line_len(row))
			.skip(hscroll)
			.map(display)
			.collect();
		canvas.put_str(text_x, y, &visible, text_width, text_style);
	}
}

/// Screen position of `pane`'s cursor, if it is scrolled into view.
fn pane_cursor(pane: &Pane) -> Option<Position> {
	let area = pane.area();
	let cursor = pane.cursor();
	let (scroll, hscroll) = pane.scroll();
	if cursor.row < scroll || cursor.row - scroll >= usize::from(area.height) || cursor.col < hscroll {
		return None;
	}
	let before: u16 = pane
		.content()
		.line(cursor.row)
		.chars()
		.take(cursor.col)
		.skip(hscroll)
		.map(char_width)
		.fold(0, u16::saturating_add);
	let x = area.x.saturating_add(pane.gutter_width()).saturating_add(before);
	if x >= area.right() {
		return None;
	}
	Some(Position::new(x, area.y + (cursor.row - scroll) as u16))
}

/// Border box with a centered title.
fn paint_frame(canvas: &mut Canvas, rect: Rect, title: &str, border: Style, title_style: Style) {
	if rect.width < 2 || rect.height < 2 {
		canvas.fill(rect, ' ', border);
		return;
	}
	canvas.fill(rect, ' ', border);
	let (left, right, top, bottom) = (rect.x, rect.right() - 1, rect.y, rect.bottom() - 1);
	for x in left + 1..right {
		for y in [top, bottom] {
			if let Some(cell) = canvas.cell_mut(x, y) {
				*cell = Cell::new('─', border);
			}
		}
	}
	for y in top + 1..bottom {
		for x in [left, right] {
			if let Some(cell) = canvas.cell_mut(x, y) {
				*cell = Cell::new('│', border);
			}
		}
	}
	for (x, y, ch) in [(left, top, '┌'), (right, top, '┐'), (left, bottom, '└'), (right, bottom, '┘')] {
		if let Some(cell) = canvas.cell_mut(x, y) {
			*cell = Cell::new(ch, border);
		}
	}
	if title.is_empty() {
		return;
	}
	let label = format!(" {title} ");
	let room = rect.width.saturating_sub(4);
	let x = left + 2 + room.saturating_sub(str_width(&label)) / 2;
	canvas.put_str(x, top, &label, room, title_style);
}

fn paint_dialog(canvas: &mut Canvas, dialog: &Dialog, theme: &Theme) {
	paint_frame(
		canvas,
		dialog.rect,
		&dialog.title,
		theme.style(ThemeToken::DialogBorder),
		theme.style(ThemeToken::DialogTitle),
	);
	let inner = dialog.inner();
	if let DialogKind::Question(question) = &dialog.kind {
		paint_question(canvas, inner, question, theme);
		return;
	}
	canvas.set_cursor(None);
	paint_form(canvas, inner, &dialog.form, theme);
}

fn paint_form(canvas: &mut Canvas, inner: Rect, form: &Form, theme: &Theme) {
	for (index, field) in form.fields().iter().enumerate() {
		let rect = inner.offset(field.rect);
		let focused = form.focused_index() == Some(index);
		match &field.widget {
			Widget::Label(text) => {
				canvas.put_str(rect.x, rect.y, text, rect.width, theme.style(ThemeToken::FormLabel));
			}
			Widget::Text(input) => {
				let cursor = paint_text_field(canvas, rect, input, focused, theme);
				if focused {
					canvas.set_cursor(cursor);
				}
			}
			Widget::Check(check) => {
				let mark = if check.checked { 'x' } else { ' ' };
				let token = if focused { ThemeToken::FormFieldFocused } else { ThemeToken::FormLabel };
				canvas.put_str(rect.x, rect.y, &format!("[{mark}] {}", check.label), rect.width, theme.style(token));
			}
			Widget::List(list) => paint_list(canvas, rect, list, focused, theme),
		}
	}
}

/// Draws a one-line input scrolled so its cursor stays visible; returns
/// the cursor's screen position.
fn paint_text_field(canvas: &mut Canvas, rect: Rect, input: &TextField, focused: bool, theme: &Theme) -> Option<Position> {
	let token = if focused { ThemeToken::FormFieldFocused } else { ThemeToken::FormField };
	let style = theme.style(token);
	let line = Rect::new(rect.x, rect.y, rect.width, rect.height.min(1));
	canvas.fill(line, ' ', style);
	if rect.width == 0 {
		return None;
	}
	let chars: Vec<char> = input.value().chars().collect();
	let cursor = input.cursor().min(chars.len());
	let mut start = 0;
	while start < cursor && str_width(&chars[start..cursor].iter().collect::<String>()) >= rect.width {
		start += 1;
	}
	let shown: String = chars[start..].iter().copied().map(display).collect();
	canvas.put_str(rect.x, rect.y, &shown, rect.width, style);
	let before: String = chars[start..cursor].iter().collect();
	Some(Position::new(rect.x + str_width(&before), rect.y))
}

fn paint_list(canvas: &mut Canvas, rect: Rect, list: &ListBox, focused: bool, theme: &Theme) {
	let base = theme.style(ThemeToken::ListItem);
	canvas.fill(rect, ' ', base);
	if list.visible_len() == 0 {
		canvas.put_str(rect.x + 1, rect.y, list.placeholder(), rect.width.saturating_sub(1), theme.style(ThemeToken::Placeholder));
		return;
	}
	let highlight = if focused { ThemeToken::ListHighlight } else { ThemeToken::ListSelected };
	for (offset, (index, item)) in list.window().enumerate() {
		let y = rect.y + offset as u16;
		let style = if list.highlighted() == Some(index) {
			theme.style(highlight)
		} else if !item.selectable {
			base.bold()
		} else {
			base
		};
		canvas.fill(Rect::new(rect.x, y, rect.width, 1), ' ', style);
		let marker = if list.ticked() == Some(index) { "* " } else { "  " };
		canvas.put_str(rect.x, y, &format!("{marker}{}", item.label), rect.width, style);
	}
}

fn paint_question(canvas: &mut Canvas, inner: Rect, question: &Question, theme: &Theme) {
	canvas.set_cursor(None);
	let label = theme.style(ThemeToken::FormLabel);
	canvas.put_str(inner.x + 2, inner.y + 1, &question.message, inner.width.saturating_sub(4), label);

	let buttons: Vec<String> = question.choices.iter().map(|choice| format!("[ {choice} ]")).collect();
	let total = buttons.iter().map(|b| str_width(b)).fold(0, u16::saturating_add) + 2 * buttons.len().saturating_sub(1) as u16;
	let mut x = inner.x + inner.width.saturating_sub(total) / 2;
	let y = inner.y + inner.height.saturating_sub(2);
	for (index, button) in buttons.iter().enumerate() {
		let token = if index == question.selected { ThemeToken::ListHighlight } else { ThemeToken::FormField };
		x = canvas.put_str(x, y, button, inner.right().saturating_sub(x), theme.style(token)) + 2;
	}
}

fn paint_alert(canvas: &mut Canvas, alert: &Alert, theme: &Theme) {
	let (width, height) = alert.size();
	let Some(rect) = canvas.area().centered(width.min(canvas.width()), height.min(canvas.height())) else {
		return;
	};
	let style = theme.style(ThemeToken::Alert);
	paint_frame(canvas, rect, "Error", style, style);
	let inner = rect.inner(1);
	canvas.put_str(inner.x + 2, inner.y + 1, &alert.message, inner.width.saturating_sub(4), style);
}
