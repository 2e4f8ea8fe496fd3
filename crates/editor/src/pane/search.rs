//! Plain-text search and replace within a pane's working copy.

use super::{Cursor, Pane};

fn chars_match(a: char, b: char, match_case: bool) -> bool {
	a == b || (!match_case && a.to_lowercase().eq(b.to_lowercase()))
}

fn matches_at(haystack: &[char], at: usize, needle: &[char], match_case: bool) -> bool {
	haystack.len() >= at + needle.len()
		&& haystack[at..at + needle.len()]
			.iter()
			.zip(needle)
			.all(|(&a, &b)| chars_match(a, b, match_case))
}

impl Pane {
	fn needle_at_cursor(&self, needle: &[char], match_case: bool) -> bool {
		let haystack: Vec<char> = self.content.chars().collect();
		matches_at(&haystack, self.char_index(self.cursor), needle, match_case)
	}

	/// Moves the cursor to the next occurrence of `needle` after the cursor,
	/// wrapping around the end of the document.
	pub fn find_next(&mut self, needle: &str, match_case: bool) -> Option<Cursor> {
		let needle: Vec<char> = needle.chars().collect();
		if needle.is_empty() {
			return None;
		}
		let haystack: Vec<char> = self.content.chars().collect();
		let len = haystack.len();
		if len == 0 {
			return None;
		}
		let start = self.char_index(self.cursor);
		let found = (1..=len)
			.map(|step| (start + step) % len)
			.find(|&at| matches_at(&haystack, at, &needle, match_case))?;
		let cursor = self.cursor_at(found);
		self.set_cursor(cursor);
		Some(cursor)
	}

	/// Replaces the match under the cursor, then moves to the next one.
	///
	/// Returns `false` when the cursor is not on a match; the caller should
	/// search first.
	pub fn replace_current(&mut self, needle: &str, replacement: &str, match_case: bool) -> bool {
		let needle_chars: Vec<char> = needle.chars().collect();
		if needle_chars.is_empty() || !self.needle_at_cursor(&needle_chars, match_case) {
			return false;
		}
		let at = self.char_index(self.cursor);
		self.content.remove(at..at + needle_chars.len());
		self.content.insert(at, replacement);
		self.modified = true;
		let after = self.cursor_at(at + replacement.chars().count());
		self.set_cursor(after);
		self.find_next_from_cursor(needle, match_case);
		true
	}

	fn find_next_from_cursor(&mut self, needle: &str, match_case: bool) {
		// find_next searches strictly after the cursor; step back one so a
		// match right after the replacement is found too.
		let at = self.char_index(self.cursor);
		if at > 0 {
			let previous = self.cursor_at(at - 1);
			self.cursor = previous;
		}
		if self.find_next(needle, match_case).is_none() {
			let restore = self.cursor_at(at.min(self.content.len_chars()));
			self.set_cursor(restore);
		}
	}

	/// Replaces every occurrence. Returns the number of replacements.
	pub fn replace_all(&mut self, needle: &str, replacement: &str, match_case: bool) -> usize {
		let needle: Vec<char> = needle.chars().collect();
		if needle.is_empty() {
			return 0;
		}
		let haystack: Vec<char> = self.content.chars().collect();
		let mut out = String::with_capacity(haystack.len());
		let mut count = 0;
		let mut i = 0;
		while i < haystack.len() {
			if matches_at(&haystack, i, &needle, match_case) {
				out.push_str(replacement);
				i += needle.len();
				count += 1;
			} else {
				out.push(haystack[i]);
				i += 1;
			}
		}
		if count > 0 {
			self.content = ropey::Rope::from_str(&out);
			self.modified = true;
			let cursor = self.cursor;
			self.set_cursor(cursor);
		}
		count
	}
}
