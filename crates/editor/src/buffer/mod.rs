//! Shared buffer pool.
//!
//! Panes never own text. They hold a [`BufferId`] into a pool implementing
//! [`BufferPool`] and copy content in and out explicitly, so two panes bound
//! to the same buffer see each other's edits after a rebind.

mod encoding;
mod pool;

use std::path::{Path, PathBuf};

use ropey::Rope;
pub use encoding::{EncodingError, decode, encode};
pub use pool::{BackupPolicy, FilePool};
use tessel_primitives::{BufferId, Encoding};

use crate::Result;


/// Document content plus save metadata.
#[derive(Debug, Clone)]
pub struct Buffer {
	id: BufferId,
	filename: Option<PathBuf>,
	content: Rope,
	dirty: bool,
	encoding: Encoding,
	has_backup: bool,
	untitled_index: usize,
}

impl Buffer {
	pub(crate) fn new(id: BufferId, filename: Option<PathBuf>, content: Rope, encoding: Encoding, untitled_index: usize) -> Self {
		Self {
			id,
			filename,
			content,
			dirty: false,
			encoding,
			has_backup: false,
			untitled_index,
		}
	}

	pub fn id(&self) -> BufferId {
		self.id
	}

	pub fn filename(&self) -> Option<&Path> {
		self.filename.as_deref()
	}

	pub fn content(&self) -> &Rope {
		&self.content
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn encoding(&self) -> Encoding {
		self.encoding
	}

	pub fn has_backup(&self) -> bool {
		self.has_backup
	}

	pub fn is_untitled(&self) -> bool {
		self.filename.is_none()
	}

	pub fn is_empty(&self) -> bool {
		self.content.len_chars() == 0
	}

	/// Display name: the file name, or `untitled-N` for unsaved buffers.
	pub fn name(&self) -> String {
		match &self.filename {
			Some(path) => path
				.file_name()
				.map(|name| name.to_string_lossy().into_owned())
				.unwrap_or_else(|| path.display().to_string()),
			None => format!("untitled-{}", self.untitled_index),
		}
	}

	/// Replaces the content, marking the buffer dirty if anything changed.
	pub fn set_content(&mut self, content: Rope) {
		if self.content != content {
			self.content = content;
			self.dirty = true;
		}
	}

	pub fn set_encoding(&mut self, encoding: Encoding) {
		if self.encoding != encoding {
			self.encoding = encoding;
			self.dirty = true;
		}
	}

	/// Puts back an encoding changed ahead of a save that then failed.
	pub(crate) fn revert_encoding(&mut self, encoding: Encoding, dirty: bool) {
		self.encoding = encoding;
		self.dirty = dirty;
	}

	pub(crate) fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	pub(crate) fn set_has_backup(&mut self, has_backup: bool) {
		self.has_backup = has_backup;
	}

	pub(crate) fn mark_saved(&mut self, path: PathBuf) {
		self.filename = Some(path);
		self.dirty = false;
	}
}

/// Request for [`BufferPool::create_buffer`].
#[derive(Debug, Clone, Default)]
pub struct NewBuffer {
	/// Backing file; `None` creates an untitled buffer.
	pub filename: Option<PathBuf>,
	/// Encoding used to decode the file; defaults to UTF-8.
	pub encoding: Option<Encoding>,
	/// Result of a prior [`BufferPool::backup_exists`] check.
	pub has_backup: bool,
}

impl NewBuffer {
	pub fn untitled() -> Self {
		Self::default()
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			filename: Some(path.into()),
			..Self::default()
		}
	}

	pub fn with_encoding(mut self, encoding: Encoding) -> Self {
		self.encoding = Some(encoding);
		self
	}

	pub fn with_backup(mut self, has_backup: bool) -> Self {
		self.has_backup = has_backup;
		self
	}
}

/// The buffer pool consumed by the workspace.
///
/// All buffer access from panes and dialogs goes through this trait.
pub trait BufferPool {
	/// Creates a buffer, or returns the existing one for an already-open file.
	///
	/// Returns `Ok(None)` when creation was cancelled (see [`BackupPolicy`]).
	/// On error nothing is registered.
	fn create_buffer(&mut self, request: NewBuffer) -> Result<Option<BufferId>>;

	fn get_buffer_by_filename(&self, path: &Path) -> Option<BufferId>;

	fn get_buffer_by_id(&self, id: BufferId) -> Option<&Buffer>;

	fn get_buffer_mut(&mut self, id: BufferId) -> Option<&mut Buffer>;

	/// Buffer ids in creation order.
	fn buffer_ids(&self) -> Vec<BufferId>;

	/// Writes every dirty buffer that has a file name.
	///
	/// Returns how many dirty buffers could not be persisted.
	fn write_all_wherever_possible(&mut self) -> usize;

	/// Writes `id` to `path` and makes `path` its file name.
	///
	/// On failure the buffer's dirty flag and file name are untouched.
	fn save_buffer(&mut self, id: BufferId, path: &Path) -> Result<()>;

	/// Drops a buffer from the pool.
	fn discard_buffer(&mut self, id: BufferId);

	/// Whether `path` holds binary data when read as `encoding`.
	fn is_binary(&self, path: &Path, encoding: Encoding) -> bool;

	fn backup_exists(&self, path: &Path) -> bool;

	fn unsaved_count(&self) -> usize {
		self.buffer_ids()
			.into_iter()
			.filter(|&id| self.get_buffer_by_id(id).is_some_and(Buffer::is_dirty))
			.count()
	}
}
