use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use ropey::Rope;
use tessel_primitives::{BufferId, Encoding};
use tracing::{debug, warn};

use super::{Buffer, BufferPool, NewBuffer, decode, encode};
use crate::{Result, WorkspaceError};

/// Bytes inspected by [`BufferPool::is_binary`].
const BINARY_SNIFF_LEN: usize = 8000;

/// What [`FilePool::create_buffer`] does when a `.bak` file sits next to the
/// requested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupPolicy {
	/// Load the file itself and remember that a backup exists.
	#[default]
	Ignore,
	/// Load the backup's content; the buffer starts dirty.
	Restore,
	/// Cancel the creation.
	Refuse,
}

/// Buffer pool backed by the local file system.
#[derive(Debug)]
pub struct FilePool {
	buffers: Vec<Buffer>,
	next_id: u64,
	next_untitled: usize,
	backup_policy: BackupPolicy,
	cwd: PathBuf,
}

impl FilePool {
	/// Creates an empty pool resolving relative paths against `cwd`.
	pub fn new(cwd: impl Into<PathBuf>) -> Self {
		Self {
			buffers: Vec::new(),
			next_id: 1,
			next_untitled: 1,
			backup_policy: BackupPolicy::default(),
			cwd: cwd.into(),
		}
	}

	pub fn with_backup_policy(mut self, policy: BackupPolicy) -> Self {
		self.backup_policy = policy;
		self
	}

	/// Absolute, canonical form of `path` used as the pool's lookup key.
	pub fn normalize(&self, path: &Path) -> PathBuf {
		let absolute = if path.is_absolute() { path.to_path_buf() } else { self.cwd.join(path) };
		if let Ok(canonical) = fs::canonicalize(&absolute) {
			return canonical;
		}
		// Not on disk yet: canonicalize the parent so the key survives creation.
		match (absolute.parent(), absolute.file_name()) {
			(Some(parent), Some(name)) => fs::canonicalize(parent)
				.map(|parent| parent.join(name))
				.unwrap_or(absolute),
			_ => absolute,
		}
	}

	fn index_of(&self, id: BufferId) -> Option<usize> {
		self.buffers.iter().position(|b| b.id == id)
	}

	fn allocate(&mut self, filename: Option<PathBuf>, content: Rope, encoding: Encoding) -> &mut Buffer {
		let id = BufferId(self.next_id);
		self.next_id += 1;
		let untitled_index = if filename.is_none() {
			let index = self.next_untitled;
			self.next_untitled += 1;
			index
		} else {
			0
		};
		self.buffers.push(Buffer::new(id, filename, content, encoding, untitled_index));
		let last = self.buffers.len() - 1;
		&mut self.buffers[last]
	}

	fn read_text(path: &Path, encoding: Encoding) -> Result<String> {
		let bytes = fs::read(path).map_err(|source| WorkspaceError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(decode(&bytes, encoding)?)
	}
}

fn backup_path(path: &Path) -> PathBuf {
	let mut name = path.as_os_str().to_owned();
	name.push(".bak");
	PathBuf::from(name)
}

impl BufferPool for FilePool {
	fn create_buffer(&mut self, request: NewBuffer) -> Result<Option<BufferId>> {
		let encoding = request.encoding.unwrap_or_default();
		let Some(filename) = request.filename else {
			let buffer = self.allocate(None, Rope::new(), encoding);
			debug!(id = %buffer.id, name = %buffer.name(), "created untitled buffer");
			return Ok(Some(buffer.id));
		};

		let path = self.normalize(&filename);
		if let Some(existing) = self.get_buffer_by_filename(&path) {
			return Ok(Some(existing));
		}

		if request.has_backup && self.backup_policy == BackupPolicy::Refuse {
			debug!(path = %path.display(), "backup present, buffer creation refused");
			return Ok(None);
		}

		let restore = request.has_backup && self.backup_policy == BackupPolicy::Restore;
		let (text, dirty) = if restore {
			(Self::read_text(&backup_path(&path), encoding)?, true)
		} else if path.is_file() {
			(Self::read_text(&path, encoding)?, false)
		} else {
			// New file: nothing on disk until the first save.
			(String::new(), true)
		};

		let buffer = self.allocate(Some(path), Rope::from_str(&text), encoding);
		buffer.set_has_backup(request.has_backup);
		if dirty {
			buffer.mark_dirty();
		}
		debug!(id = %buffer.id, path = ?buffer.filename, %encoding, restore, "created file buffer");
		Ok(Some(buffer.id))
	}

	fn get_buffer_by_filename(&self, path: &Path) -> Option<BufferId> {
		let path = self.normalize(path);
		self.buffers
			.iter()
			.find(|b| b.filename.as_deref() == Some(path.as_path()))
			.map(|b| b.id)
	}

	fn get_buffer_by_id(&self, id: BufferId) -> Option<&Buffer> {
		self.buffers.iter().find(|b| b.id == id)
	}

	fn get_buffer_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
		self.buffers.iter_mut().find(|b| b.id == id)
	}

	fn buffer_ids(&self) -> Vec<BufferId> {
		self.buffers.iter().map(|b| b.id).collect()
	}

	fn write_all_wherever_possible(&mut self) -> usize {
		let mut failed = 0;
		for id in self.buffer_ids() {
			let Some(buffer) = self.get_buffer_by_id(id) else {
				continue;
			};
			if !buffer.is_dirty() {
				continue;
			}
			let Some(path) = buffer.filename.clone() else {
				failed += 1;
				continue;
			};
			if let Err(error) = self.save_buffer(id, &path) {
				warn!(%id, path = %path.display(), %error, "save all: buffer not written");
				failed += 1;
			}
		}
		failed
	}

	fn save_buffer(&mut self, id: BufferId, path: &Path) -> Result<()> {
		let path = self.normalize(path);
		let Some(index) = self.index_of(id) else {
			return Ok(());
		};
		let buffer = &self.buffers[index];
		let bytes = encode(&buffer.content.to_string(), buffer.encoding)?;
		fs::write(&path, bytes).map_err(|source| WorkspaceError::Save {
			path: path.clone(),
			source,
		})?;
		debug!(%id, path = %path.display(), "buffer saved");
		self.buffers[index].mark_saved(path);
		Ok(())
	}

	fn discard_buffer(&mut self, id: BufferId) {
		if let Some(index) = self.index_of(id) {
			let buffer = self.buffers.remove(index);
			debug!(%id, name = %buffer.name(), "buffer discarded");
		}
	}

	fn is_binary(&self, path: &Path, encoding: Encoding) -> bool {
		let path = self.normalize(path);
		let Ok(file) = fs::File::open(&path) else {
			return false;
		};
		let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
		if file.take(BINARY_SNIFF_LEN as u64).read_to_end(&mut head).is_err() {
			return false;
		}
		// A NUL code unit, not a NUL byte: wide encodings are full of zero bytes.
		let unit = match encoding {
			Encoding::Utf16 => 2,
			Encoding::Utf32 => 4,
			_ => 1,
		};
		head.chunks_exact(unit).any(|chunk| chunk.iter().all(|&b| b == 0))
	}

	fn backup_exists(&self, path: &Path) -> bool {
		backup_path(&self.normalize(path)).is_file()
	}
}
