use std::io;
use std::path::PathBuf;

use tessel_primitives::BufferId;
use thiserror::Error;

use crate::buffer::EncodingError;

/// User-facing workspace failures.
///
/// Every variant is non-fatal: the workspace reports it as an alert and
/// leaves its state as it was before the failed operation.
#[derive(Debug, Error)]
pub enum WorkspaceError {
	#[error("Pane {} is not available", .0 + 1)]
	PaneNotAvailable(usize),
	#[error("Tab {} is not available", .0 + 1)]
	TabNotAvailable(usize),
	#[error("Insufficient screen space: {required_width}x{required_height} required, {width}x{height} available")]
	InsufficientScreenSpace {
		required_width: u16,
		required_height: u16,
		width: u16,
		height: u16,
	},
	#[error("Invalid line number specified")]
	InvalidLineNumber,
	#[error("Incorrect tab size: should be in [1,9]")]
	InvalidTabSize,
	#[error("Cannot open binary file!")]
	BinaryFile(PathBuf),
	#[error("No free editors available: switch layout or close an editor")]
	NoFreePane,
	#[error("The selected file/directory does not exist")]
	NotFound(PathBuf),
	#[error("Invalid filename")]
	InvalidFilename(PathBuf),
	#[error(transparent)]
	Encoding(#[from] EncodingError),
	#[error("Could not read {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("An error occurred while saving file")]
	Save {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("{0} buffer(s) were not saved: use save-as for untitled buffers")]
	NotSaved(usize),
	#[error("One or more files need to be saved first")]
	LayoutBlocked,
	#[error("No active editor")]
	NoActivePane,
	#[error("Buffer {0} is no longer open")]
	BufferNotFound(BufferId),
	#[error("Close all windows to quit application or use force-quit")]
	OtherPanesOpen,
	#[error("No recent files")]
	NoRecentFiles,
	#[error("No project is open")]
	NoProject,
	#[error("Unknown command: {0}")]
	UnknownCommand(String),
	#[error("terminal error: {0}")]
	Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
