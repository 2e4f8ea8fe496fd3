#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Tiling workspace core for the tessel terminal editor.
//!
//! This crate owns everything between the terminal and the files on disk:
//! layouts and their geometry, panes bound to pooled buffers, the modal
//! dialog set and the event loop that routes keys between them.
//!
//! # Main Types
//!
//! - [`Workspace`] - The application context: tabs, dialog, alert and pool
//! - [`BufferPool`] - Storage and lookup of open buffers ([`FilePool`] on disk)
//! - [`Terminal`] - The surface the workspace reads events from and paints to
//!
//! # Architecture
//!
//! ```text
//! Workspace
//! ├── windows: Vec<Window>         // tabs, each a layout of up to 6 panes
//! ├── pool: Box<dyn BufferPool>    // buffers shared between panes
//! ├── dialog: Option<Dialog>       // at most one modal dialog
//! └── alert: Option<Alert>         // error notice above everything
//! ```
//!
//! A frame is produced by [`Workspace::paint`] into a [`Canvas`] which the
//! front end diffs onto the real terminal.

pub mod buffer;
/// User configuration loaded from TOML.
pub mod config;
/// Modal dialogs, their widgets and the question/alert prompts.
pub mod dialog;
mod error;
/// Terminal boundary types.
pub mod input;
/// Layout kinds and pane geometry.
pub mod layout;
pub mod pane;
/// Frame painting.
pub mod render;
pub mod session;
pub mod theme;
/// Tabs: a layout plus its pane slots.
pub mod window;
mod workspace;

#[cfg(test)]
mod test_support;

pub use buffer::{BackupPolicy, Buffer, BufferPool, FilePool};
pub use config::{Config, ConfigError};
pub use error::{Result, WorkspaceError};
pub use input::{Event, KeyOutcome, Terminal};
pub use layout::LayoutKind;
pub use render::{Canvas, Cell};
pub use session::SessionStore;
pub use theme::{Color, Style, Theme, ThemeToken};
pub use workspace::{AppMode, Workspace};
