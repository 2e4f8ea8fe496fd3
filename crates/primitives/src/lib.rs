//! Core types shared by the tessel workspace crates.

/// Text encodings offered wherever an encoding is chosen.
pub mod encoding;
/// Screen geometry: rectangles and positions in terminal cells.
pub mod geometry;
/// Identifier types for workspace entities.
pub mod ids;
/// Key event types.
pub mod key;

pub use encoding::{Encoding, UnknownEncoding};
pub use geometry::{Position, Rect};
pub use ids::BufferId;
pub use key::{Key, KeyCode, Modifiers};
