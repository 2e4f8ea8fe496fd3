//! Key mapping for tessel.
//!
//! Physical keys are written as plain-text patterns (`esc`, `ctrl-s`,
//! `shift-tab`, `f5`) and bound to a closed set of [`LogicalKey`] actions.
//! The core never matches physical keys directly; it asks the
//! [`KeyBindings`] table whether a key means a given logical action, so users
//! can remap everything from the configuration file.

mod bindings;
mod logical;
pub mod parser;

pub use bindings::{KeyBindings, KeymapError};
pub use logical::LogicalKey;
pub use parser::{ParseError, parse, parse_list};
