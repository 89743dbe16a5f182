//! Core utilities and types for the fieldsmith generator.
//!
//! This crate provides the structured [`Value`] every declaration is lowered
//! to, the naming rules shared by the builder and the key generator, and the
//! file-writing primitives used by the exporter.

mod file;
mod utils;
mod value;

// File operations
pub use file::{GeneratedFile, write_atomic};
// String utilities
pub use utils::{sanitize_label, sanitize_name};
// Structured values
pub use value::{Map, Value};
