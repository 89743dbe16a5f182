//! Rendering and export for fieldsmith.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware line builder used for the export file
//! - [`php`] - Structured value to PHP array-literal rendering
//! - [`export`] - Export file layout and writing

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod error;
pub mod export;
pub mod php;

pub use error::ExportError;
pub use export::{
    DEFAULT_FUNCTION, DEFAULT_HOOK, EXPORT_FILE, ExportConfig, ExportWriter, GENERATED_HEADER,
    REGISTER_CALL, STORAGE_DIRECTORY,
};
pub use php::PhpRenderer;
