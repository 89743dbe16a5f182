//! Indentation-aware text assembly for the export file.

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
