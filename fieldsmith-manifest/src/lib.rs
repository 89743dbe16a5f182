//! The declaration script: `acf/migrations.toml` under a template directory.
//!
//! A script is parsed with source spans, validated, and then replayed into a
//! [`DefinitionBuilder`](fieldsmith_builder::DefinitionBuilder) one declaration
//! at a time, exactly as if the calls had been written by hand.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod replay;
mod script;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use file::MigrationsToml;
pub use script::{
    ExportSection, FieldEntry, GroupEntry, LayoutEntry, LocationEntry, Migrations, RuleEntry,
    SCRIPT_FILE, SubFieldEntry,
};
