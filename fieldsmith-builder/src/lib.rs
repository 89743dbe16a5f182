//! Declaration side of fieldsmith.
//!
//! A [`DefinitionBuilder`] accumulates field groups, fields, layouts, and
//! sub-fields through fluent calls. Every declared entity receives a short
//! [`Identifier`] from the session's [`KeyGenerator`]. The finished
//! [`FieldGroup`]s lower to [`fieldsmith_core::Value`] trees for rendering.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod builder;
pub mod catalog;
mod decl;
mod definition;
mod error;
mod host;
mod keys;
mod location;

pub use builder::{DefinitionBuilder, SessionState};
pub use decl::{FieldDecl, GroupDecl, LayoutDecl};
pub use definition::{Children, Display, Field, FieldGroup, Layout};
pub use error::{BuildError, Result};
pub use host::{Host, LOCAL_FIELD_GROUPS, Registry, StaticHost};
pub use keys::{DEFAULT_KEY_WIDTH, Identifier, KEY_DELIMITER, KeyGenerator, KeyKind};
pub use location::{LocationRule, Locations};
