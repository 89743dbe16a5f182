//! Declaration arguments for the builder's fluent calls.

use fieldsmith_core::{Map, Value};

use crate::Locations;

/// Arguments for declaring a field or sub-field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub field_type: String,
    pub name: String,
    pub options: Map,
    pub key: Option<String>,
}

impl FieldDecl {
    pub fn new(field_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            name: name.into(),
            options: Map::new(),
            key: None,
        }
    }

    /// Set one option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: Map) -> Self {
        self.options = options;
        self
    }

    /// Use an explicit key instead of a derived one.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Arguments for declaring a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDecl {
    pub name: String,
    pub label: String,
    pub display: Option<String>,
    pub options: Map,
    pub key: Option<String>,
}

impl LayoutDecl {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            display: None,
            options: Map::new(),
            key: None,
        }
    }

    /// Set the display (`table`, `block`, or `row`; anything else means `block`).
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set one option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: Map) -> Self {
        self.options = options;
        self
    }

    /// Use an explicit key instead of a derived one.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Arguments for opening a field group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDecl {
    pub name: String,
    pub locations: Locations,
    pub options: Map,
    pub key: Option<String>,
}

impl GroupDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations: Locations::none(),
            options: Map::new(),
            key: None,
        }
    }

    /// Set the placement, either as `[param, operator, value]` or as full rules.
    pub fn location(mut self, locations: impl Into<Locations>) -> Self {
        self.locations = locations.into();
        self
    }

    /// Set one option. Identity keys such as `title` are ignored when merged.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: Map) -> Self {
        self.options = options;
        self
    }

    /// Use an explicit key instead of deriving one from the name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}
