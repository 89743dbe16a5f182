//! Finished definition entities and their lowering to [`Value`] trees.

use fieldsmith_core::{Map, Value};

use crate::{Identifier, LocationRule};

/// How a layout's sub-fields are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    Table,
    #[default]
    Block,
    Row,
}

impl Display {
    /// Parse a display name, falling back to `Block` for anything unrecognised.
    pub fn normalize(display: Option<&str>) -> Self {
        match display {
            Some("table") => Self::Table,
            Some("row") => Self::Row,
            _ => Self::Block,
        }
    }

    /// The name the host runtime expects in a layout's `display` setting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Block => "block",
            Self::Row => "row",
        }
    }
}

/// What a field holds beneath it.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    None,
    SubFields(Vec<Field>),
    Layouts(Vec<Layout>),
}

/// A declared field (or sub-field).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Identifier,
    pub label: String,
    pub name: String,
    pub field_type: String,
    /// Type-specific settings after options were merged over the defaults.
    pub settings: Map,
    pub children: Children,
}

impl Field {
    /// Direct sub-fields, empty unless the field type nests sub-fields.
    pub fn sub_fields(&self) -> &[Field] {
        match &self.children {
            Children::SubFields(fields) => fields,
            _ => &[],
        }
    }

    /// Layouts, empty unless the field type holds layouts.
    pub fn layouts(&self) -> &[Layout] {
        match &self.children {
            Children::Layouts(layouts) => layouts,
            _ => &[],
        }
    }

    /// Lower to the array shape `acf_add_local_field_group` takes for a field.
    ///
    /// Identity keys come first, then settings, then `sub_fields` or `layouts`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("key".into(), self.key.clone().into());
        map.insert("label".into(), self.label.as_str().into());
        map.insert("name".into(), self.name.as_str().into());
        map.insert("type".into(), self.field_type.as_str().into());
        map.extend(self.settings.clone());
        match &self.children {
            Children::None => {}
            Children::SubFields(fields) => {
                map.insert("sub_fields".into(), lower(fields, Field::to_value));
            }
            Children::Layouts(layouts) => {
                map.insert("layouts".into(), lower(layouts, Layout::to_value));
            }
        }
        Value::Map(map)
    }
}

/// A named variant shape inside a flexible-content field.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub key: Identifier,
    pub name: String,
    pub label: String,
    pub display: Display,
    pub settings: Map,
    pub sub_fields: Vec<Field>,
}

impl Layout {
    /// Lower to a layout entry; `sub_fields` is always present.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("key".into(), self.key.clone().into());
        map.insert("name".into(), self.name.as_str().into());
        map.insert("label".into(), self.label.as_str().into());
        map.insert("display".into(), self.display.as_str().into());
        map.insert("sub_fields".into(), lower(&self.sub_fields, Field::to_value));
        map.extend(self.settings.clone());
        Value::Map(map)
    }
}

/// A top-level collection of fields plus placement rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub key: Identifier,
    pub title: String,
    pub fields: Vec<Field>,
    /// OR-groups of AND-rules.
    pub location: Vec<Vec<LocationRule>>,
    pub settings: Map,
}

impl FieldGroup {
    /// Total number of fields, counting sub-fields at every depth.
    pub fn field_count(&self) -> usize {
        fn count(fields: &[Field]) -> usize {
            fields
                .iter()
                .map(|f| {
                    1 + count(f.sub_fields())
                        + f.layouts()
                            .iter()
                            .map(|l| count(&l.sub_fields))
                            .sum::<usize>()
                })
                .sum()
        }
        count(&self.fields)
    }

    /// Lower to the single argument of one registration call.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("key".into(), self.key.clone().into());
        map.insert("title".into(), self.title.as_str().into());
        map.insert("fields".into(), lower(&self.fields, Field::to_value));
        map.insert(
            "location".into(),
            Value::List(
                self.location
                    .iter()
                    .map(|rules| lower(rules, LocationRule::to_value))
                    .collect(),
            ),
        );
        map.extend(self.settings.clone());
        Value::Map(map)
    }
}

fn lower<T>(items: &[T], f: impl Fn(&T) -> Value) -> Value {
    Value::List(items.iter().map(f).collect())
}
