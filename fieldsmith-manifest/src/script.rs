//! The declaration script, `acf/migrations.toml`.
//!
//! Each `[[group]]` table opens a field group. Fields are nested as
//! `[[group.field]]`, their layouts as `[[group.field.layout]]`, and sub-fields
//! as `sub_field` arrays under either a field or a layout. Source order is the
//! declaration order.

use std::str::FromStr;

use fieldsmith_builder::{FieldDecl, GroupDecl, LayoutDecl, LocationRule, Locations};
use fieldsmith_codegen::ExportConfig;
use fieldsmith_core::{Map, Value, sanitize_label};
use serde::Deserialize;
use toml::Spanned;

use crate::{Error, Result, error::SourceContext, validate::validate};

/// Default filename used in diagnostics when parsing from a string.
pub const SCRIPT_FILE: &str = "migrations.toml";

/// A parsed and validated declaration script.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Migrations {
    /// Naming overrides for the export file
    #[serde(default)]
    pub export: ExportSection,

    /// Field groups in declaration order
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupEntry>,

    /// The text this script was parsed from
    #[serde(skip)]
    source: Option<SourceContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    /// Name of the generated init routine
    pub function: Option<Spanned<String>>,
    /// Hook the routine is attached to
    pub hook: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    pub name: Spanned<String>,
    pub key: Option<String>,
    #[serde(default)]
    pub location: Option<LocationEntry>,
    #[serde(default)]
    pub options: toml::Table,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    #[serde(rename = "type")]
    pub field_type: Spanned<String>,
    pub name: Spanned<String>,
    pub key: Option<String>,
    #[serde(default)]
    pub options: toml::Table,
    #[serde(default, rename = "sub_field")]
    pub sub_fields: Vec<SubFieldEntry>,
    #[serde(default, rename = "layout")]
    pub layouts: Vec<LayoutEntry>,
}

/// A sub-field. Sub-fields cannot nest further.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubFieldEntry {
    #[serde(rename = "type")]
    pub field_type: Spanned<String>,
    pub name: Spanned<String>,
    pub key: Option<String>,
    #[serde(default)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutEntry {
    pub name: Spanned<String>,
    /// Defaults to the name written as a label
    pub label: Option<String>,
    pub display: Option<String>,
    pub key: Option<String>,
    #[serde(default)]
    pub options: toml::Table,
    #[serde(default, rename = "sub_field")]
    pub sub_fields: Vec<SubFieldEntry>,
}

/// Placement of a group.
///
/// Accepts the `["param", "operator", "value"]` shorthand, a flat list of
/// rules (all must match), or a list of rule lists (any list may match).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationEntry {
    Shorthand([String; 3]),
    Rules(Vec<RuleEntry>),
    Any(Vec<Vec<RuleEntry>>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub param: String,
    pub operator: String,
    pub value: String,
}

impl FromStr for Migrations {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, SCRIPT_FILE)
    }
}

impl Migrations {
    /// Parse a script with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let mut script: Self = toml::from_str(content).map_err(|e| ctx.malformed(e))?;
        validate(&script, &ctx)?;
        script.source = Some(ctx);
        Ok(script)
    }

    /// Source and filename for diagnostics.
    pub fn source_context(&self) -> SourceContext {
        self.source
            .clone()
            .unwrap_or_else(|| SourceContext::new("", SCRIPT_FILE))
    }

    /// Export naming, with the script's overrides applied.
    pub fn export_config(&self) -> ExportConfig {
        let defaults = ExportConfig::default();
        ExportConfig {
            function_name: self
                .export
                .function
                .as_ref()
                .map_or(defaults.function_name, |f| f.get_ref().clone()),
            hook: self.export.hook.clone().unwrap_or(defaults.hook),
        }
    }
}

impl GroupEntry {
    /// Builder arguments for this group; a missing location means no rules.
    pub fn to_decl(&self) -> GroupDecl {
        let mut decl = GroupDecl::new(self.name.get_ref())
            .location(self.location.clone().map(Locations::from).unwrap_or_default())
            .options(table_to_map(&self.options));
        if let Some(key) = &self.key {
            decl = decl.key(key);
        }
        decl
    }
}

impl FieldEntry {
    pub fn to_decl(&self) -> FieldDecl {
        field_decl(&self.field_type, &self.name, self.key.as_deref(), &self.options)
    }
}

impl SubFieldEntry {
    pub fn to_decl(&self) -> FieldDecl {
        field_decl(&self.field_type, &self.name, self.key.as_deref(), &self.options)
    }
}

impl LayoutEntry {
    /// Builder arguments for this layout. The label defaults to the name as a label.
    pub fn to_decl(&self) -> LayoutDecl {
        let name = self.name.get_ref();
        let label = self.label.clone().unwrap_or_else(|| sanitize_label(name));
        let mut decl = LayoutDecl::new(name, label).options(table_to_map(&self.options));
        if let Some(display) = &self.display {
            decl = decl.display(display);
        }
        if let Some(key) = &self.key {
            decl = decl.key(key);
        }
        decl
    }
}

fn field_decl(
    field_type: &Spanned<String>,
    name: &Spanned<String>,
    key: Option<&str>,
    options: &toml::Table,
) -> FieldDecl {
    let decl = FieldDecl::new(field_type.get_ref(), name.get_ref()).options(table_to_map(options));
    match key {
        Some(key) => decl.key(key),
        None => decl,
    }
}

fn table_to_map(table: &toml::Table) -> Map {
    table
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.clone())))
        .collect()
}

impl From<RuleEntry> for LocationRule {
    fn from(rule: RuleEntry) -> Self {
        LocationRule::new(rule.param, rule.operator, rule.value)
    }
}

impl From<LocationEntry> for Locations {
    fn from(entry: LocationEntry) -> Self {
        match entry {
            LocationEntry::Shorthand(rule) => rule.into(),
            LocationEntry::Rules(rules) => {
                Locations::Rules(rules.into_iter().map(Into::into).collect())
            }
            LocationEntry::Any(groups) => Locations::Any(
                groups
                    .into_iter()
                    .map(|rules| rules.into_iter().map(Into::into).collect())
                    .collect(),
            ),
        }
    }
}
