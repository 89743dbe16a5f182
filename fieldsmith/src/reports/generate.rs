//! Generate command report data structures.

use std::path::PathBuf;

use fieldsmith_builder::FieldGroup;

use super::output::{Output, Report};

/// One exported field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub title: String,
    pub key: String,
    /// Fields at every depth.
    pub fields: usize,
}

impl From<&FieldGroup> for GroupSummary {
    fn from(group: &FieldGroup) -> Self {
        Self {
            title: group.title.clone(),
            key: group.key.to_string(),
            fields: group.field_count(),
        }
    }
}

/// What happened to the export file.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// The file was written.
    Written { path: PathBuf },
    /// Dry run: the content that would have been written.
    Preview { path: PathBuf, content: String },
}

/// Report data from a generation pass.
#[derive(Debug)]
pub struct GenerateReport {
    /// Path of the declaration script.
    pub script_path: PathBuf,
    pub groups: Vec<GroupSummary>,
    pub outcome: GenerateOutcome,
}

impl GenerateReport {
    fn render_summary(&self, out: &mut dyn Output) {
        out.section(&format!("Field groups ({})", self.groups.len()));
        for group in &self.groups {
            out.list_item(&format!(
                "{} ({}): {} field{}",
                group.title,
                group.key,
                group.fields,
                if group.fields == 1 { "" } else { "s" }
            ));
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.outcome {
            GenerateOutcome::Written { path } => {
                out.preformatted(&format!("Read {}", self.script_path.display()));
                out.newline();
                self.render_summary(out);
                out.newline();
                out.section("Generated");
                out.added_item(&path.display().to_string());
            }
            GenerateOutcome::Preview { path, content } => {
                out.divider(&path.display().to_string());
                out.preformatted(content);
                out.divider("Summary");
                self.render_summary(out);
            }
        }
    }
}
