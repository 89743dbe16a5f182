//! Check command report data structures.

use std::path::PathBuf;

use fieldsmith_builder::{Field, FieldGroup};

use super::output::{Output, Report};

/// One row of the declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub label: String,
    pub key: String,
}

/// Report data from replaying a declaration script without exporting.
#[derive(Debug)]
pub struct CheckReport {
    /// Path of the declaration script.
    pub script_path: PathBuf,
    pub group_count: usize,
    pub field_count: usize,
    pub tree: Vec<TreeLine>,
}

impl CheckReport {
    /// Summarize `groups` as read from `script_path`.
    pub fn new(script_path: PathBuf, groups: &[FieldGroup]) -> Self {
        let mut tree = Vec::new();
        for group in groups {
            tree.push(TreeLine {
                depth: 0,
                label: group.title.clone(),
                key: group.key.to_string(),
            });
            push_fields(&mut tree, &group.fields, 1);
        }

        Self {
            script_path,
            group_count: groups.len(),
            field_count: groups.iter().map(FieldGroup::field_count).sum(),
            tree,
        }
    }
}

fn push_fields(tree: &mut Vec<TreeLine>, fields: &[Field], depth: usize) {
    for field in fields {
        tree.push(TreeLine {
            depth,
            label: format!("{} ({})", field.name, field.field_type),
            key: field.key.to_string(),
        });
        push_fields(tree, field.sub_fields(), depth + 1);
        for layout in field.layouts() {
            tree.push(TreeLine {
                depth: depth + 1,
                label: format!("{} [{}]", layout.name, layout.display.as_str()),
                key: layout.key.to_string(),
            });
            push_fields(tree, &layout.sub_fields, depth + 2);
        }
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.script_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {} field group{}, {} field{}",
            self.group_count,
            if self.group_count == 1 { "" } else { "s" },
            self.field_count,
            if self.field_count == 1 { "" } else { "s" }
        ));

        if self.tree.is_empty() {
            return;
        }
        out.newline();
        for line in &self.tree {
            let indent = "  ".repeat(line.depth + 1);
            out.preformatted(&format!("{indent}{}  {}", line.label, line.key));
        }
    }
}
