//! Generate operation - export the replayed session.

use std::path::Path;

use fieldsmith_builder::DefinitionBuilder;
use fieldsmith_codegen::{ExportError, ExportWriter};
use fieldsmith_manifest::MigrationsToml;

use crate::reports::{GenerateOutcome, GenerateReport, GroupSummary};

/// Export the session into `template`, or only render it when `dry_run` is set.
pub fn generate(
    file: &MigrationsToml,
    builder: &mut DefinitionBuilder,
    template: &Path,
    dry_run: bool,
) -> Result<GenerateReport, ExportError> {
    let writer = ExportWriter::new(file.script().export_config());

    let outcome = if dry_run {
        GenerateOutcome::Preview {
            path: ExportWriter::output_path(template),
            content: writer.render(builder)?,
        }
    } else {
        GenerateOutcome::Written {
            path: writer.generate(builder, template)?,
        }
    };

    Ok(GenerateReport {
        script_path: file.path().to_path_buf(),
        groups: builder.groups().iter().map(GroupSummary::from).collect(),
        outcome,
    })
}
