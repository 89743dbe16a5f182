//! Check operation - replay without export.

use fieldsmith_builder::{BuildError, DefinitionBuilder};
use fieldsmith_manifest::MigrationsToml;

use crate::reports::CheckReport;

/// Finish the replayed session and describe what it declared.
pub fn check(
    file: &MigrationsToml,
    builder: &mut DefinitionBuilder,
) -> Result<CheckReport, BuildError> {
    Ok(CheckReport::new(file.path().to_path_buf(), builder.finish()?))
}
