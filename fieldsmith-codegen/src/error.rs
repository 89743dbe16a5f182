use std::path::PathBuf;

use fieldsmith_builder::BuildError;
use miette::Diagnostic;
use thiserror::Error;

/// Failures while rendering or persisting the export file.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    /// The builder session ended with a failed declaration.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error("'{name}' is not a valid PHP function name")]
    #[diagnostic(
        code(fieldsmith::function_name),
        help("use letters, digits and underscores, not starting with a digit")
    )]
    InvalidFunctionName { name: String },

    #[error("failed to write '{path}'")]
    #[diagnostic(
        code(fieldsmith::io),
        help("make sure the template's 'acf' directory exists and is writable")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
