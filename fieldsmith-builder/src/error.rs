use miette::Diagnostic;
use thiserror::Error;

/// Result type for declaration operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Fatal conditions raised while declaring definitions.
///
/// Layouts and sub-fields attached to a field that cannot hold them are not
/// errors; those declarations are dropped.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum BuildError {
    #[error("the host runtime does not provide '{capability}'")]
    #[diagnostic(
        code(fieldsmith::precondition),
        help("local field groups need Advanced Custom Fields Pro to be installed and active")
    )]
    Precondition { capability: String },

    #[error("duplicate identifier '{identifier}' (derived from '{raw_key}')")]
    #[diagnostic(
        code(fieldsmith::duplicate_identifier),
        help("rename one of the colliding declarations or give it an explicit key")
    )]
    DuplicateIdentifier { identifier: String, raw_key: String },

    #[error("field '{name}' is declared outside of a field group")]
    #[diagnostic(
        code(fieldsmith::no_open_group),
        help("declare a field group before adding fields to it")
    )]
    NoOpenGroup { name: String },
}
