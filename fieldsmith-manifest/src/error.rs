use std::path::PathBuf;

use fieldsmith_builder::BuildError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Script errors are boxed; the diagnostic variants carry the whole source.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The script text and the name it is reported under.
#[derive(Debug, Clone)]
pub struct SourceContext {
    text: String,
    name: String,
}

impl SourceContext {
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn source_code(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone())
    }

    /// The script could not be deserialized.
    pub fn malformed(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            span: source.span().map(SourceSpan::from),
            src: self.source_code(),
            source,
        })
    }

    /// The script parsed but a value is unacceptable.
    pub fn invalid(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.source_code(),
            span,
            message: message.into(),
        })
    }

    /// The builder refused a replayed declaration.
    pub fn rejected(
        &self,
        context: impl Into<String>,
        span: Option<SourceSpan>,
        source: BuildError,
    ) -> Box<Error> {
        Box::new(Error::Build {
            src: self.source_code(),
            span,
            context: context.into(),
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(fieldsmith::io),
        help("create the declaration script at '<template>/acf/migrations.toml'")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("declaration script is not valid TOML for this schema")]
    #[diagnostic(code(fieldsmith::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(fieldsmith::invalid))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid declaration of {context}")]
    #[diagnostic(code(fieldsmith::declaration))]
    Build {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        context: String,
        #[source]
        source: BuildError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_keeps_span() {
        let ctx = SourceContext::new("[[group]]\nname = \"\"\n", "migrations.toml");
        let err = ctx.invalid("group name must not be empty", Some((17..19).into()));
        assert_eq!(err.to_string(), "group name must not be empty");
        match *err {
            Error::Validation { span, .. } => assert_eq!(span, Some(SourceSpan::from(17..19))),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_points_at_toml_error() {
        let ctx = SourceContext::new("[[group]\n", "migrations.toml");
        let toml_err = toml::from_str::<toml::Table>(ctx.text()).unwrap_err();
        match *ctx.malformed(toml_err) {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejected_keeps_cause() {
        let ctx = SourceContext::new("", "migrations.toml");
        let err = ctx.rejected(
            "field 'Title'",
            None,
            BuildError::NoOpenGroup {
                name: "Title".into(),
            },
        );
        assert_eq!(err.to_string(), "invalid declaration of field 'Title'");
        let cause = std::error::Error::source(&*err).map(ToString::to_string);
        assert_eq!(
            cause.as_deref(),
            Some("field 'Title' is declared outside of a field group")
        );
    }
}
