//! The export file: every finished field group wrapped in one init routine.

use std::path::{Path, PathBuf};

use fieldsmith_builder::{DefinitionBuilder, FieldGroup};
use fieldsmith_core::GeneratedFile;
use tracing::debug;

use crate::{
    ExportError, PhpRenderer,
    builder::{CodeBuilder, Indent},
    php::{is_identifier, single_quoted},
};

/// Directory under the template base that holds the script and the export.
pub const STORAGE_DIRECTORY: &str = "acf";

/// File name of the generated export.
pub const EXPORT_FILE: &str = "export.php";

/// Default name of the generated init routine.
pub const DEFAULT_FUNCTION: &str = "acf_migrations_add_local_field_groups";

/// Default hook the init routine is attached to.
pub const DEFAULT_HOOK: &str = "acf/init";

/// Host function that registers one field group.
pub const REGISTER_CALL: &str = "acf_add_local_field_group";

pub const GENERATED_HEADER: &str = "// Generated by fieldsmith. Do not edit by hand.";

/// Naming of the generated routine and its hook.
///
/// `function_name` must be a PHP identifier; rendering rejects anything else
/// with [`ExportError::InvalidFunctionName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub function_name: String,
    pub hook: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION.to_string(),
            hook: DEFAULT_HOOK.to_string(),
        }
    }
}

/// Rendered export content, written as `<base>/acf/export.php`.
struct ExportFile {
    content: String,
}

impl GeneratedFile for ExportFile {
    fn path(&self, base: &Path) -> PathBuf {
        ExportWriter::output_path(base)
    }

    fn render(&self) -> String {
        self.content.clone()
    }

    fn create_parents(&self) -> bool {
        false
    }
}

/// Runs one generation pass over a builder session.
#[derive(Debug, Clone, Default)]
pub struct ExportWriter {
    config: ExportConfig,
    renderer: PhpRenderer,
}

impl ExportWriter {
    /// A writer rendering with PSR-12 indentation.
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            renderer: PhpRenderer::new(Indent::PHP),
        }
    }

    /// The naming this writer renders with.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Location of the export file under `base`.
    pub fn output_path(base: &Path) -> PathBuf {
        base.join(STORAGE_DIRECTORY).join(EXPORT_FILE)
    }

    /// Flush the session and render the full export file.
    ///
    /// Fails if any declaration in the session failed.
    pub fn render(&self, builder: &mut DefinitionBuilder) -> Result<String, ExportError> {
        self.render_groups(builder.finish()?)
    }

    /// Render the export file for already finished groups.
    pub fn render_groups(&self, groups: &[FieldGroup]) -> Result<String, ExportError> {
        let function = &self.config.function_name;
        if !is_identifier(function) {
            return Err(ExportError::InvalidFunctionName {
                name: function.clone(),
            });
        }

        let mut code = CodeBuilder::php();
        code.push_line("<?php")
            .push_blank()
            .push_line(GENERATED_HEADER)
            .push_blank()
            .push_line(&format!("function {function}() {{"))
            .push_blank()
            .push_indent();

        for group in groups {
            let array = self.renderer.render_at(&group.to_value(), 1);
            code.push_line(&format!("{REGISTER_CALL}( {array} );"))
                .push_blank();
        }

        code.push_dedent()
            .push_line("}")
            .push_blank()
            .push_line(&format!(
                "add_action( {}, {} );",
                single_quoted(&self.config.hook),
                single_quoted(function)
            ));
        Ok(code.build())
    }

    /// Flush the session, render, and write `<base>/acf/export.php`.
    ///
    /// The file is replaced atomically. On any failure, including a failed
    /// session, the previous content is left untouched.
    pub fn generate(
        &self,
        builder: &mut DefinitionBuilder,
        base: &Path,
    ) -> Result<PathBuf, ExportError> {
        let file = ExportFile {
            content: self.render(builder)?,
        };
        let path = file.write(base).map_err(|source| ExportError::Io {
            path: file.path(base),
            source,
        })?;

        debug!(
            path = %path.display(),
            groups = builder.groups().len(),
            bytes = file.content.len(),
            "export written"
        );
        Ok(path)
    }
}
