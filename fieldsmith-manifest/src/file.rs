use std::path::{Path, PathBuf};

use fieldsmith_codegen::STORAGE_DIRECTORY;
use tracing::debug;

use crate::{Error, Migrations, Result, SCRIPT_FILE};

/// The declaration script on disk, with its parsed content.
#[derive(Debug)]
pub struct MigrationsToml {
    path: PathBuf,
    script: Migrations,
}

impl MigrationsToml {
    /// Location of the declaration script under a template directory.
    pub fn locate(base: &Path) -> PathBuf {
        base.join(STORAGE_DIRECTORY).join(SCRIPT_FILE)
    }

    /// Open the declaration script of the template at `base`.
    pub fn open_template(base: &Path) -> Result<Self> {
        Self::open(Self::locate(base))
    }

    /// Open and parse a declaration script.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let script = Migrations::from_str_with_filename(&content, &filename)?;

        debug!(
            path = %path.display(),
            groups = script.groups.len(),
            "declaration script loaded"
        );
        Ok(Self { path, script })
    }

    /// Where the script was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed and validated script.
    pub fn script(&self) -> &Migrations {
        &self.script
    }
}
