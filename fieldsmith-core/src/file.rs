//! Writing generated files in one step.

use std::{
    io,
    path::{Path, PathBuf},
};

/// A file produced from in-memory state.
pub trait GeneratedFile {
    /// Where the file lives under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    /// The full file content.
    fn render(&self) -> String;

    /// Whether missing parent directories may be created.
    fn create_parents(&self) -> bool {
        true
    }

    /// Render and write under `base`, returning the written path.
    fn write(&self, base: &Path) -> io::Result<PathBuf> {
        let path = self.path(base);
        write_atomic(&path, &self.render(), self.create_parents())?;
        Ok(path)
    }
}

/// Replace `path` with `content` without ever leaving a half-written target.
///
/// The content goes to a sibling `<name>.tmp` first, which is then renamed
/// over the target. The temp file is removed if anything fails.
pub fn write_atomic(path: &Path, content: &str, create_parents: bool) -> io::Result<()> {
    if create_parents {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path(path);
    let result = std::fs::write(&tmp, content).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
