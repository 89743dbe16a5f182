//! Deciding whether the target site can take local field groups.

use std::path::{Path, PathBuf};

use clap::Args;
use fieldsmith_builder::{Host, LOCAL_FIELD_GROUPS, StaticHost};

/// Plugin folder and main file of Advanced Custom Fields Pro.
const ACF_PRO_ENTRY: [&str; 2] = ["advanced-custom-fields-pro", "acf.php"];

/// A WordPress plugins directory, inspected on disk.
#[derive(Debug)]
pub struct PluginDirectory {
    root: PathBuf,
}

impl PluginDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn has_acf_pro(&self) -> bool {
        let [folder, entry] = ACF_PRO_ENTRY;
        self.root.join(folder).join(entry).is_file()
    }
}

impl Host for PluginDirectory {
    fn provides(&self, capability: &str) -> bool {
        capability == LOCAL_FIELD_GROUPS && self.has_acf_pro()
    }
}

#[derive(Args, Debug)]
pub struct HostArgs {
    /// WordPress plugins directory to check for ACF Pro (assumed installed if omitted)
    #[arg(long, value_name = "DIR")]
    pub plugins_dir: Option<PathBuf>,
}

impl HostArgs {
    /// The host to build against. Without `--plugins-dir`, ACF Pro is assumed.
    pub fn resolve(&self) -> Box<dyn Host> {
        match &self.plugins_dir {
            Some(dir) => Box::new(PluginDirectory::new(dir)),
            None => Box::new(StaticHost::acf_pro()),
        }
    }

    pub fn plugins_dir(&self) -> Option<&Path> {
        self.plugins_dir.as_deref()
    }
}
