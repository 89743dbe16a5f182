use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, replay_template};
use crate::{
    host::HostArgs,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Template directory holding acf/migrations.toml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub template: PathBuf,

    #[command(flatten)]
    pub host: HostArgs,
}

impl CheckCommand {
    /// Replay the script, including key collision detection, and print the tree.
    pub fn run(&self) -> Result<()> {
        let (file, mut builder) = replay_template(&self.template, &self.host);

        let report = ops::check(&file, &mut builder).unwrap_or_exit();
        report.render(&mut TerminalOutput);

        Ok(())
    }
}
