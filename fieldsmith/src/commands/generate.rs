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
pub struct GenerateCommand {
    /// Template directory holding acf/migrations.toml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub template: PathBuf,

    /// Print the export file instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub host: HostArgs,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let (file, mut builder) = replay_template(&self.template, &self.host);

        let report =
            ops::generate(&file, &mut builder, &self.template, self.dry_run).unwrap_or_exit();
        report.render(&mut TerminalOutput);

        Ok(())
    }
}
