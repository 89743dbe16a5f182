use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::Result;

use super::Cli;

/// Print a completion script for `fieldsmith` to stdout.
#[derive(Args)]
pub struct CompletionsCommand {
    #[arg(value_enum)]
    shell: Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cli = Cli::command();
        let name = cli.get_name().to_string();
        clap_complete::generate(self.shell, &mut cli, name, &mut std::io::stdout());
        Ok(())
    }
}
