mod check;
mod completions;
mod generate;

use std::path::Path;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use fieldsmith_builder::{BuildError, DefinitionBuilder};
use fieldsmith_codegen::ExportError;
use fieldsmith_manifest::MigrationsToml;
use generate::GenerateCommand;
use tracing::debug;

use crate::host::HostArgs;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

fn exit_with(report: miette::Report) -> ! {
    eprintln!("{:?}", report);
    std::process::exit(1);
}

impl<T> UnwrapOrExit<T> for fieldsmith_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(miette::Report::new(*e)))
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, BuildError> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(miette::Report::new(e)))
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, ExportError> {
    fn unwrap_or_exit(self) -> T {
        self.unwrap_or_else(|e| exit_with(miette::Report::new(e)))
    }
}

/// Open the template's declaration script and replay it into a new session.
///
/// Any diagnostic ends the process.
pub(crate) fn replay_template(
    template: &Path,
    host: &HostArgs,
) -> (MigrationsToml, DefinitionBuilder) {
    let file = MigrationsToml::open_template(template).unwrap_or_exit();

    debug!(plugins_dir = ?host.plugins_dir(), "checking host capabilities");
    let host = host.resolve();
    let mut builder = DefinitionBuilder::new(&*host).unwrap_or_exit();

    file.script().replay(&mut builder).unwrap_or_exit();
    (file, builder)
}

#[derive(Parser)]
#[command(name = "fieldsmith")]
#[command(version)]
#[command(about = "Generate ACF field-group registrations from a declaration script")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logs (repeat for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write acf/export.php from acf/migrations.toml
    Generate(GenerateCommand),

    /// Replay acf/migrations.toml without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
