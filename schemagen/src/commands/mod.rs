mod check;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for schemagen_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(version)]
#[command(about = "Generate database and API bindings from schema definitions")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every output configured in schemagen.toml
    Generate(GenerateCommand),

    /// Run every generator without writing and report diagnostics
    Check(CheckCommand),
}
