use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use schemagen_config::{CONFIG_FILE, Config};

use super::UnwrapOrExit;
use crate::{
    ops::{self, Mode},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to schemagen.toml (defaults to ./schemagen.toml)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::from_file(&self.config).unwrap_or_exit();
        let schema = config.load_schema().unwrap_or_exit();

        let mode = if self.dry_run { Mode::DryRun } else { Mode::Write };
        let report = ops::generate(&config, &schema, mode);
        report.render(&mut TerminalOutput::new());

        report.ensure_success()
    }
}
