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
pub struct CheckCommand {
    /// Path to schemagen.toml (defaults to ./schemagen.toml)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::from_file(&self.config).unwrap_or_exit();
        let schema = config.load_schema().unwrap_or_exit();

        let report = ops::generate(&config, &schema, Mode::Check);
        report.render(&mut TerminalOutput::new());

        report.ensure_success()
    }
}
