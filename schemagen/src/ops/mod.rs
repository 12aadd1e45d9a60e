//! Operations behind the CLI commands.

mod generate;

pub use generate::{Mode, generate};
