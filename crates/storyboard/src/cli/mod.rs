//! Command-line interface module.

mod commands;
mod output;
mod run;

pub use commands::{Cli, OutputFormat};
pub use run::run_storyboard;
