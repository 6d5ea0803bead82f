//! Command implementations for textforge.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod generate;
mod prompt;
mod request;
mod tasks;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// Loads the configuration once and hands it to the command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tasks => tasks::cmd_tasks(),
        Command::Prompt(args) => {
            let config = Config::load(Config::resolve_path(cli.config.as_deref()))?;
            prompt::cmd_prompt(&config, args)
        }
        Command::Generate(args) => {
            let config = Config::load(Config::resolve_path(cli.config.as_deref()))?;
            generate::cmd_generate(&config, args)
        }
    }
}
