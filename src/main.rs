//! Textforge CLI entry point.
//!
//! Parses arguments, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

use std::process::ExitCode;
use textforge::cli::Cli;
use textforge::{commands, exit_codes};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
