//! Implementation of the `textforge tasks` command.

use crate::error::Result;
use crate::task::Task;

/// List every task with its identifier and output filename.
pub fn cmd_tasks() -> Result<()> {
    println!("{:<18} {:<18} {}", "TASK", "NAME", "OUTPUT FILE");
    for task in Task::ALL {
        println!(
            "{:<18} {:<18} {}",
            task.identifier(),
            task.display_name(),
            task.output_filename()
        );
    }
    Ok(())
}
