//! Implementation of the `textforge prompt` command.

use super::request::build_request;
use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::Result;

/// Print the exact prompt a `generate` run would send.
///
/// Parameters are validated too, so a bad flag is reported here rather than
/// on the first real run.
pub fn cmd_prompt(config: &Config, args: PromptArgs) -> Result<()> {
    let request = build_request(config, &args.request)?;
    request.params.validate()?;

    let prompt = config
        .prompt_builder()?
        .build(request.task, &request.fields)?;
    print!("{}", prompt);
    Ok(())
}
