//! Turning command-line flags into a `PromptRequest`.

use crate::cli::RequestArgs;
use crate::config::Config;
use crate::error::{Result, TextforgeError};
use crate::generation::{GenerationParams, PromptRequest};
use crate::prompt::{EmailFields, TaskFields};
use crate::task::Task;

/// Assemble a request from flags, falling back to config defaults.
///
/// Email fields are used when the task is Email or any email flag is given;
/// the builder rejects email fields for any other task.
pub fn build_request(config: &Config, args: &RequestArgs) -> Result<PromptRequest> {
    let task = parse_task(&args.task)?;
    let fields = build_fields(task, args);
    let params = build_params(&config.generation, args);
    Ok(PromptRequest::new(task, fields, params))
}

fn parse_task(value: &str) -> Result<Task> {
    Task::from_str(value).ok_or_else(|| {
        TextforgeError::UserError(format!(
            "unknown task '{}'. Valid tasks: {}",
            value,
            Task::ALL
                .iter()
                .map(|t| t.identifier())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

fn build_fields(task: Task, args: &RequestArgs) -> TaskFields {
    let has_email_flags = args.sender.is_some()
        || args.receiver.is_some()
        || args.subject.is_some()
        || args.purpose.is_some();

    if task.uses_email_fields() || has_email_flags {
        TaskFields::Email(EmailFields {
            sender: args.sender.clone().unwrap_or_default(),
            receiver: args.receiver.clone().unwrap_or_default(),
            subject: args.subject.clone().unwrap_or_default(),
            purpose: args.purpose.clone().unwrap_or_else(|| args.topic.clone()),
        })
    } else {
        TaskFields::Topic(args.topic.clone())
    }
}

fn build_params(defaults: &GenerationParams, args: &RequestArgs) -> GenerationParams {
    let mut params = defaults.clone();
    if let Some(max_length) = args.max_length {
        params.max_length = max_length;
    }
    if let Some(temperature) = args.temperature {
        params.temperature = temperature;
    }
    if args.no_top_k {
        params.top_k = None;
    } else if args.top_k.is_some() {
        params.top_k = args.top_k;
    }
    if args.no_top_p {
        params.top_p = None;
    } else if args.top_p.is_some() {
        params.top_p = args.top_p;
    }
    params
}
