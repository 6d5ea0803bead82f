//! Implementation of the `textforge generate` command.
//!
//! 1. Assembles the request from flags and config
//! 2. Validates parameters and builds the prompt (fails fast on mismatched fields)
//! 3. Loads the backend for the model size
//! 4. Generates, prints, and saves `<task>_generated.txt`

use super::request::build_request;
use crate::backend::{BackendRegistry, EchoLoader, ModelSize};
use crate::cli::{BackendKind, GenerateArgs};
use crate::config::Config;
use crate::error::{Result, TextforgeError};
use crate::events::{Event, EventAction, log_event};
use crate::generation::{GenerationClient, GenerationResult};
use crate::output::save_result;
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the `textforge generate` command.
pub fn cmd_generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let request = build_request(config, &args.request)?;
    let size = resolve_model_size(config, args.model.as_deref())?;
    request.params.validate()?;
    let prompt = config
        .prompt_builder()?
        .build(request.task, &request.fields)?;

    let (registry, backend_name) = match args.backend {
        BackendKind::Command => (BackendRegistry::new(config.backend_loader()), "command"),
        BackendKind::Echo => (BackendRegistry::new(EchoLoader), "echo"),
    };
    let event_log = config.event_log_path();
    let slug = request.task.slug();

    let start_event = Event::new(EventAction::GenerateStart)
        .with_task(&slug)
        .with_details(json!({
            "model_size": size.identifier(),
            "backend": backend_name,
            "params": request.params,
            "prompt_chars": prompt.chars().count(),
        }));
    log_event(event_log.as_deref(), &start_event);

    eprintln!("Generating {} with the {} model...", request.task, size);
    let started = Instant::now();
    let outcome = GenerationClient::from_registry(&registry, size)
        .and_then(|client| client.generate(&prompt, &request.params));
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let log_failure = |e: &TextforgeError| {
        let failed_event = Event::new(EventAction::GenerateFailed)
            .with_task(&slug)
            .with_details(json!({
                "model_size": size.identifier(),
                "duration_ms": duration_ms,
                "exit_code": e.exit_code(),
                "error": e.to_string(),
            }));
        log_event(event_log.as_deref(), &failed_event);
    };

    let text = outcome.inspect_err(|e| log_failure(e))?;

    let result = GenerationResult {
        task: request.task,
        text,
    };

    println!("{}", result.text);

    let saved = if args.no_save {
        None
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output_dir));
        let path = save_result(&output_dir, &result).inspect_err(|e| log_failure(e))?;
        eprintln!("Saved to {} ({})", path.display(), result.mime_type());
        Some(path)
    };

    let complete_event = Event::new(EventAction::GenerateComplete)
        .with_task(&slug)
        .with_details(json!({
            "model_size": size.identifier(),
            "duration_ms": duration_ms,
            "output_chars": result.text.chars().count(),
            "output_file": saved.map(|p| p.to_string_lossy().to_string()),
        }));
    log_event(event_log.as_deref(), &complete_event);

    Ok(())
}

fn resolve_model_size(config: &Config, requested: Option<&str>) -> Result<ModelSize> {
    match requested {
        None => Ok(config.default_model),
        Some(value) => ModelSize::from_str(value).ok_or_else(|| {
            TextforgeError::UserError(format!(
                "unknown model size '{}'. Valid sizes: small, medium, large",
                value
            ))
        }),
    }
}
