//! Configuration for textforge.
//!
//! This module defines the Config struct that represents `textforge.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.
//!
//! # File Format
//!
//! ```yaml
//! default_model: small
//! generation:
//!   max_length: 100
//!   temperature: 1.0
//!   top_k: 50        # null disables
//!   top_p: 0.95      # null disables
//! backends:
//!   small:
//!     command: "python3 generate.py --model {model} --max-length {max_length}"
//!     timeout_seconds: 300
//! prompt_templates:
//!   essay: "Write an essay on {topic}.\nEssay:\n"
//! output_dir: "."
//! event_log: ".textforge/events.ndjson"
//! ```

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::Config;
pub use types::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_EVENT_LOG};
