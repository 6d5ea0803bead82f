//! Textforge: task-templated prompts for pretrained text generation models.
//!
//! The library is framework-free: a front end picks a [`task::Task`], collects
//! its fields and decoding parameters, and calls:
//!
//! 1. [`prompt::PromptBuilder::build`] to get the prompt string
//! 2. [`generation::GenerationClient::generate`] to run it through a backend
//!
//! Backends are loaded once per model size through a
//! [`backend::BackendRegistry`] and shared between requests.
//!
//! ```
//! use std::sync::Arc;
//! use textforge::backend::EchoBackend;
//! use textforge::generation::{GenerationClient, GenerationParams, PromptRequest};
//! use textforge::prompt::{PromptBuilder, TaskFields};
//! use textforge::task::Task;
//!
//! let client = GenerationClient::new(Arc::new(EchoBackend));
//! let request = PromptRequest::new(
//!     Task::Story,
//!     TaskFields::topic("a clockwork fox"),
//!     GenerationParams::default(),
//! );
//! let result = client.run(&PromptBuilder::new(), &request).unwrap();
//! assert_eq!(result.filename(), "story_generated.txt");
//! ```

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod generation;
pub mod output;
pub mod prompt;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;
