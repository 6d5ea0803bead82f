//! Text generation backends.
//!
//! A [`Backend`] is the opaque model collaborator: it takes a prompt and a
//! validated [`SamplingConfig`] and returns raw text. This module provides:
//!
//! - **Command**: Runs an external generator program per model size
//! - **Echo**: Returns the prompt unchanged (dry runs and tests)
//! - **Registry**: Loads each model size once and shares the handle
//!
//! [`SamplingConfig`]: crate::generation::SamplingConfig

mod command;
mod echo;
mod model_size;
mod registry;

pub use command::{CommandBackend, CommandBackendProfile, DEFAULT_TIMEOUT_SECONDS};
pub use echo::EchoBackend;
pub use model_size::ModelSize;
pub use registry::{BackendLoader, BackendRegistry, ConfigLoader, EchoLoader};

use crate::generation::SamplingConfig;
use thiserror::Error;

/// End-of-text marker used by the GPT-2 family of models.
pub const GPT2_END_OF_TEXT: &str = "<|endoftext|>";

/// Failure reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend cannot run at all (not loaded, program missing).
    #[error("{0}")]
    NotReady(String),

    /// The backend ran and failed.
    #[error("{0}")]
    Failed(String),
}

/// A loaded text generation model.
///
/// Implementations must be safe to call from several threads at once; a
/// handle is shared read-only between requests.
pub trait Backend: Send + Sync {
    /// Short name for messages and logs.
    fn name(&self) -> &str;

    /// Generate a continuation of `prompt`.
    ///
    /// Called exactly once per request. The returned text may echo the prompt
    /// and may contain special tokens.
    fn generate(&self, prompt: &str, config: &SamplingConfig) -> Result<String, BackendError>;

    /// Control tokens to strip from the decoded output.
    fn special_tokens(&self) -> &[String] {
        &[]
    }
}

impl std::fmt::Debug for dyn Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").field("name", &self.name()).finish()
    }
}
