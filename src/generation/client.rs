//! Generation client: validates parameters, calls the backend, cleans the output.
//!
//! A request moves through `Validating -> Generating -> Decoded`. Invalid
//! parameters stop it before the backend is touched; a backend failure stops it
//! with the backend's cause attached. Nothing is retried.

use crate::backend::{Backend, BackendError, BackendRegistry, ModelSize};
use crate::error::{Result, TextforgeError};
use crate::generation::params::GenerationParams;
use crate::generation::request::{GenerationResult, PromptRequest};
use crate::prompt::PromptBuilder;
use std::sync::Arc;

/// Single-shot text generation against one backend.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn Backend>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Client for `size`, loading the backend through `registry` if needed.
    pub fn from_registry(registry: &BackendRegistry, size: ModelSize) -> Result<Self> {
        Ok(Self::new(registry.get(size)?))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Generate text for `prompt`.
    ///
    /// The backend's output is returned verbatim apart from special-token
    /// stripping: an echoed prompt is not removed and nothing is trimmed.
    pub fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let config = params.validate()?;

        let raw = self
            .backend
            .generate(prompt, &config)
            .map_err(|e| match e {
                BackendError::NotReady(msg) => {
                    TextforgeError::BackendNotReady(format!("{}: {}", self.backend.name(), msg))
                }
                BackendError::Failed(cause) => TextforgeError::GenerationFailed { cause },
            })?;

        Ok(strip_special_tokens(&raw, self.backend.special_tokens()))
    }

    /// Build the prompt for `request` and generate from it.
    pub fn run(&self, builder: &PromptBuilder, request: &PromptRequest) -> Result<GenerationResult> {
        let prompt = builder.build(request.task, &request.fields)?;
        let text = self.generate(&prompt, &request.params)?;
        Ok(GenerationResult {
            task: request.task,
            text,
        })
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Remove every occurrence of each special token.
///
/// Backends hand back decoded text, not token ids, so matching is on the
/// token's text. A literal `<|endoftext|>` typed into a topic and echoed by
/// the backend is removed as well, which stripping by token id would keep.
pub fn strip_special_tokens(text: &str, tokens: &[String]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .fold(text.to_string(), |acc, token| acc.replace(token.as_str(), ""))
}
