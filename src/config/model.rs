//! Config struct definition and default implementation.

use super::types::*;
use crate::backend::{CommandBackendProfile, ModelSize};
use crate::generation::GenerationParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for textforge.
///
/// This struct represents the contents of `textforge.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model size used when `--model` is not given.
    #[serde(default)]
    pub default_model: ModelSize,

    /// Default decoding parameters; command-line flags override them.
    #[serde(default)]
    pub generation: GenerationParams,

    /// Generator command per model size.
    #[serde(default)]
    pub backends: BTreeMap<ModelSize, CommandBackendProfile>,

    /// Prompt template overrides keyed by task identifier (e.g. `essay`).
    #[serde(default)]
    pub prompt_templates: BTreeMap<String, String>,

    /// Directory generated text is saved to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// NDJSON event log path (empty disables logging).
    #[serde(default = "default_event_log")]
    pub event_log: String,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: ModelSize::default(),
            generation: GenerationParams::default(),
            backends: BTreeMap::new(),
            prompt_templates: BTreeMap::new(),
            output_dir: default_output_dir(),
            event_log: default_event_log(),
            extra: BTreeMap::new(),
        }
    }
}
