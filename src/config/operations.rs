//! Config loading, validation, and the objects built from it.

use super::model::Config;
use super::types::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
use crate::backend::{CommandBackendProfile, ConfigLoader, ModelSize};
use crate::error::{Result, TextforgeError};
use crate::prompt::PromptBuilder;
use crate::task::Task;
use std::path::{Path, PathBuf};

impl Config {
    /// Resolve which config file to read.
    ///
    /// Order: the explicit path, then `$TEXTFORGE_CONFIG`, then
    /// `textforge.yaml` in the working directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Load config from a YAML file.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse or validate is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TextforgeError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            TextforgeError::UserError(msg) => {
                TextforgeError::UserError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| TextforgeError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TextforgeError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `generation` must pass the same range checks as a request
    /// - every backend must have a non-empty, well-formed command and a positive timeout
    /// - every prompt template key must name a task and its template must render
    pub fn validate(&self) -> Result<()> {
        self.generation.validate().map_err(|e| {
            TextforgeError::UserError(format!("config validation failed: generation.{}", e))
        })?;

        for (size, profile) in &self.backends {
            profile.validate().map_err(|e| {
                TextforgeError::UserError(format!(
                    "config validation failed: backends.{}: {}",
                    size, e
                ))
            })?;
        }

        self.prompt_builder()
            .map_err(|e| TextforgeError::UserError(format!("config validation failed: {}", e)))?;

        Ok(())
    }

    /// Prompt builder with this config's template overrides applied.
    pub fn prompt_builder(&self) -> Result<PromptBuilder> {
        let mut builder = PromptBuilder::new();
        for (key, template) in &self.prompt_templates {
            let task = Task::from_str(key).ok_or_else(|| {
                TextforgeError::UserError(format!(
                    "prompt_templates has unknown task '{}'. Valid tasks: {}",
                    key,
                    Task::ALL
                        .iter()
                        .map(|t| t.identifier())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;
            builder = builder.with_override(task, template.clone())?;
        }
        Ok(builder)
    }

    /// Loader that builds command backends from `backends`.
    pub fn backend_loader(&self) -> ConfigLoader {
        ConfigLoader::new(self.backends.clone())
    }

    /// Backend profile for `size`, if configured.
    pub fn backend(&self, size: ModelSize) -> Option<&CommandBackendProfile> {
        self.backends.get(&size)
    }

    /// Event log path, or `None` when logging is disabled.
    pub fn event_log_path(&self) -> Option<PathBuf> {
        let path = self.event_log.trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}
