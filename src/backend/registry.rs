//! Process-scoped cache of loaded backends.
//!
//! Loading a model is expensive, so each [`ModelSize`] is loaded at most once
//! per registry and the handle is shared by every later request. Handles are
//! never mutated or evicted; they live as long as the registry.

use crate::backend::{Backend, CommandBackend, CommandBackendProfile, EchoBackend, ModelSize};
use crate::error::{Result, TextforgeError};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Knows how to load the backend for a model size.
pub trait BackendLoader: Send + Sync {
    fn load(&self, size: ModelSize) -> Result<Arc<dyn Backend>>;
}

/// Loads [`CommandBackend`]s from configured profiles.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    profiles: BTreeMap<ModelSize, CommandBackendProfile>,
}

impl ConfigLoader {
    pub fn new(profiles: BTreeMap<ModelSize, CommandBackendProfile>) -> Self {
        Self { profiles }
    }
}

impl BackendLoader for ConfigLoader {
    fn load(&self, size: ModelSize) -> Result<Arc<dyn Backend>> {
        let profile = self.profiles.get(&size).ok_or_else(|| {
            let configured = if self.profiles.is_empty() {
                "(none)".to_string()
            } else {
                self.profiles
                    .keys()
                    .map(ModelSize::identifier)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            TextforgeError::BackendNotReady(format!(
                "no backend configured for model size '{}'.\n\
                 Configured sizes: {}\n\n\
                 Add a `backends.{}` entry to textforge.yaml, or use `--backend echo`.",
                size, configured, size
            ))
        })?;

        let backend = CommandBackend::new(size, profile.clone())
            .map_err(|e| TextforgeError::BackendNotReady(e.to_string()))?;
        Ok(Arc::new(backend))
    }
}

/// Serves an [`EchoBackend`] for every size.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoLoader;

impl BackendLoader for EchoLoader {
    fn load(&self, _size: ModelSize) -> Result<Arc<dyn Backend>> {
        Ok(Arc::new(EchoBackend))
    }
}

/// Lazily loads and caches one backend per model size.
pub struct BackendRegistry {
    loader: Box<dyn BackendLoader>,
    loaded: Mutex<HashMap<ModelSize, Arc<dyn Backend>>>,
}

impl BackendRegistry {
    pub fn new(loader: impl BackendLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Get the backend for `size`, loading it on first use.
    ///
    /// Failed loads are not cached; the next call tries again.
    pub fn get(&self, size: ModelSize) -> Result<Arc<dyn Backend>> {
        // The lock is held across the load so concurrent first requests for
        // the same size load it once.
        let mut loaded = self
            .loaded
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());

        if let Some(backend) = loaded.get(&size) {
            return Ok(Arc::clone(backend));
        }

        let backend = self.loader.load(size)?;
        loaded.insert(size, Arc::clone(&backend));
        Ok(backend)
    }

    /// Whether `size` has already been loaded.
    pub fn is_loaded(&self, size: ModelSize) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .contains_key(&size)
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes: Vec<_> = ModelSize::ALL
            .into_iter()
            .filter(|s| self.is_loaded(*s))
            .collect();
        f.debug_struct("BackendRegistry")
            .field("loaded", &sizes)
            .finish()
    }
}
