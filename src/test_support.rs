use crate::backend::{Backend, BackendError, BackendLoader, EchoBackend, ModelSize};
use crate::error::Result;
use crate::generation::SamplingConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Returns a fixed reply and records every call.
pub(crate) struct RecordingBackend {
    reply: String,
    special_tokens: Vec<String>,
    calls: Mutex<Vec<(String, SamplingConfig)>>,
}

impl RecordingBackend {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            special_tokens: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_special_tokens(mut self, tokens: &[&str]) -> Self {
        self.special_tokens = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, SamplingConfig)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn generate(&self, prompt: &str, config: &SamplingConfig) -> std::result::Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), config.clone()));
        Ok(self.reply.clone())
    }

    fn special_tokens(&self) -> &[String] {
        &self.special_tokens
    }
}

/// Fails every generation with the given cause.
pub(crate) struct FailingBackend {
    cause: String,
}

impl FailingBackend {
    pub(crate) fn new(cause: &str) -> Self {
        Self {
            cause: cause.to_string(),
        }
    }
}

impl Backend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn generate(&self, _prompt: &str, _config: &SamplingConfig) -> std::result::Result<String, BackendError> {
        Err(BackendError::Failed(self.cause.clone()))
    }
}

/// Reports that its model is not loaded.
pub(crate) struct NotReadyBackend;

impl Backend for NotReadyBackend {
    fn name(&self) -> &str {
        "not-ready"
    }

    fn generate(&self, _prompt: &str, _config: &SamplingConfig) -> std::result::Result<String, BackendError> {
        Err(BackendError::NotReady("model weights not loaded".to_string()))
    }
}

/// Hands out echo backends and counts loads per size.
#[derive(Default)]
pub(crate) struct CountingLoader {
    counts: Arc<Mutex<HashMap<ModelSize, usize>>>,
}

impl CountingLoader {
    pub(crate) fn counts(&self) -> Arc<Mutex<HashMap<ModelSize, usize>>> {
        Arc::clone(&self.counts)
    }
}

impl BackendLoader for CountingLoader {
    fn load(&self, size: ModelSize) -> Result<Arc<dyn Backend>> {
        // Widen the race window for concurrent first use.
        std::thread::sleep(std::time::Duration::from_millis(10));
        *self.counts.lock().unwrap().entry(size).or_insert(0) += 1;
        Ok(Arc::new(EchoBackend))
    }
}
