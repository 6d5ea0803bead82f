//! Backend that returns its prompt unchanged.

use crate::backend::{Backend, BackendError};
use crate::generation::SamplingConfig;

/// Returns the prompt verbatim. Useful for checking prompts end to end
/// without a model.
#[derive(Debug, Clone, Default)]
pub struct EchoBackend;

impl Backend for EchoBackend {
    fn name(&self) -> &str {
        "echo"
    }

    fn generate(&self, prompt: &str, _config: &SamplingConfig) -> Result<String, BackendError> {
        Ok(prompt.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationParams;

    #[test]
    fn test_echo_returns_prompt() {
        let config = GenerationParams::default().validate().unwrap();
        let text = EchoBackend.generate("Write a poem.\nPoem:\n", &config).unwrap();
        assert_eq!(text, "Write a poem.\nPoem:\n");
        assert!(EchoBackend.special_tokens().is_empty());
    }
}
