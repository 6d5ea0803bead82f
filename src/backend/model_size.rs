//! Model capacity tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of three model tiers trading quality for latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub const ALL: [ModelSize; 3] = [ModelSize::Small, ModelSize::Medium, ModelSize::Large];

    /// Parse a model size from its identifier.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// Pretrained checkpoint conventionally served at this tier.
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelSize::Small => "gpt2",
            ModelSize::Medium => "gpt2-medium",
            ModelSize::Large => "gpt2-large",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(ModelSize::from_str("small"), Some(ModelSize::Small));
        assert_eq!(ModelSize::from_str("Medium"), Some(ModelSize::Medium));
        assert_eq!(ModelSize::from_str(" LARGE "), Some(ModelSize::Large));
        assert_eq!(ModelSize::from_str("xl"), None);
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ModelSize::Small.default_model(), "gpt2");
        assert_eq!(ModelSize::Medium.default_model(), "gpt2-medium");
        assert_eq!(ModelSize::Large.default_model(), "gpt2-large");
    }

    #[test]
    fn test_default_is_small() {
        assert_eq!(ModelSize::default(), ModelSize::Small);
    }
}
