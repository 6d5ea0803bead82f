//! Decoding parameters and their allowed ranges.
//!
//! [`GenerationParams`] is what the user asks for. [`GenerationParams::validate`]
//! checks every knob and produces the [`SamplingConfig`] a backend receives.

use crate::error::{Result, TextforgeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MIN_MAX_LENGTH: u32 = 20;
pub const MAX_MAX_LENGTH: u32 = 300;
pub const MAX_TEMPERATURE: f32 = 1.5;
pub const MIN_TOP_K: u32 = 10;
pub const MAX_TOP_K: u32 = 100;
pub const MAX_TOP_P: f32 = 1.0;

const MAX_LENGTH_RANGE: &str = "between 20 and 300";
const TEMPERATURE_RANGE: &str = "between 0 (exclusive) and 1.5";
const TOP_K_RANGE: &str = "between 10 and 100";
const TOP_P_RANGE: &str = "between 0 (exclusive) and 1.0";
const DO_SAMPLE_RANGE: &str = "true (greedy decoding is not supported)";

fn default_max_length() -> u32 {
    100
}
fn default_temperature() -> f32 {
    1.0
}
fn default_top_k() -> Option<u32> {
    Some(50)
}
fn default_top_p() -> Option<f32> {
    Some(0.95)
}
fn default_true() -> bool {
    true
}

/// Decoding parameters requested by the user.
///
/// `top_k` and `top_p` are independently optional; `None` leaves the knob to
/// the backend's own default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: Option<u32>,

    #[serde(default = "default_top_p")]
    pub top_p: Option<f32>,

    #[serde(default = "default_true")]
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            do_sample: default_true(),
        }
    }
}

impl GenerationParams {
    /// Parameters with only the always-present knobs set.
    pub fn basic(max_length: u32, temperature: f32) -> Self {
        Self {
            max_length,
            temperature,
            top_k: None,
            top_p: None,
            do_sample: true,
        }
    }

    pub fn with_top_k(mut self, top_k: Option<u32>) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_top_p(mut self, top_p: Option<f32>) -> Self {
        self.top_p = top_p;
        self
    }

    /// Check every parameter against its range.
    ///
    /// Checks run in declaration order and stop at the first violation.
    pub fn validate(&self) -> Result<SamplingConfig> {
        if !(MIN_MAX_LENGTH..=MAX_MAX_LENGTH).contains(&self.max_length) {
            return Err(invalid("max_length", self.max_length, MAX_LENGTH_RANGE));
        }

        // Written so NaN fails too.
        if !(self.temperature > 0.0 && self.temperature <= MAX_TEMPERATURE) {
            return Err(invalid("temperature", self.temperature, TEMPERATURE_RANGE));
        }

        if let Some(top_k) = self.top_k
            && !(MIN_TOP_K..=MAX_TOP_K).contains(&top_k)
        {
            return Err(invalid("top_k", top_k, TOP_K_RANGE));
        }

        if let Some(top_p) = self.top_p
            && !(top_p > 0.0 && top_p <= MAX_TOP_P)
        {
            return Err(invalid("top_p", top_p, TOP_P_RANGE));
        }

        if !self.do_sample {
            return Err(invalid("do_sample", self.do_sample, DO_SAMPLE_RANGE));
        }

        Ok(SamplingConfig {
            max_length: self.max_length,
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            do_sample: true,
            num_return_sequences: 1,
        })
    }
}

fn invalid(name: &'static str, value: impl ToString, range: &'static str) -> TextforgeError {
    TextforgeError::InvalidParameter {
        name,
        value: value.to_string(),
        range,
    }
}

/// Validated sampling settings handed to a backend.
///
/// Only [`GenerationParams::validate`] constructs one, so a backend never sees
/// out-of-range values. Sampling is always on and one sequence is returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingConfig {
    pub max_length: u32,
    pub temperature: f32,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub do_sample: bool,
    pub num_return_sequences: u32,
}

impl SamplingConfig {
    /// Template variables describing this configuration.
    ///
    /// Absent knobs render as empty strings.
    pub fn to_template_vars(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("max_length".to_string(), self.max_length.to_string());
        vars.insert("temperature".to_string(), self.temperature.to_string());
        vars.insert(
            "top_k".to_string(),
            self.top_k.map(|k| k.to_string()).unwrap_or_default(),
        );
        vars.insert(
            "top_p".to_string(),
            self.top_p.map(|p| p.to_string()).unwrap_or_default(),
        );
        vars.insert("do_sample".to_string(), self.do_sample.to_string());
        vars.insert(
            "num_return_sequences".to_string(),
            self.num_return_sequences.to_string(),
        );
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_name(params: &GenerationParams) -> &'static str {
        match params.validate() {
            Err(TextforgeError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.max_length, 100);
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.top_k, Some(50));
        assert_eq!(params.top_p, Some(0.95));
        assert!(params.do_sample);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_max_length_bounds_are_inclusive() {
        for ok in [20, 300] {
            assert!(GenerationParams::basic(ok, 1.0).validate().is_ok());
        }
        for bad in [0, 19, 301] {
            assert_eq!(rejected_name(&GenerationParams::basic(bad, 1.0)), "max_length");
        }
    }

    #[test]
    fn test_temperature_bounds() {
        for ok in [0.1, 1.5] {
            assert!(GenerationParams::basic(100, ok).validate().is_ok());
        }
        for bad in [0.0, -0.5, 1.6, f32::NAN] {
            assert_eq!(rejected_name(&GenerationParams::basic(100, bad)), "temperature");
        }
    }

    #[test]
    fn test_top_k_bounds() {
        let base = GenerationParams::basic(100, 1.0);
        for ok in [10, 100] {
            assert!(base.clone().with_top_k(Some(ok)).validate().is_ok());
        }
        for bad in [9, 101] {
            assert_eq!(rejected_name(&base.clone().with_top_k(Some(bad))), "top_k");
        }
    }

    #[test]
    fn test_top_p_bounds() {
        let base = GenerationParams::basic(100, 1.0);
        for ok in [0.1, 1.0] {
            assert!(base.clone().with_top_p(Some(ok)).validate().is_ok());
        }
        for bad in [0.0, 1.01, f32::NAN] {
            assert_eq!(rejected_name(&base.clone().with_top_p(Some(bad))), "top_p");
        }
    }

    #[test]
    fn test_greedy_decoding_rejected() {
        let params = GenerationParams {
            do_sample: false,
            ..Default::default()
        };
        assert_eq!(rejected_name(&params), "do_sample");
    }

    #[test]
    fn test_error_message_names_range() {
        let err = GenerationParams::basic(100, 1.6).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "temperature must be between 0 (exclusive) and 1.5, got 1.6"
        );

        let err = GenerationParams::basic(19, 1.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "max_length must be between 20 and 300, got 19");
    }

    #[test]
    fn test_sampling_config_always_samples() {
        let config = GenerationParams::default().validate().unwrap();
        assert!(config.do_sample);
        assert_eq!(config.num_return_sequences, 1);
        assert_eq!(config.top_k, Some(50));
        assert_eq!(config.top_p, Some(0.95));
    }

    #[test]
    fn test_template_vars_leave_absent_knobs_empty() {
        let config = GenerationParams::basic(120, 0.7).validate().unwrap();
        let vars = config.to_template_vars();
        assert_eq!(vars["max_length"], "120");
        assert_eq!(vars["temperature"], "0.7");
        assert_eq!(vars["top_k"], "");
        assert_eq!(vars["top_p"], "");
        assert_eq!(vars["do_sample"], "true");
    }

    #[test]
    fn test_yaml_null_disables_optional_knobs() {
        let params: GenerationParams =
            serde_yaml::from_str("max_length: 150\ntop_k: null\n").unwrap();
        assert_eq!(params.max_length, 150);
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.top_k, None);
        assert_eq!(params.top_p, Some(0.95));
    }
}
