//! Tests for config functionality.

use crate::backend::{DEFAULT_TIMEOUT_SECONDS, ModelSize};
use crate::config::{CONFIG_ENV_VAR, Config, DEFAULT_CONFIG_FILE, DEFAULT_EVENT_LOG};
use crate::error::TextforgeError;
use crate::prompt::TaskFields;
use crate::task::Task;
use serial_test::serial;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.default_model, ModelSize::Small);
    assert_eq!(config.generation.max_length, 100);
    assert_eq!(config.generation.top_k, Some(50));
    assert!(config.backends.is_empty());
    assert!(config.prompt_templates.is_empty());
    assert_eq!(config.output_dir, ".");
    assert_eq!(config.event_log, DEFAULT_EVENT_LOG);
}

#[test]
fn test_parse_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.default_model, ModelSize::Small);
    assert_eq!(config.generation.temperature, 1.0);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
default_model: medium
generation:
  temperature: 0.7
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.default_model, ModelSize::Medium);
    assert_eq!(config.generation.temperature, 0.7);

    // Unspecified values should use defaults
    assert_eq!(config.generation.max_length, 100);
    assert_eq!(config.generation.top_p, Some(0.95));
    assert_eq!(config.output_dir, ".");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
default_model: large
generation:
  max_length: 250
  temperature: 1.2
  top_k: null
  top_p: 0.8
backends:
  small:
    command: "python3 gen.py --model {model} --max-length {max_length}"
  large:
    model: gpt2-xl
    command: "python3 gen.py --model {model}"
    timeout_seconds: 900
    environment:
      CUDA_VISIBLE_DEVICES: "0"
    special_tokens: ["<|endoftext|>", "<pad>"]
prompt_templates:
  essay: "Essay about {topic}\nEssay:\n"
  social-media-post: "Post about {topic}\nPost:\n"
output_dir: out
event_log: ""
future_option: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.default_model, ModelSize::Large);
    assert_eq!(config.generation.max_length, 250);
    assert_eq!(config.generation.top_k, None);
    assert_eq!(config.generation.top_p, Some(0.8));

    let small = config.backend(ModelSize::Small).unwrap();
    assert_eq!(small.effective_timeout(), DEFAULT_TIMEOUT_SECONDS);
    assert_eq!(small.effective_model(ModelSize::Small), "gpt2");

    let large = config.backend(ModelSize::Large).unwrap();
    assert_eq!(large.effective_timeout(), 900);
    assert_eq!(large.effective_model(ModelSize::Large), "gpt2-xl");
    assert_eq!(large.environment["CUDA_VISIBLE_DEVICES"], "0");
    assert_eq!(large.special_tokens.len(), 2);
    assert!(config.backend(ModelSize::Medium).is_none());

    assert_eq!(config.output_dir, "out");
    assert_eq!(config.event_log_path(), None);
    assert!(config.extra.contains_key("future_option"));
}

#[test]
fn test_prompt_builder_applies_overrides() {
    let yaml = r#"
prompt_templates:
  Social Media Post: "Post about {topic}\nPost:\n"
"#;
    let config = Config::from_yaml(yaml).unwrap();
    let builder = config.prompt_builder().unwrap();

    let prompt = builder
        .build(Task::SocialMediaPost, &TaskFields::topic("cats"))
        .unwrap();
    assert_eq!(prompt, "Post about cats\nPost:\n");
}

#[test]
fn test_validate_rejects_out_of_range_generation() {
    let err = Config::from_yaml("generation:\n  temperature: 2.0\n").unwrap_err();
    assert!(matches!(err, TextforgeError::UserError(_)));
    assert!(
        err.to_string()
            .contains("generation.temperature must be between 0 (exclusive) and 1.5")
    );

    let err = Config::from_yaml("generation:\n  top_k: 5\n").unwrap_err();
    assert!(err.to_string().contains("generation.top_k"));
}

#[test]
fn test_validate_rejects_bad_backends() {
    let err = Config::from_yaml("backends:\n  small:\n    command: \"\"\n").unwrap_err();
    assert!(err.to_string().contains("backends.small: command is empty"));

    let yaml = "backends:\n  medium:\n    command: cat\n    timeout_seconds: 0\n";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("timeout_seconds must be greater than 0"));

    let yaml = "backends:\n  large:\n    command: \"gen {prompt}\"\n";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("undefined variable 'prompt'"));
}

#[test]
fn test_validate_rejects_unknown_model_size() {
    let err = Config::from_yaml("backends:\n  huge:\n    command: cat\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_validate_rejects_bad_prompt_templates() {
    let err = Config::from_yaml("prompt_templates:\n  limerick: \"{topic}\"\n").unwrap_err();
    assert!(err.to_string().contains("unknown task 'limerick'"));

    let err = Config::from_yaml("prompt_templates:\n  poem: \"Poem for {sender}\"\n").unwrap_err();
    assert!(err.to_string().contains("undefined variable 'sender'"));

    let err =
        Config::from_yaml("prompt_templates:\n  general-purpose: \"> {topic}\"\n").unwrap_err();
    assert!(err.to_string().contains("cannot be overridden"));
}

#[test]
fn test_yaml_round_trip_keeps_backends() {
    let yaml = "default_model: medium\nbackends:\n  medium:\n    command: cat\n";
    let config = Config::from_yaml(yaml).unwrap();
    let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();

    assert_eq!(reparsed.default_model, ModelSize::Medium);
    assert_eq!(
        reparsed.backend(ModelSize::Medium).map(|b| b.command.as_str()),
        Some("cat")
    );
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load(temp_dir.path().join("absent.yaml")).unwrap();
    assert!(config.backends.is_empty());
}

#[test]
fn test_load_reports_path_on_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("textforge.yaml");
    std::fs::write(&path, "generation:\n  max_length: 5\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("max_length must be between 20 and 300"));
    assert!(msg.contains(&path.display().to_string()));
}

#[test]
#[serial]
fn test_resolve_path_precedence() {
    let explicit = Path::new("/tmp/explicit.yaml");

    // SAFETY: serialized with the other tests that touch this variable.
    unsafe { std::env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.yaml") };
    assert_eq!(Config::resolve_path(Some(explicit)), explicit.to_path_buf());
    assert_eq!(
        Config::resolve_path(None),
        PathBuf::from("/tmp/from-env.yaml")
    );

    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
    assert_eq!(Config::resolve_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
}
