//! Backend that runs an external generator program.
//!
//! The profile's command template is rendered with the sampling settings,
//! split with shell-words and spawned. The prompt is written to the child's
//! stdin and everything it prints on stdout is the generated text. Output is
//! captured in temporary files, so the timeout holds even when the generator
//! leaves background processes behind.
//!
//! # Command Variables
//!
//! - `{model}` - Model identifier (e.g. `gpt2-medium`)
//! - `{model_size}` - `small`, `medium` or `large`
//! - `{max_length}` - Maximum length in tokens
//! - `{temperature}` - Sampling temperature
//! - `{top_k}` / `{top_p}` - Filtering knobs, empty when disabled
//! - `{do_sample}` - Always `true`
//! - `{num_return_sequences}` - Always `1`

use crate::backend::{Backend, BackendError, GPT2_END_OF_TEXT, ModelSize};
use crate::generation::SamplingConfig;
use crate::prompt::{check_template, render_template};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Default time a generator may run before it is killed.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Variables a command template may reference.
pub const COMMAND_VARIABLES: &[&str] = &[
    "model",
    "model_size",
    "max_length",
    "temperature",
    "top_k",
    "top_p",
    "do_sample",
    "num_return_sequences",
];

/// How much of the generator's stderr to quote in an error.
const STDERR_TAIL_CHARS: usize = 2000;

fn default_special_tokens() -> Vec<String> {
    vec![GPT2_END_OF_TEXT.to_string()]
}

/// Configuration for one model size's generator command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandBackendProfile {
    /// Model identifier; defaults to the size's conventional checkpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Command template with variable placeholders.
    pub command: String,

    /// Timeout in seconds (defaults to [`DEFAULT_TIMEOUT_SECONDS`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Environment variables to set for the generator process.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environment: HashMap<String, String>,

    /// Control tokens to strip from the generator's output.
    #[serde(default = "default_special_tokens")]
    pub special_tokens: Vec<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for CommandBackendProfile {
    fn default() -> Self {
        Self {
            model: None,
            command: String::new(),
            timeout_seconds: None,
            environment: HashMap::new(),
            special_tokens: default_special_tokens(),
            extra: BTreeMap::new(),
        }
    }
}

impl CommandBackendProfile {
    pub fn effective_timeout(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn effective_model(&self, size: ModelSize) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| size.default_model().to_string())
    }

    /// Check the profile without running anything.
    pub fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("command is empty".to_string());
        }
        if self.timeout_seconds == Some(0) {
            return Err("timeout_seconds must be greater than 0".to_string());
        }
        check_template(&self.command, COMMAND_VARIABLES).map_err(|e| {
            format!(
                "command template: {}\nAvailable variables: {}",
                e,
                COMMAND_VARIABLES.join(", ")
            )
        })
    }
}

/// A generator program bound to one model size.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    name: String,
    size: ModelSize,
    model: String,
    profile: CommandBackendProfile,
}

impl CommandBackend {
    /// Bind `profile` to `size`. Fails if the profile is invalid.
    pub fn new(size: ModelSize, profile: CommandBackendProfile) -> Result<Self, BackendError> {
        profile.validate().map_err(|e| {
            BackendError::NotReady(format!("backend '{}' is misconfigured: {}", size, e))
        })?;

        let model = profile.effective_model(size);
        Ok(Self {
            name: format!("command:{}", model),
            size,
            model,
            profile,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn render_args(&self, config: &SamplingConfig) -> Result<Vec<String>, BackendError> {
        let mut vars = config.to_template_vars();
        vars.insert("model".to_string(), self.model.clone());
        vars.insert("model_size".to_string(), self.size.to_string());

        let command_str = render_template(&self.profile.command, &vars)
            .map_err(|e| BackendError::Failed(format!("failed to render command: {}", e)))?;

        let args = shell_words::split(&command_str).map_err(|e| {
            BackendError::NotReady(format!(
                "failed to parse generator command '{}': {}",
                command_str, e
            ))
        })?;

        if args.is_empty() {
            return Err(BackendError::NotReady(format!(
                "generator command is empty after parsing: '{}'",
                command_str
            )));
        }
        Ok(args)
    }
}

impl Backend for CommandBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, prompt: &str, config: &SamplingConfig) -> Result<String, BackendError> {
        let args = self.render_args(config)?;
        let program = &args[0];

        // Output goes to files rather than pipes so reading it never waits on
        // a grandchild that outlives a killed generator.
        let stdout_file = capture_file("stdout")?;
        let stderr_file = capture_file("stderr")?;

        let mut command = Command::new(program);
        command
            .args(&args[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::from(clone_file(&stdout_file, "stdout")?))
            .stderr(Stdio::from(clone_file(&stderr_file, "stderr")?));
        for (key, value) in &self.profile.environment {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|e| {
            BackendError::NotReady(format!(
                "failed to start generator '{}': {}\n\
                 Fix: ensure the command is installed and in PATH.",
                program, e
            ))
        })?;

        // The prompt may exceed the pipe buffer, so feed it from its own thread.
        let stdin_writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_string();
            std::thread::spawn(move || {
                let _ = stdin.write_all(prompt.as_bytes());
            })
        });

        let timeout = Duration::from_secs(self.profile.effective_timeout());
        let (exit_code, timed_out) = wait_with_timeout(&mut child, timeout)?;

        // A writer still blocked here is held up by a process we no longer
        // wait on; leave it detached.
        if let Some(handle) = stdin_writer
            && handle.is_finished()
        {
            let _ = handle.join();
        }

        if timed_out {
            return Err(BackendError::Failed(format!(
                "generator timed out after {}s",
                timeout.as_secs()
            )));
        }

        if exit_code != Some(0) {
            let stderr = read_capture(stderr_file, "stderr")?;
            let code = exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(BackendError::Failed(format!(
                "generator exited with {}: {}",
                code,
                tail(&String::from_utf8_lossy(&stderr), STDERR_TAIL_CHARS)
            )));
        }

        let stdout = read_capture(stdout_file, "stdout")?;
        String::from_utf8(stdout)
            .map_err(|e| BackendError::Failed(format!("generator output is not valid UTF-8: {}", e)))
    }

    fn special_tokens(&self) -> &[String] {
        &self.profile.special_tokens
    }
}

fn capture_file(stream: &str) -> Result<File, BackendError> {
    tempfile::tempfile().map_err(|e| {
        BackendError::NotReady(format!("failed to create {} capture file: {}", stream, e))
    })
}

fn clone_file(file: &File, stream: &str) -> Result<File, BackendError> {
    file.try_clone().map_err(|e| {
        BackendError::NotReady(format!("failed to share {} capture file: {}", stream, e))
    })
}

/// Read everything the generator wrote to a capture file.
fn read_capture(mut file: File, stream: &str) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut buf))
        .map_err(|e| BackendError::Failed(format!("failed to read generator {}: {}", stream, e)))?;
    Ok(buf)
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> Result<(Option<i32>, bool), BackendError> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                let _ = child.kill();
                return Err(BackendError::Failed(format!(
                    "failed to check generator status: {}",
                    e
                )));
            }
        }
    }
}

/// Last `max_chars` characters of `s`, trimmed.
fn tail(s: &str, max_chars: usize) -> &str {
    let s = s.trim();
    let count = s.chars().count();
    if count <= max_chars {
        return s;
    }
    let start = s
        .char_indices()
        .nth(count - max_chars)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &s[start..]
}
