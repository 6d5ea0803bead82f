//! CLI argument parsing for textforge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Textforge: generate emails, essays, posts, stories and poems from a topic.
///
/// A topic (or email fields) is wrapped in a task-specific prompt and sent to
/// a pretrained language model configured in `textforge.yaml`.
#[derive(Parser, Debug)]
#[command(name = "textforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: $TEXTFORGE_CONFIG or ./textforge.yaml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for textforge.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate text for a task.
    ///
    /// Builds the task's prompt, runs the backend for the selected model size,
    /// prints the result and saves it as `<task>_generated.txt`.
    Generate(GenerateArgs),

    /// Print the prompt a request would send, without generating.
    Prompt(PromptArgs),

    /// List the available tasks.
    Tasks,
}

/// Inputs shared by `generate` and `prompt`.
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Task: email, essay, social-media-post, story, poem, general-purpose.
    #[arg(short, long)]
    pub task: String,

    /// Topic or idea to write about.
    #[arg(long, default_value = "")]
    pub topic: String,

    /// Email sender.
    #[arg(long)]
    pub sender: Option<String>,

    /// Email receiver.
    #[arg(long)]
    pub receiver: Option<String>,

    /// Email subject.
    #[arg(long)]
    pub subject: Option<String>,

    /// Purpose of the email (defaults to --topic).
    #[arg(long)]
    pub purpose: Option<String>,

    /// Maximum length in tokens (20-300).
    #[arg(long)]
    pub max_length: Option<u32>,

    /// Sampling temperature (0-1.5, exclusive of 0).
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Top-k filtering (10-100).
    #[arg(long, conflicts_with = "no_top_k")]
    pub top_k: Option<u32>,

    /// Disable top-k filtering.
    #[arg(long)]
    pub no_top_k: bool,

    /// Top-p (nucleus) filtering (0-1.0, exclusive of 0).
    #[arg(long, conflicts_with = "no_top_p")]
    pub top_p: Option<f32>,

    /// Disable top-p filtering.
    #[arg(long)]
    pub no_top_p: bool,
}

/// Which kind of backend `generate` talks to.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// The generator command configured for the model size.
    #[default]
    Command,
    /// Return the prompt unchanged.
    Echo,
}

/// Arguments for the `generate` command.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Model size: small, medium or large (default from config).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendKind::Command)]
    pub backend: BackendKind,

    /// Directory to save the generated text in (default from config).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the result without saving it.
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the `prompt` command.
#[derive(Args, Debug, Clone)]
pub struct PromptArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
