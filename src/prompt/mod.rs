//! Prompt construction.
//!
//! This module provides:
//!
//! - **Fields**: The user inputs a task needs (email fields or a topic)
//! - **Template**: `{variable}` substitution with `{{`/`}}` escapes
//! - **Builder**: The per-task template table and [`PromptBuilder`]
//!
//! # Example
//!
//! ```
//! use textforge::prompt::{PromptBuilder, TaskFields};
//! use textforge::task::Task;
//!
//! let prompt = PromptBuilder::new()
//!     .build(Task::Poem, &TaskFields::topic("the sea"))
//!     .unwrap();
//! assert!(prompt.ends_with("Poem:\n"));
//! ```

mod builder;
mod fields;
mod template;

pub use builder::{
    EMAIL_VARIABLES, PromptBuilder, TOPIC_VARIABLES, allowed_variables, build_prompt,
    default_template,
};
pub use fields::{EmailFields, TaskFields};
pub use template::{TemplateError, check_template, render_template, vars};
