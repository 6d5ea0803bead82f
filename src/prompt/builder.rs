//! Task-to-prompt mapping.
//!
//! Each [`Task`] owns one template. Email templates see `{sender}`,
//! `{receiver}`, `{subject}` and `{purpose}`; every other templated task sees
//! `{topic}`. [`Task::GeneralPurpose`] is not templated at all: the topic is the
//! prompt.

use crate::error::{Result, TextforgeError};
use crate::prompt::fields::{EmailFields, TaskFields};
use crate::prompt::template::{TemplateError, check_template, render_template, vars};
use crate::task::Task;
use std::collections::HashMap;

/// Variables available to the email template.
pub const EMAIL_VARIABLES: &[&str] = &["sender", "receiver", "subject", "purpose"];

/// Variables available to topic templates.
pub const TOPIC_VARIABLES: &[&str] = &["topic"];

const EMAIL_TEMPLATE: &str = "Write a professional email.\n\
From: {sender}\n\
To: {receiver}\n\
Subject: {subject}\n\
Purpose: {purpose}\n\
Include a greeting, a clear body and a polite closing.\n\
\n\
Email:\n";

const ESSAY_TEMPLATE: &str = "Write a detailed essay on \"{topic}\". \
Start with an introduction, develop the main points in the body, \
and finish with a conclusion.\n\
\n\
Essay:\n";

const SOCIAL_MEDIA_POST_TEMPLATE: &str = "Create a catchy social media post about \"{topic}\". \
Use emojis and relevant hashtags.\n\
\n\
Post:\n";

const STORY_TEMPLATE: &str = "Write a short story about {topic}.\n\nStory:\n";

const POEM_TEMPLATE: &str = "Write a meaningful poem about {topic}.\n\nPoem:\n";

/// Built-in template for a task, or `None` for the identity mapping.
pub fn default_template(task: Task) -> Option<&'static str> {
    match task {
        Task::Email => Some(EMAIL_TEMPLATE),
        Task::Essay => Some(ESSAY_TEMPLATE),
        Task::SocialMediaPost => Some(SOCIAL_MEDIA_POST_TEMPLATE),
        Task::Story => Some(STORY_TEMPLATE),
        Task::Poem => Some(POEM_TEMPLATE),
        Task::GeneralPurpose => None,
    }
}

/// Names a task's template may reference.
pub fn allowed_variables(task: Task) -> &'static [&'static str] {
    if task.uses_email_fields() {
        EMAIL_VARIABLES
    } else {
        TOPIC_VARIABLES
    }
}

/// Builds the final prompt string for a task.
///
/// Building is pure: the same task and fields always produce the same bytes,
/// and a builder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    overrides: HashMap<Task, String>,
}

impl PromptBuilder {
    /// Builder using only the built-in templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in template for `task`.
    ///
    /// The template is checked up front: it must parse and may only reference
    /// the task's own variables. General Purpose has no template to replace.
    pub fn with_override(mut self, task: Task, template: impl Into<String>) -> Result<Self> {
        let template = template.into();

        if task == Task::GeneralPurpose {
            return Err(TextforgeError::UserError(format!(
                "the {} prompt is the topic itself and cannot be overridden",
                task
            )));
        }

        let allowed = allowed_variables(task);
        check_template(&template, allowed).map_err(|e| {
            TextforgeError::UserError(format!(
                "invalid prompt template for {}: {}\nAvailable variables: {}",
                task.identifier(),
                e,
                allowed.join(", ")
            ))
        })?;

        self.overrides.insert(task, template);
        Ok(self)
    }

    /// The template that will be used for `task`, if it is templated.
    pub fn template_for(&self, task: Task) -> Option<&str> {
        self.overrides
            .get(&task)
            .map(String::as_str)
            .or_else(|| default_template(task))
    }

    /// Produce the prompt for `task` from `fields`.
    ///
    /// Fails with [`TextforgeError::InvalidFieldsForTask`] when the fields are
    /// the wrong shape for the task. An empty topic is not an error.
    pub fn build(&self, task: Task, fields: &TaskFields) -> Result<String> {
        let variables = match (task, fields) {
            (Task::GeneralPurpose, TaskFields::Topic(topic)) => return Ok(topic.clone()),
            (Task::Email, TaskFields::Email(email)) => email_variables(email),
            (
                Task::Essay | Task::SocialMediaPost | Task::Story | Task::Poem,
                TaskFields::Topic(topic),
            ) => vars([("topic", topic.as_str())]),
            (Task::Email, TaskFields::Topic(_)) => {
                return Err(TextforgeError::InvalidFieldsForTask {
                    task,
                    expected: "sender, receiver, subject and purpose fields",
                });
            }
            (_, TaskFields::Email(_)) => {
                return Err(TextforgeError::InvalidFieldsForTask {
                    task,
                    expected: "a topic",
                });
            }
        };

        // Every templated task has a template, either built in or overridden.
        let template = self.template_for(task).unwrap_or_default();
        render_template(template, &variables).map_err(|e| template_error(task, e))
    }
}

/// Build a prompt with the built-in templates.
pub fn build_prompt(task: Task, fields: &TaskFields) -> Result<String> {
    PromptBuilder::new().build(task, fields)
}

fn email_variables(email: &EmailFields) -> HashMap<String, String> {
    vars([
        ("sender", email.sender.as_str()),
        ("receiver", email.receiver.as_str()),
        ("subject", email.subject.as_str()),
        ("purpose", email.purpose.as_str()),
    ])
}

fn template_error(task: Task, e: TemplateError) -> TextforgeError {
    TextforgeError::UserError(format!(
        "failed to render {} prompt template: {}",
        task.identifier(),
        e
    ))
}
