//! User-supplied inputs for a prompt.

use crate::task::Task;
use serde::{Deserialize, Serialize};

/// Structured fields for an email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailFields {
    pub sender: String,
    pub receiver: String,
    pub subject: String,
    pub purpose: String,
}

impl EmailFields {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        subject: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            subject: subject.into(),
            purpose: purpose.into(),
        }
    }
}

/// The inputs that fill a task's template.
///
/// [`Task::Email`] takes [`TaskFields::Email`]; every other task takes a free-text
/// [`TaskFields::Topic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFields {
    Email(EmailFields),
    Topic(String),
}

impl TaskFields {
    pub fn topic(topic: impl Into<String>) -> Self {
        TaskFields::Topic(topic.into())
    }

    /// Whether these fields are the right shape for `task`.
    pub fn matches(&self, task: Task) -> bool {
        match self {
            TaskFields::Email(_) => task.uses_email_fields(),
            TaskFields::Topic(_) => !task.uses_email_fields(),
        }
    }

    /// Whether every text field is empty.
    pub fn is_blank(&self) -> bool {
        match self {
            TaskFields::Email(fields) => [
                &fields.sender,
                &fields.receiver,
                &fields.subject,
                &fields.purpose,
            ]
            .iter()
            .all(|s| s.is_empty()),
            TaskFields::Topic(topic) => topic.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        let email = TaskFields::Email(EmailFields::default());
        let topic = TaskFields::topic("rain");

        assert!(email.matches(Task::Email));
        assert!(!email.matches(Task::Essay));
        assert!(!topic.matches(Task::Email));
        for task in Task::ALL.into_iter().filter(|t| *t != Task::Email) {
            assert!(topic.matches(task), "topic should match {task}");
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(TaskFields::topic("").is_blank());
        assert!(!TaskFields::topic("x").is_blank());
        assert!(TaskFields::Email(EmailFields::default()).is_blank());

        let fields = EmailFields {
            subject: "Hi".to_string(),
            ..Default::default()
        };
        assert!(!TaskFields::Email(fields).is_blank());
    }
}
