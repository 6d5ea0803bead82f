//! Generation task types.
//!
//! A [`Task`] names the kind of content the user wants generated. It selects
//! the prompt template and determines the suggested download filename.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to the task slug to form the download filename.
pub const GENERATED_FILE_SUFFIX: &str = "_generated.txt";

/// MIME type of the downloadable result.
pub const RESULT_MIME_TYPE: &str = "text/plain";

/// The category of content to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    Email,
    Essay,
    SocialMediaPost,
    Story,
    Poem,
    GeneralPurpose,
}

impl Task {
    /// All tasks, in the order they are offered to the user.
    pub const ALL: [Task; 6] = [
        Task::Email,
        Task::Essay,
        Task::SocialMediaPost,
        Task::Story,
        Task::Poem,
        Task::GeneralPurpose,
    ];

    /// Parse a task from its identifier (`social-media-post`) or display name
    /// (`Social Media Post`). Matching is case-insensitive and treats spaces,
    /// dashes and underscores alike.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Task::ALL
            .into_iter()
            .find(|task| task.identifier() == normalized)
    }

    /// Stable identifier used on the command line and in configuration files.
    pub fn identifier(&self) -> &'static str {
        match self {
            Task::Email => "email",
            Task::Essay => "essay",
            Task::SocialMediaPost => "social-media-post",
            Task::Story => "story",
            Task::Poem => "poem",
            Task::GeneralPurpose => "general-purpose",
        }
    }

    /// Human-readable name shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            Task::Email => "Email",
            Task::Essay => "Essay",
            Task::SocialMediaPost => "Social Media Post",
            Task::Story => "Story",
            Task::Poem => "Poem",
            Task::GeneralPurpose => "General Purpose",
        }
    }

    /// Display name lowercased with spaces replaced by underscores.
    pub fn slug(&self) -> String {
        self.display_name().to_lowercase().replace(' ', "_")
    }

    /// Suggested filename for the generated text (`<slug>_generated.txt`).
    pub fn output_filename(&self) -> String {
        format!("{}{}", self.slug(), GENERATED_FILE_SUFFIX)
    }

    /// Whether this task takes structured email fields instead of a topic.
    pub fn uses_email_fields(&self) -> bool {
        matches!(self, Task::Email)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_media_post_filename() {
        let task = Task::SocialMediaPost;
        assert_eq!(task.display_name(), "Social Media Post");
        assert_eq!(task.slug(), "social_media_post");
        assert_eq!(task.output_filename(), "social_media_post_generated.txt");
    }

    #[test]
    fn test_single_word_slugs() {
        assert_eq!(Task::Email.output_filename(), "email_generated.txt");
        assert_eq!(Task::Poem.slug(), "poem");
        assert_eq!(Task::GeneralPurpose.slug(), "general_purpose");
    }

    #[test]
    fn test_from_str_accepts_identifiers_and_display_names() {
        assert_eq!(Task::from_str("essay"), Some(Task::Essay));
        assert_eq!(
            Task::from_str("social-media-post"),
            Some(Task::SocialMediaPost)
        );
        assert_eq!(
            Task::from_str("Social Media Post"),
            Some(Task::SocialMediaPost)
        );
        assert_eq!(
            Task::from_str("general_purpose"),
            Some(Task::GeneralPurpose)
        );
        assert_eq!(Task::from_str("  POEM "), Some(Task::Poem));
        assert_eq!(Task::from_str("limerick"), None);
    }

    #[test]
    fn test_identifiers_round_trip() {
        for task in Task::ALL {
            assert_eq!(Task::from_str(task.identifier()), Some(task));
            assert_eq!(Task::from_str(task.display_name()), Some(task));
        }
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let yaml = serde_yaml::to_string(&Task::SocialMediaPost).unwrap();
        assert_eq!(yaml.trim(), "social-media-post");

        let task: Task = serde_yaml::from_str("general-purpose").unwrap();
        assert_eq!(task, Task::GeneralPurpose);
    }

    #[test]
    fn test_only_email_uses_email_fields() {
        for task in Task::ALL {
            assert_eq!(task.uses_email_fields(), task == Task::Email);
        }
    }
}
