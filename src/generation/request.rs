//! Request and result types.

use crate::generation::params::GenerationParams;
use crate::prompt::TaskFields;
use crate::task::{RESULT_MIME_TYPE, Task};
use serde::{Deserialize, Serialize};

/// Everything needed to produce one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub task: Task,
    pub fields: TaskFields,
    pub params: GenerationParams,
}

impl PromptRequest {
    pub fn new(task: Task, fields: TaskFields, params: GenerationParams) -> Self {
        Self {
            task,
            fields,
            params,
        }
    }
}

/// Generated text and the task it was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub task: Task,
    pub text: String,
}

impl GenerationResult {
    /// Suggested download name, `<task_slug>_generated.txt`.
    pub fn filename(&self) -> String {
        self.task.output_filename()
    }

    pub fn mime_type(&self) -> &'static str {
        RESULT_MIME_TYPE
    }
}
