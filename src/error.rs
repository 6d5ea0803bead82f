//! Error types for textforge.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::task::Task;
use thiserror::Error;

/// Main error type for textforge operations.
///
/// Every variant is terminal for the current request; nothing is retried.
#[derive(Error, Debug)]
pub enum TextforgeError {
    /// The supplied fields do not match the selected task.
    #[error("{task} requires {expected}")]
    InvalidFieldsForTask {
        /// The task that was requested.
        task: Task,
        /// Human-readable description of the fields the task needs.
        expected: &'static str,
    },

    /// A decoding parameter is outside its allowed range.
    #[error("{name} must be {range}, got {value}")]
    InvalidParameter {
        /// Parameter name as the user knows it (e.g. `temperature`).
        name: &'static str,
        /// The rejected value, formatted.
        value: String,
        /// Description of the allowed range.
        range: &'static str,
    },

    /// No backend is loaded or loadable for the request.
    #[error("backend not ready: {0}")]
    BackendNotReady(String),

    /// The backend raised an error during generation.
    #[error("generation failed: {cause}")]
    GenerationFailed {
        /// The backend's own description of what went wrong.
        cause: String,
    },

    /// User provided invalid arguments or the environment is in an invalid state.
    #[error("{0}")]
    UserError(String),
}

impl TextforgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TextforgeError::InvalidFieldsForTask { .. } => exit_codes::USER_ERROR,
            TextforgeError::InvalidParameter { .. } => exit_codes::INVALID_PARAMETER,
            TextforgeError::BackendNotReady(_) => exit_codes::BACKEND_NOT_READY,
            TextforgeError::GenerationFailed { .. } => exit_codes::GENERATION_FAILURE,
            TextforgeError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for textforge operations.
pub type Result<T> = std::result::Result<T, TextforgeError>;
