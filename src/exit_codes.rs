//! Exit code constants for the textforge CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config, fields that do not match the task)
//! - 2: Invalid generation parameter
//! - 3: Backend not ready (not configured or could not be started)
//! - 4: Generation failed inside the backend

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable config, or fields that do not match the task.
pub const USER_ERROR: i32 = 1;

/// A decoding parameter was outside its allowed range.
pub const INVALID_PARAMETER: i32 = 2;

/// The backend for the selected model size is missing or could not be loaded.
pub const BACKEND_NOT_READY: i32 = 3;

/// The backend raised an error while generating.
pub const GENERATION_FAILURE: i32 = 4;
