//! Configuration constants and default value functions.

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "textforge.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "TEXTFORGE_CONFIG";

/// Default location of the generation event log.
pub const DEFAULT_EVENT_LOG: &str = ".textforge/events.ndjson";

// Default value functions for serde
pub(crate) fn default_output_dir() -> String {
    ".".to_string()
}
pub(crate) fn default_event_log() -> String {
    DEFAULT_EVENT_LOG.to_string()
}
