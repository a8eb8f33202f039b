//! Error type for the autocomplete widget and its bundled sources.

use thiserror::Error;
use tracing::warn;

/// Domain-specific errors for the autocomplete widget
#[derive(Error, Debug)]
pub enum AutocompleteError {
    #[error("Failed to compile search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Lookup for '{query}' failed: {message}")]
    Lookup { query: String, message: String },

    #[error("Lookup for '{query}' was dropped without an answer")]
    LookupDropped { query: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config loading failed for '{path}': {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutocompleteError>;

/// Recover from a failure by logging it with the caller's location.
///
/// ```ignore
/// use autocomplete_kit::error::ResultExt;
///
/// let candidates = outcome.warn_on_err("Lookup").unwrap_or_default();
/// ```
pub trait ResultExt<T> {
    /// Log `"{action} failed"` as a warning and return `None` on error.
    fn warn_on_err(self, action: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self, action: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = %error,
                    file = caller.file(),
                    line = caller.line(),
                    "{} failed",
                    action
                );
                None
            }
        }
    }
}
