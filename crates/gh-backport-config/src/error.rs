//! Configuration errors
//!
//! All variants are fatal to the whole run and name the offending
//! input, matching the action's validation messages.

use thiserror::Error;

/// Errors produced while building or validating a [`crate::BackportConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An enum-valued input had an unrecognized value.
    #[error("Expected input '{field}' to be {expected}, but was '{value}'")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    /// A pattern input did not compile.
    #[error("Input '{field}' is not a valid regular expression: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The label pattern cannot name a target branch without a capture group.
    #[error(
        "Input '{field}' must contain a capture group for the target branch, \
         but '{pattern}' has none"
    )]
    MissingCaptureGroup {
        field: &'static str,
        pattern: String,
    },

    /// A required input was absent or empty.
    #[error("Required input '{0}' is missing")]
    MissingInput(&'static str),

    /// The experimental input was not a JSON object.
    #[error("Input 'experimental' is not a JSON object: {0}")]
    InvalidExperimental(String),
}
