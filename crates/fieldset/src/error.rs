//! Configuration errors raised when a rule set is installed

use thiserror::Error;

/// A definitely-malformed rule descriptor, rejected at install time.
///
/// Unknown rule types are deliberately NOT a configuration error: they are
/// skipped at evaluation time so that custom validators can be registered
/// after the rules are installed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field `{field}`: rule #{index} has an empty type")]
    MissingType { field: String, index: usize },

    #[error("field `{field}`: `{kind}` rule #{index} has an empty message")]
    MissingMessage {
        field: String,
        index: usize,
        kind: String,
    },

    #[error("field `{field}`: `{kind}` rule requires a value")]
    MissingValue { field: String, kind: String },

    #[error("field `{field}`: `{kind}` rule requires a numeric value, got {value}")]
    NotNumeric {
        field: String,
        kind: String,
        value: serde_json::Value,
    },

    #[error("field `{field}`: regex rule has an invalid pattern `{pattern}`")]
    BadPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rules are not a valid field-to-rules mapping")]
    Json(#[from] serde_json::Error),
}
