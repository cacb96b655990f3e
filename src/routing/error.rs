//! Routing error definitions.

use thiserror::Error;

/// Errors raised while compiling route patterns.
///
/// "No route matched" and "method not allowed" are not errors; they are
/// ordinary [`MatchResult`](crate::routing::MatchResult) variants.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A placeholder referenced an assertion key outside the fixed table.
    #[error("Unknown assertion '{assertion}' in route pattern '{pattern}'")]
    InvalidAssertion { pattern: String, assertion: String },

    /// The same capture name appears twice in one pattern.
    #[error("Duplicate capture '{name}' in route pattern '{pattern}'")]
    DuplicateCapture { pattern: String, name: String },

    /// The generated expression was rejected by the regex engine.
    #[error("Invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
