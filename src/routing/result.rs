//! Outcome of matching a `(path, method)` pair.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::routing::compiler::Captures;

/// Three-way match outcome. Callers branch on the variant; neither
/// `NotAllowed` nor `NotFound` is an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchResult<'a, T> {
    /// A route accepted the path and method.
    Found { target: &'a T, captures: Captures },
    /// The path matched at least one route, but none accepted the method.
    NotAllowed { allowed: BTreeSet<String> },
    NotFound,
}

impl<'a, T> MatchResult<'a, T> {
    /// HTTP status code conventionally associated with the outcome.
    pub fn status(&self) -> u16 {
        match self {
            MatchResult::Found { .. } => 200,
            MatchResult::NotAllowed { .. } => 405,
            MatchResult::NotFound => 404,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }

    /// The matched target, if any.
    pub fn target(&self) -> Option<&'a T> {
        match self {
            MatchResult::Found { target, .. } => Some(*target),
            _ => None,
        }
    }
}
