//! HTTP method restrictions attached to a route.
//!
//! # Design Decisions
//! - Method names are compared exactly (case-sensitive): `get` is not `GET`
//! - Absent and empty specifiers both normalize to [`Methods::Any`]
//! - An empty method string passed to a match means "any method"

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The set of methods a route accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum Methods {
    /// No restriction.
    #[default]
    Any,
    /// Only the listed method names.
    Only(BTreeSet<String>),
}

impl Methods {
    /// Returns true if a request with `method` may use this route.
    pub fn accepts(&self, method: &str) -> bool {
        if method.is_empty() {
            return true;
        }
        match self {
            Methods::Any => true,
            Methods::Only(set) => set.contains(method),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Methods::Any)
    }

    /// Iterate the restricted method names (empty for `Any`).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let set = match self {
            Methods::Any => None,
            Methods::Only(set) => Some(set),
        };
        set.into_iter().flatten().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Methods {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set: BTreeSet<String> = iter
            .into_iter()
            .map(Into::into)
            .filter(|m| !m.is_empty())
            .collect();
        if set.is_empty() {
            Methods::Any
        } else {
            Methods::Only(set)
        }
    }
}

impl From<&str> for Methods {
    fn from(method: &str) -> Self {
        std::iter::once(method).collect()
    }
}

impl From<String> for Methods {
    fn from(method: String) -> Self {
        std::iter::once(method).collect()
    }
}

impl From<Vec<String>> for Methods {
    fn from(methods: Vec<String>) -> Self {
        methods.into_iter().collect()
    }
}

impl From<Vec<&str>> for Methods {
    fn from(methods: Vec<&str>) -> Self {
        methods.into_iter().collect()
    }
}

impl From<&[&str]> for Methods {
    fn from(methods: &[&str]) -> Self {
        methods.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Methods {
    fn from(methods: [&str; N]) -> Self {
        methods.into_iter().collect()
    }
}

impl<M: Into<Methods>> From<Option<M>> for Methods {
    fn from(methods: Option<M>) -> Self {
        methods.map(Into::into).unwrap_or_default()
    }
}

impl From<Methods> for Vec<String> {
    fn from(methods: Methods) -> Self {
        match methods {
            Methods::Any => Vec::new(),
            Methods::Only(set) => set.into_iter().collect(),
        }
    }
}
