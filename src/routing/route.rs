//! Route records, raw and compiled.

use serde::{Deserialize, Serialize};

use crate::routing::compiler::{compile_path, CompiledPath};
use crate::routing::error::RouteError;
use crate::routing::methods::Methods;

/// A registered route: pattern, accepted methods and an opaque target.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<T> {
    pub path: String,
    pub methods: Methods,
    pub target: T,
}

impl<T> Route<T> {
    pub fn new(path: impl Into<String>, target: T, methods: impl Into<Methods>) -> Self {
        Self {
            path: path.into(),
            methods: methods.into(),
            target,
        }
    }
}

impl<T: Clone> Route<T> {
    /// Run the pattern compiler over this route's path.
    pub fn compile(&self) -> Result<CompiledRoute<T>, RouteError> {
        Ok(CompiledRoute {
            path: self.path.clone(),
            methods: self.methods.clone(),
            target: self.target.clone(),
            matcher: compile_path(&self.path)?,
        })
    }
}

/// A route with its path matcher decided.
///
/// This is also the on-disk cache record: literal routes serialize as
/// `{path, methods, target}`, pattern routes add `matcher: {regex, captures}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRoute<T> {
    pub path: String,
    #[serde(default)]
    pub methods: Methods,
    pub target: T,
    #[serde(default = "literal", skip_serializing_if = "CompiledPath::is_literal")]
    pub matcher: CompiledPath,
}

fn literal() -> CompiledPath {
    CompiledPath::Literal
}

impl<T> CompiledRoute<T> {
    /// Returns the captured variables when `path` matches this route.
    ///
    /// Literal routes compare exactly and yield empty captures.
    pub fn match_path(&self, path: &str) -> Option<crate::routing::Captures> {
        match &self.matcher {
            CompiledPath::Literal => (self.path == path).then(Default::default),
            CompiledPath::Pattern(pattern) => pattern.captures(path),
        }
    }
}

impl<T> From<CompiledRoute<T>> for Route<T> {
    fn from(route: CompiledRoute<T>) -> Self {
        Self {
            path: route.path,
            methods: route.methods,
            target: route.target,
        }
    }
}
