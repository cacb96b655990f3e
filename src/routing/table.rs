//! Route registration and lazily compiled lookup.
//!
//! # Responsibilities
//! - Record routes in registration order (group prefixes applied)
//! - Compile every route once and cache the result
//! - Invalidate the cache whenever a route is added
//! - Match through the cached compiled form
//!
//! # Design Decisions
//! - Cache state is explicit (`Uncompiled` / `Compiled`), never inferred
//! - A table built from a precompiled cache returns that cache verbatim
//! - Lazy compilation needs `&mut self`; freeze into a [`Matcher`] to share

use std::convert::Infallible;

use crate::config::schema::{GroupConfig, RouterConfig};
use crate::observability::metrics;
use crate::routing::error::RouteError;
use crate::routing::group::{GroupScope, GroupStack};
use crate::routing::matcher::{match_routes, Matcher};
use crate::routing::methods::Methods;
use crate::routing::result::MatchResult;
use crate::routing::route::{CompiledRoute, Route};

#[derive(Debug, Clone)]
enum CompileState<T> {
    Uncompiled,
    Compiled(Vec<CompiledRoute<T>>),
}

/// Ordered route table with a lazily built compiled cache.
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: Vec<Route<T>>,
    compiled: CompileState<T>,
    pub(crate) groups: GroupStack,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            compiled: CompileState::Uncompiled,
            groups: GroupStack::default(),
        }
    }
}

impl<T> RouteTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table around an already compiled route list.
    ///
    /// `compile()` returns `routes` unchanged until another route is added.
    pub fn from_compiled(routes: Vec<CompiledRoute<T>>) -> Self
    where
        T: Clone,
    {
        Self {
            routes: routes.iter().cloned().map(Route::from).collect(),
            compiled: CompileState::Compiled(routes),
            groups: GroupStack::default(),
        }
    }

    /// Register a route. Active group prefixes are prepended to `path`.
    pub fn route(
        &mut self,
        path: impl AsRef<str>,
        target: T,
        methods: impl Into<Methods>,
    ) -> &mut Self {
        let path = self.groups.apply(path.as_ref());
        if matches!(self.compiled, CompileState::Compiled(_)) {
            tracing::trace!(path = %path, "Route added, compiled cache invalidated");
        }
        self.compiled = CompileState::Uncompiled;
        self.routes.push(Route::new(path, target, methods));
        self
    }

    /// Register a route accepting any method.
    pub fn any(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, Methods::Any)
    }

    pub fn get(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "GET")
    }

    pub fn head(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "HEAD")
    }

    pub fn post(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "POST")
    }

    pub fn put(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "PUT")
    }

    pub fn patch(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "PATCH")
    }

    pub fn delete(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "DELETE")
    }

    pub fn options(&mut self, path: impl AsRef<str>, target: T) -> &mut Self {
        self.route(path, target, "OPTIONS")
    }

    /// Register the routes added by `f` under `prefix`.
    pub fn group<F>(&mut self, prefix: impl Into<String>, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let grouped = self.try_group(prefix, |table| {
            f(table);
            Ok::<(), Infallible>(())
        });
        match grouped {
            Ok(table) => table,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`group`](Self::group).
    ///
    /// The prefix is removed before this returns, whether `f` succeeds,
    /// fails, or panics. Routes `f` registered before failing are kept.
    pub fn try_group<F, E>(&mut self, prefix: impl Into<String>, f: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        {
            let mut scope = GroupScope::enter(self, prefix.into());
            f(&mut *scope)?;
        }
        Ok(self)
    }

    /// Raw routes in registration order.
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self.compiled, CompileState::Compiled(_))
    }
}

impl<T: Clone> RouteTable<T> {
    /// Compiled routes, building and caching them on first use.
    pub fn compile(&mut self) -> Result<&[CompiledRoute<T>], RouteError> {
        if let CompileState::Uncompiled = self.compiled {
            let compiled = self
                .routes
                .iter()
                .map(Route::compile)
                .collect::<Result<Vec<_>, _>>()?;

            tracing::debug!(
                routes = compiled.len(),
                patterns = compiled.iter().filter(|r| !r.matcher.is_literal()).count(),
                "Compiled route table"
            );
            metrics::record_compile();
            self.compiled = CompileState::Compiled(compiled);
        }

        match &self.compiled {
            CompileState::Compiled(routes) => Ok(routes),
            CompileState::Uncompiled => Ok(&[]),
        }
    }

    /// Match `(path, method)`, compiling first if needed.
    ///
    /// Pass an empty `method` to accept any method.
    pub fn match_route(&mut self, path: &str, method: &str) -> Result<MatchResult<'_, T>, RouteError> {
        let routes = self.compile()?;
        Ok(match_routes(routes, path, method))
    }

    /// Compile and turn into an immutable, shareable [`Matcher`].
    pub fn freeze(mut self) -> Result<Matcher<T>, RouteError> {
        self.compile()?;
        match self.compiled {
            CompileState::Compiled(routes) => Ok(Matcher::new(routes)),
            CompileState::Uncompiled => Ok(Matcher::new(Vec::new())),
        }
    }
}

impl RouteTable<String> {
    /// Register every route of a parsed route file, groups included.
    pub fn from_config(config: &RouterConfig) -> Self {
        let mut table = Self::new();
        table.register_config(config);
        table
    }

    /// Append the routes of a parsed route file to this table.
    pub fn register_config(&mut self, config: &RouterConfig) -> &mut Self {
        for route in &config.routes {
            self.route(&route.path, route.target.clone(), route.methods.clone());
        }
        for group in &config.groups {
            self.register_group(group);
        }
        self
    }

    fn register_group(&mut self, group: &GroupConfig) -> &mut Self {
        self.group(group.prefix.as_str(), |table| {
            for route in &group.routes {
                table.route(&route.path, route.target.clone(), route.methods.clone());
            }
            for nested in &group.groups {
                table.register_group(nested);
            }
        })
    }
}
