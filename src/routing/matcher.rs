//! Route matching over a compiled table.
//!
//! # Responsibilities
//! - Scan compiled routes in registration order
//! - Return the first route accepting both path and method
//! - Collect the methods of path-only matches for `NotAllowed`
//!
//! # Design Decisions
//! - First match wins: order, not specificity, picks the route
//! - A method mismatch does not stop the scan; a later route may accept it
//! - Linear scan, no I/O, no allocation unless a route matches

use std::collections::BTreeSet;

use crate::observability::metrics;
use crate::routing::result::MatchResult;
use crate::routing::route::CompiledRoute;

/// Match `(path, method)` against `routes`.
///
/// An empty `method` accepts any route whose path matches.
pub fn match_routes<'a, T>(
    routes: &'a [CompiledRoute<T>],
    path: &str,
    method: &str,
) -> MatchResult<'a, T> {
    let mut allowed: BTreeSet<String> = BTreeSet::new();

    for route in routes {
        let Some(captures) = route.match_path(path) else {
            continue;
        };

        if route.methods.accepts(method) {
            tracing::trace!(path, method, route = %route.path, "Route matched");
            metrics::record_match("found");
            return MatchResult::Found {
                target: &route.target,
                captures,
            };
        }

        allowed.extend(route.methods.iter().map(str::to_string));
    }

    if allowed.is_empty() {
        tracing::trace!(path, method, "No route matched");
        metrics::record_match("not_found");
        MatchResult::NotFound
    } else {
        tracing::trace!(path, method, ?allowed, "Method not allowed");
        metrics::record_match("not_allowed");
        MatchResult::NotAllowed { allowed }
    }
}

/// An immutable compiled route table.
///
/// Unlike [`RouteTable`](crate::routing::RouteTable) it matches through
/// `&self`, so it can be shared across threads (e.g. behind an `Arc`) once
/// registration is finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Matcher<T> {
    routes: Vec<CompiledRoute<T>>,
}

impl<T> Matcher<T> {
    pub fn new(routes: Vec<CompiledRoute<T>>) -> Self {
        Self { routes }
    }

    pub fn match_route(&self, path: &str, method: &str) -> MatchResult<'_, T> {
        match_routes(&self.routes, path, method)
    }

    pub fn routes(&self) -> &[CompiledRoute<T>] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<CompiledRoute<T>> {
        self.routes
    }
}
