//! Route grouping (path prefixes applied at registration time).
//!
//! Prefixes are concatenated in push order without inserting separators,
//! so `"/api"` + `"/v1"` + `"/users"` registers `"/api/v1/users"`.

use std::ops::{Deref, DerefMut};

use crate::routing::table::RouteTable;

/// Stack of active group prefixes.
#[derive(Debug, Clone, Default)]
pub(crate) struct GroupStack {
    prefixes: Vec<String>,
}

impl GroupStack {
    pub(crate) fn push(&mut self, prefix: String) {
        self.prefixes.push(prefix);
    }

    pub(crate) fn pop(&mut self) {
        self.prefixes.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.prefixes.len()
    }

    /// Prepend every active prefix to `path`. An empty result becomes `/`.
    pub(crate) fn apply(&self, path: &str) -> String {
        let mut full: String = self.prefixes.concat();
        full.push_str(path);
        if full.is_empty() {
            full.push('/');
        }
        full
    }
}

/// Holds one group prefix on the table's stack for as long as it lives.
///
/// The prefix is popped in `Drop`, so it is released on normal return,
/// on an early `Err` return and while unwinding from a panic.
pub(crate) struct GroupScope<'t, T> {
    table: &'t mut RouteTable<T>,
}

impl<'t, T> GroupScope<'t, T> {
    pub(crate) fn enter(table: &'t mut RouteTable<T>, prefix: String) -> Self {
        table.groups.push(prefix);
        Self { table }
    }
}

impl<T> Deref for GroupScope<'_, T> {
    type Target = RouteTable<T>;

    fn deref(&self) -> &Self::Target {
        self.table
    }
}

impl<T> DerefMut for GroupScope<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.table
    }
}

impl<T> Drop for GroupScope<'_, T> {
    fn drop(&mut self) {
        self.table.groups.pop();
    }
}
