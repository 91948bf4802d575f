//! Navigation state machine.
//!
//! The active route is recomputed synchronously on every navigation. Paths
//! that match nothing land on the fallback route instead of failing.

use std::collections::BTreeMap;

use crate::router::error::RouteError;
use crate::router::resolve::{normalize_path, resolve, Resolved};
use crate::router::table::RouteTable;

pub struct Router {
    table: RouteTable,
    fallback: String,
    current: Resolved,
    history: Vec<Resolved>,
}

impl Router {
    /// Create a router positioned at `initial_path`.
    ///
    /// # Errors
    /// Returns error if `fallback` is not a route that can be reached
    /// without parameters, or if `initial_path` hits a broken redirect.
    pub fn new(table: RouteTable, fallback: &str, initial_path: &str) -> Result<Self, RouteError> {
        // Validates the fallback up front so later navigations cannot fail on it.
        table.href(fallback, &BTreeMap::new())?;

        let current = resolve_or_fallback(&table, fallback, initial_path)?;
        tracing::info!(
            path = %current.path,
            route = %current.name,
            "router initialized"
        );

        Ok(Self {
            table,
            fallback: fallback.to_string(),
            current,
            history: Vec::new(),
        })
    }

    /// The active route.
    pub fn current(&self) -> &Resolved {
        &self.current
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Previously active routes, oldest first.
    pub fn history(&self) -> &[Resolved] {
        &self.history
    }

    /// True when `name` is the active route or one of its parents.
    pub fn is_active(&self, name: &str) -> bool {
        self.current.matched.iter().any(|m| m == name)
    }

    /// Navigate to `path`.
    ///
    /// On error the active route is left unchanged.
    pub fn push(&mut self, path: &str) -> Result<&Resolved, RouteError> {
        let next = resolve_or_fallback(&self.table, &self.fallback, path)?;
        tracing::info!(
            from = %self.current.path,
            to = %next.path,
            route = %next.name,
            "navigate"
        );
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);
        Ok(&self.current)
    }

    /// Navigate to the route called `name`.
    pub fn push_named(
        &mut self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<&Resolved, RouteError> {
        let path = self.table.href(name, params)?;
        self.push(&path)
    }

    /// Return to the previous route. `None` when there is no history.
    pub fn back(&mut self) -> Option<&Resolved> {
        let previous = self.history.pop()?;
        tracing::info!(to = %previous.path, "navigate back");
        self.current = previous;
        Some(&self.current)
    }
}

fn resolve_or_fallback(
    table: &RouteTable,
    fallback: &str,
    path: &str,
) -> Result<Resolved, RouteError> {
    match resolve(table, path) {
        Err(RouteError::NotFound { path: missing }) => {
            tracing::warn!(path = %missing, fallback, "no route matches, using fallback");
            let target = table.href(fallback, &BTreeMap::new())?;
            let mut resolved = resolve(table, &target)?;
            resolved.redirected_from = None;
            resolved.fallback_from = Some(normalize_path(path));
            Ok(resolved)
        }
        other => other,
    }
}
