//! Static route table.
//!
//! Entries are built once at startup and never change. Paths of child
//! entries are relative to their parent.

use std::collections::{BTreeMap, HashSet};

use crate::router::error::RouteError;
use crate::router::resolve::{self, PatternSegment};
use crate::views::ViewId;

/// What an entry does when it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Show a view.
    View(ViewId),
    /// Continue resolution at the named route.
    Redirect(String),
}

/// One path pattern in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub name: Option<String>,
    pub target: RouteTarget,
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    /// Named entry that displays `view`.
    pub fn view(path: &str, name: &str, view: ViewId) -> Self {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            target: RouteTarget::View(view),
            children: Vec::new(),
        }
    }

    /// Unnamed entry that forwards to the route called `to`.
    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            target: RouteTarget::Redirect(to.to_string()),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }

    pub(crate) fn pattern(&self) -> Vec<PatternSegment> {
        resolve::parse_pattern(&self.path)
    }
}

/// Ordered list of route entries with at most one level of nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build and validate a table.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    /// The application's routes: the map, and a location page with
    /// restaurants and events tabs.
    pub fn letsmeet() -> Self {
        Self {
            entries: vec![
                RouteEntry::redirect("/", "map"),
                RouteEntry::view("/map", "map", ViewId::Map),
                RouteEntry::view("/location/:id/", "location", ViewId::Location).with_children(
                    vec![
                        RouteEntry::view("restaurants", "location-restaurants", ViewId::Restaurants),
                        RouteEntry::view("events", "location-events", ViewId::Events),
                    ],
                ),
            ],
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Find a named entry and, for children, its parent.
    pub fn find(&self, name: &str) -> Option<(Option<&RouteEntry>, &RouteEntry)> {
        for entry in &self.entries {
            if entry.name.as_deref() == Some(name) {
                return Some((None, entry));
            }
            for child in &entry.children {
                if child.name.as_deref() == Some(name) {
                    return Some((Some(entry), child));
                }
            }
        }
        None
    }

    /// Build the concrete path of the route called `name`.
    ///
    /// Parameter values must be non-empty and free of `/`, `?` and `#` so
    /// the path resolves back to the same route and values.
    pub fn href(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String, RouteError> {
        let (parent, entry) = self.find(name).ok_or_else(|| RouteError::UnknownName {
            name: name.to_string(),
        })?;

        let mut pattern = parent.map(RouteEntry::pattern).unwrap_or_default();
        pattern.extend(entry.pattern());

        let mut out = String::new();
        for segment in pattern {
            out.push('/');
            match segment {
                PatternSegment::Static(s) => out.push_str(&s),
                PatternSegment::Param(p) => {
                    let value = params.get(&p).ok_or_else(|| RouteError::MissingParam {
                        route: name.to_string(),
                        param: p.clone(),
                    })?;
                    if !is_segment_value(value) {
                        return Err(RouteError::InvalidParam {
                            route: name.to_string(),
                            param: p,
                            value: value.clone(),
                        });
                    }
                    out.push_str(value);
                }
            }
        }

        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }

    /// Checks:
    /// - Sibling paths are unique
    /// - Route names are unique across the table
    /// - Redirects point at existing names
    /// - Children are not nested further
    /// - The root path resolves
    pub fn validate(&self) -> Result<(), RouteError> {
        let mut names = HashSet::new();
        check_siblings(&self.entries, "top level")?;

        for entry in &self.entries {
            check_entry(self, entry, &mut names)?;
            check_siblings(&entry.children, &entry.path)?;
            for child in &entry.children {
                if !child.children.is_empty() {
                    return Err(RouteError::InvalidTable {
                        message: format!(
                            "Route '{}' nests below '{}'; only one level of children is supported",
                            child.path, entry.path
                        ),
                    });
                }
                check_entry(self, child, &mut names)?;
            }
        }

        resolve::resolve(self, "/").map_err(|e| RouteError::InvalidTable {
            message: format!("Root path does not resolve: {}", e),
        })?;

        Ok(())
    }
}

fn is_segment_value(value: &str) -> bool {
    !value.is_empty() && !value.contains(['/', '?', '#'])
}

fn check_entry<'a>(
    table: &RouteTable,
    entry: &'a RouteEntry,
    names: &mut HashSet<&'a str>,
) -> Result<(), RouteError> {
    if let Some(name) = entry.name.as_deref() {
        if !names.insert(name) {
            return Err(RouteError::InvalidTable {
                message: format!("Duplicate route name '{}'", name),
            });
        }
    }
    if let RouteTarget::Redirect(to) = &entry.target {
        if table.find(to).is_none() {
            return Err(RouteError::InvalidTable {
                message: format!("Route '{}' redirects to unknown route '{}'", entry.path, to),
            });
        }
    }
    Ok(())
}

fn check_siblings(entries: &[RouteEntry], scope: &str) -> Result<(), RouteError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.pattern()) {
            return Err(RouteError::InvalidTable {
                message: format!("Duplicate path '{}' under {}", entry.path, scope),
            });
        }
    }
    Ok(())
}
