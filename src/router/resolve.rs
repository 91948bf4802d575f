//! Pure path resolution: `(table, path) -> Resolved`.
//!
//! Matching is exact on segment count. Among matching entries the one with
//! the most static segments wins; ties go to the earlier entry. Redirects
//! are followed by name, carrying the extracted parameters along.

use std::collections::BTreeMap;

use crate::router::error::RouteError;
use crate::router::table::{RouteEntry, RouteTable, RouteTarget};
use crate::views::ViewId;

const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum PatternSegment {
    Static(String),
    Param(String),
}

pub(crate) fn parse_pattern(path: &str) -> Vec<PatternSegment> {
    split_segments(path)
        .map(|s| match s.strip_prefix(':') {
            Some(name) => PatternSegment::Param(name.to_string()),
            None => PatternSegment::Static(s.to_string()),
        })
        .collect()
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Drop query and fragment, collapse repeated and trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let joined: Vec<&str> = split_segments(path).collect();
    format!("/{}", joined.join("/"))
}

/// Result of resolving a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Name of the deepest matched route.
    pub name: String,
    /// Normalized path that produced this match.
    pub path: String,
    /// Positional parameters, e.g. `id` for `/location/:id/`.
    pub params: BTreeMap<String, String>,
    /// Names of matched routes, parent first.
    pub matched: Vec<String>,
    /// View of the deepest matched route.
    pub view: ViewId,
    /// Views to display, parent first.
    pub views: Vec<ViewId>,
    /// Original path when a redirect was followed.
    pub redirected_from: Option<String>,
    /// Original path when nothing matched and the fallback route was used.
    pub fallback_from: Option<String>,
}

impl Resolved {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

struct Candidate<'a> {
    parent: Option<&'a RouteEntry>,
    entry: &'a RouteEntry,
    params: BTreeMap<String, String>,
    specificity: usize,
}

/// Resolve `path` to a named route, following redirects.
pub fn resolve(table: &RouteTable, path: &str) -> Result<Resolved, RouteError> {
    let start = normalize_path(path);
    let mut current = start.clone();

    for _ in 0..=MAX_REDIRECTS {
        let candidate = best_match(table, &current).ok_or_else(|| RouteError::NotFound {
            path: current.clone(),
        })?;

        let entry = candidate.entry;
        match &entry.target {
            RouteTarget::Redirect(to) => {
                current = table.href(to, &candidate.params)?;
            }
            RouteTarget::View(view) => {
                let view = *view;
                let mut resolved = build(candidate, view, current.clone())?;
                if current != start {
                    resolved.redirected_from = Some(start);
                }
                return Ok(resolved);
            }
        }
    }

    Err(RouteError::RedirectLoop { path: start })
}

fn build(candidate: Candidate<'_>, view: ViewId, path: String) -> Result<Resolved, RouteError> {
    let chain: Vec<&RouteEntry> = candidate
        .parent
        .into_iter()
        .chain(std::iter::once(candidate.entry))
        .collect();

    let name = candidate
        .entry
        .name
        .clone()
        .ok_or_else(|| RouteError::InvalidTable {
            message: format!("Route '{}' displays a view but has no name", candidate.entry.path),
        })?;

    Ok(Resolved {
        name,
        path,
        params: candidate.params,
        view,
        matched: chain.iter().filter_map(|e| e.name.clone()).collect(),
        views: chain
            .iter()
            .filter_map(|e| match e.target {
                RouteTarget::View(view) => Some(view),
                RouteTarget::Redirect(_) => None,
            })
            .collect(),
        redirected_from: None,
        fallback_from: None,
    })
}

fn best_match<'a>(table: &'a RouteTable, path: &str) -> Option<Candidate<'a>> {
    let segments: Vec<&str> = split_segments(path).collect();
    let mut best: Option<Candidate<'a>> = None;

    let mut consider = |candidate: Candidate<'a>| {
        let better = best
            .as_ref()
            .map_or(true, |b| candidate.specificity > b.specificity);
        if better {
            best = Some(candidate);
        }
    };

    for entry in table.entries() {
        let parent_pattern = entry.pattern();
        if let Some((params, specificity)) = match_pattern(&parent_pattern, &segments) {
            consider(Candidate {
                parent: None,
                entry,
                params,
                specificity,
            });
        }

        for child in &entry.children {
            let mut pattern = parent_pattern.clone();
            pattern.extend(child.pattern());
            if let Some((params, specificity)) = match_pattern(&pattern, &segments) {
                consider(Candidate {
                    parent: Some(entry),
                    entry: child,
                    params,
                    specificity,
                });
            }
        }
    }

    best
}

fn match_pattern(
    pattern: &[PatternSegment],
    segments: &[&str],
) -> Option<(BTreeMap<String, String>, usize)> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    let mut statics = 0;
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            PatternSegment::Static(s) if s == actual => statics += 1,
            PatternSegment::Static(_) => return None,
            PatternSegment::Param(name) => {
                params.insert(name.clone(), (*actual).to_string());
            }
        }
    }
    Some((params, statics))
}
