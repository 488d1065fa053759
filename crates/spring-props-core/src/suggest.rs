//! Suggestion engine
//!
//! Matches a resolved [`PathContext`](crate::context::PathContext) against the
//! catalog. Deeper catalog keys collapse onto the immediate child segment
//! below the parent path; candidates already declared in the document are
//! dropped.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, PropertyEntry};
use crate::context::join_path;
use crate::existing::ExistingPaths;

/// A key that may be inserted at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text the user sees and inserts (one segment, or a whole key when flat).
    pub key: String,
    pub full_path: String,
    /// The catalog documents `full_path` itself.
    pub is_leaf: bool,
    /// The catalog documents something below `full_path`.
    pub has_group_children: bool,
}

/// How catalog keys are collapsed into candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One candidate per immediate child segment of the parent path.
    Nested,
    /// Every catalog key is its own candidate.
    Flat,
}

fn matches_prefix(segment: &str, partial: &str) -> bool {
    partial.is_empty() || segment.to_lowercase().starts_with(&partial.to_lowercase())
}

/// Ranked candidates: leaves before groups, then lexicographic by key.
pub fn suggest(
    catalog: &Catalog,
    parent_path: &str,
    partial: &str,
    existing: &ExistingPaths,
    grouping: Grouping,
) -> Vec<Candidate> {
    let mut grouped: BTreeMap<&str, Candidate> = BTreeMap::new();

    for name in catalog.names() {
        let remainder = if parent_path.is_empty() {
            name
        } else {
            match name
                .strip_prefix(parent_path)
                .and_then(|rest| rest.strip_prefix('.'))
            {
                Some(rest) => rest,
                None => continue,
            }
        };

        let segment = match grouping {
            Grouping::Nested => remainder.split('.').next().unwrap_or(remainder),
            Grouping::Flat => remainder,
        };
        if grouped.contains_key(segment) || !matches_prefix(segment, partial) {
            continue;
        }

        let full_path = join_path(parent_path, segment);
        if existing.contains(&full_path) {
            continue;
        }

        grouped.insert(
            segment,
            Candidate {
                key: segment.to_string(),
                is_leaf: catalog.contains(&full_path),
                has_group_children: catalog.has_descendants(&full_path),
                full_path,
            },
        );
    }

    let mut candidates: Vec<Candidate> = grouped.into_values().collect();
    candidates.sort_by(|a, b| (!a.is_leaf, &a.key).cmp(&(!b.is_leaf, &b.key)));
    tracing::trace!(
        parent = parent_path,
        partial,
        count = candidates.len(),
        "suggested keys"
    );
    candidates
}

/// Enum literals of `entry` that start with `prefix` (case-insensitive), in
/// authored order.
pub fn suggest_values<'a>(entry: &'a PropertyEntry, prefix: &str) -> Vec<&'a str> {
    entry
        .enum_values
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|value| matches_prefix(value, prefix))
        .collect()
}
