//! Existing-keys index
//!
//! The set of dotted paths already declared anywhere in a document. YAML is
//! walked structurally when it parses; otherwise the indentation stack is
//! replayed over every line so half-typed documents still yield a best-effort
//! set.

use std::collections::BTreeSet;

use serde_yaml::Value;

use crate::context::{push_ancestor, stack_path};
use crate::document::Document;
use crate::parsers::yaml::{key_segment, parse_yaml};
use crate::Dialect;

/// Dotted paths declared in a document.
pub type ExistingPaths = BTreeSet<String>;

/// Build the existing-keys index for `doc`.
pub fn index(doc: &Document<'_>) -> ExistingPaths {
    match doc.dialect() {
        Dialect::Yaml => match parse_yaml(doc.text()) {
            Ok(value) => {
                let mut paths = ExistingPaths::new();
                collect_paths(&value, "", &mut paths);
                paths
            }
            Err(err) => {
                tracing::debug!(error = %err, "YAML parse failed, indexing keys from lines");
                index_lines(doc)
            }
        },
        Dialect::Properties => doc
            .lines()
            .iter()
            .filter_map(|line| line.key)
            .map(str::to_string)
            .collect(),
        Dialect::Unknown => ExistingPaths::new(),
    }
}

/// Emit one path per mapping key at every depth. Sequences are opaque.
fn collect_paths(value: &Value, prefix: &str, paths: &mut ExistingPaths) {
    let Value::Mapping(mapping) = value else {
        return;
    };
    for (key, child) in mapping {
        let Some(segment) = key_segment(key) else {
            continue;
        };
        let path = if prefix.is_empty() {
            segment
        } else {
            format!("{}.{}", prefix, segment)
        };
        collect_paths(child, &path, paths);
        paths.insert(path);
    }
}

/// Line-based fallback: the ancestor stack replayed over the whole document.
fn index_lines(doc: &Document<'_>) -> ExistingPaths {
    let mut paths = ExistingPaths::new();
    let mut stack = Vec::new();
    for line in doc.lines() {
        if let Some(key) = line.key {
            push_ancestor(&mut stack, key, line.indent);
            paths.insert(stack_path(&stack));
        }
    }
    paths
}
