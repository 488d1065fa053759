//! # spring-props-core
//!
//! Completion, hover, formatting and validation for Spring Boot configuration
//! files.
//!
//! Supports:
//! - `.properties` files (flat `key=value`)
//! - `.yml` / `.yaml` files (nested indentation)
//!
//! Every entry point is a pure function of the document path, its current
//! text and, where relevant, the cursor. Nothing is cached between calls; the
//! only shared state is the read-only [`Catalog`].

rust_i18n::i18n!("../../locales", fallback = "en");

pub mod catalog;
pub mod completion;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod document;
pub mod existing;
pub mod format;
pub mod hover;
pub mod locale;
pub mod parsers;
mod regex_util;
pub mod suggest;
pub mod validate;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use catalog::{Catalog, PropertyEntry, PropertyType};
pub use completion::{Completion, CompletionKind, HoverInfo};
pub use config::Settings;
pub use diagnostics::{
    CatalogError, CoreResult, Diagnostic, DiagnosticLevel, SpringPropsError, YamlError,
};
pub use document::{Cursor, Document, TextSpan};

/// Configuration file syntax, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `.properties`
    Properties,
    /// `.yml`, `.yaml`
    Yaml,
    /// Anything else; every entry point returns an empty result
    Unknown,
}

/// Detect the dialect of a file from its extension (case-insensitive)
pub fn detect_dialect(path: &Path) -> Dialect {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("properties") => Dialect::Properties,
        Some("yml") | Some("yaml") => Dialect::Yaml,
        _ => Dialect::Unknown,
    }
}

/// Completion items at `cursor`.
///
/// Key positions get catalog keys not yet declared under the resolved
/// parent. Value positions get the allowed values of enum properties when
/// value hints are enabled, and nothing otherwise.
pub fn complete(
    path: &Path,
    text: &str,
    cursor: Cursor,
    catalog: &Catalog,
    settings: &Settings,
) -> Vec<Completion> {
    let dialect = detect_dialect(path);
    if dialect == Dialect::Unknown {
        return Vec::new();
    }

    let doc = Document::parse(text, dialect);
    let context = context::resolve(&doc, cursor);
    tracing::debug!(
        path = %path.display(),
        line = cursor.line,
        column = cursor.column,
        parent = %context.parent_path,
        partial = %context.partial_text,
        value_position = context.is_value_position,
        "completion context"
    );

    if context.is_value_position {
        if !settings.completion.value_hints {
            return Vec::new();
        }
        let Some(property) = context.line_path() else {
            return Vec::new();
        };
        let Some(entry) = catalog.get(&property) else {
            return Vec::new();
        };
        let values = suggest::suggest_values(entry, &context.value_prefix);
        return completion::value_completions(&property, entry, &values, &context, cursor);
    }

    let existing = existing::index(&doc);
    let grouping = match dialect {
        Dialect::Properties => suggest::Grouping::Flat,
        _ => suggest::Grouping::Nested,
    };
    let candidates = suggest::suggest(
        catalog,
        &context.parent_path,
        &context.partial_text,
        &existing,
        grouping,
    );
    tracing::debug!(
        existing = existing.len(),
        candidates = candidates.len(),
        "completion candidates"
    );

    completion::key_completions(&candidates, &context, cursor, dialect, catalog)
}

/// Documentation for the property declared on the cursor's line.
pub fn hover(path: &Path, text: &str, cursor: Cursor, catalog: &Catalog) -> Option<HoverInfo> {
    let dialect = detect_dialect(path);
    if dialect == Dialect::Unknown {
        return None;
    }
    let doc = Document::parse(text, dialect);
    hover::hover_line(&doc, cursor.line, catalog)
}

/// Canonical replacement text, or `None` when nothing should change.
pub fn format_document(path: &Path, text: &str) -> Option<String> {
    format::format_text(text, detect_dialect(path))
}

/// Syntax diagnostics. Only YAML documents produce any.
pub fn validate(path: &Path, text: &str) -> Vec<Diagnostic> {
    match detect_dialect(path) {
        Dialect::Yaml => validate::validate_yaml(path, text),
        _ => Vec::new(),
    }
}

/// Validate a single file on disk
pub fn check_file(path: &Path) -> CoreResult<Vec<Diagnostic>> {
    if detect_dialect(path) != Dialect::Yaml {
        return Ok(vec![]);
    }

    let content = std::fs::read_to_string(path).map_err(|e| SpringPropsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(validate(path, &content))
}

/// A file whose formatted text differs from what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformatted {
    pub original: String,
    pub formatted: String,
}

/// Format a single file on disk without writing it back.
///
/// `Ok(None)` when the file is already formatted or cannot be formatted.
pub fn format_file(path: &Path) -> CoreResult<Option<Reformatted>> {
    let original = std::fs::read_to_string(path).map_err(|e| SpringPropsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(format_document(path, &original).map(|formatted| Reformatted {
        original,
        formatted,
    }))
}

/// Replace the contents of `path` with `text`
pub fn write_file(path: &Path, text: &str) -> CoreResult<()> {
    std::fs::write(path, text).map_err(|e| SpringPropsError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Configuration files under `path` (or `path` itself), honouring ignore
/// files. Sorted for deterministic output.
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    let mut paths: Vec<PathBuf> = WalkBuilder::new(path)
        .standard_filters(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| detect_dialect(entry.path()) != Dialect::Unknown)
        .map(|entry| entry.path().to_path_buf())
        .collect();
    paths.sort();
    paths
}

/// Validate every configuration file under `path`
pub fn check_project(path: &Path) -> Vec<Diagnostic> {
    // Sequential walk, parallel validation
    check_files(&collect_files(path))
}

/// Validate files in parallel; unreadable files become `file::read` errors.
///
/// Sorted by severity (errors first), then by file, line and rule.
pub fn check_files(paths: &[PathBuf]) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = paths
        .par_iter()
        .flat_map(|file_path| match check_file(file_path) {
            Ok(file_diagnostics) => file_diagnostics,
            Err(e) => {
                vec![Diagnostic::error(
                    file_path.clone(),
                    0,
                    0,
                    "file::read",
                    format!("Failed to read file: {}", e),
                )]
            }
        })
        .collect();

    diagnostics.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| a.rule.cmp(&b.rule))
    });

    diagnostics
}
