//! Completion and hover formatting
//!
//! Turns suggestion candidates into editor-ready items: insert text, the span
//! the insertion replaces, a one-line detail and markdown documentation.

use rust_i18n::t;

use crate::catalog::{Catalog, PropertyEntry};
use crate::context::PathContext;
use crate::document::{Cursor, TextSpan};
use crate::suggest::Candidate;
use crate::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// A documented, directly settable property.
    Property,
    /// A configuration group with nested properties.
    Group,
    /// An allowed literal value of an enum property.
    Value,
}

/// An editor-ready completion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub label: String,
    pub insert_text: String,
    /// Text replaced by `insert_text`; always ends at the cursor.
    pub replace: TextSpan,
    pub detail: String,
    /// Markdown.
    pub documentation: String,
    pub sort_key: String,
    pub kind: CompletionKind,
}

/// Hover content for a documented property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    /// Markdown.
    pub markdown: String,
    /// Span of the hovered key.
    pub span: TextSpan,
}

/// Markdown documentation block for a property.
pub fn property_markdown(path: &str, entry: &PropertyEntry) -> String {
    let mut doc = format!(
        "**{}**\n\n{}\n\n**{}** `{}`",
        path,
        entry.description,
        t!("hover.type_label"),
        entry.kind
    );

    if let Some(default) = &entry.default {
        doc.push_str(&format!("\n\n**{}** `{}`", t!("hover.default_label"), default));
    }

    if let Some(values) = &entry.enum_values {
        let values = values
            .iter()
            .map(|v| format!("`{}`", v))
            .collect::<Vec<_>>()
            .join(", ");
        doc.push_str(&format!("\n\n**{}** {}", t!("hover.valid_values_label"), values));
    }

    doc
}

fn property_detail(entry: &PropertyEntry) -> String {
    match &entry.default {
        Some(default) => format!(
            "{} ({})",
            entry.kind,
            t!("completion.default_suffix", value = default)
        ),
        None => entry.kind.to_string(),
    }
}

fn insert_text(candidate: &Candidate, dialect: Dialect) -> String {
    match dialect {
        Dialect::Properties => format!("{}=", candidate.key),
        _ if candidate.is_leaf && !candidate.has_group_children => format!("{}: ", candidate.key),
        _ => format!("{}:", candidate.key),
    }
}

/// Completion items for key candidates, in candidate order.
pub fn key_completions(
    candidates: &[Candidate],
    context: &PathContext,
    cursor: Cursor,
    dialect: Dialect,
    catalog: &Catalog,
) -> Vec<Completion> {
    let replace = TextSpan {
        line: cursor.line,
        start: context.replace_start,
        end: context.replace_end,
    };

    candidates
        .iter()
        .map(|candidate| {
            let (detail, documentation, kind) = match catalog.get(&candidate.full_path) {
                Some(entry) if candidate.is_leaf => (
                    property_detail(entry),
                    property_markdown(&candidate.full_path, entry),
                    CompletionKind::Property,
                ),
                _ => (
                    t!("completion.group_detail").to_string(),
                    format!(
                        "**{}**\n\n{}",
                        candidate.full_path,
                        t!("completion.group_documentation")
                    ),
                    CompletionKind::Group,
                ),
            };

            Completion {
                label: candidate.key.clone(),
                insert_text: insert_text(candidate, dialect),
                replace,
                detail,
                documentation,
                sort_key: format!("{}_{}", if candidate.is_leaf { 1 } else { 2 }, candidate.key),
                kind,
            }
        })
        .collect()
}

/// Completion items for the allowed values of `entry`, in authored order.
pub fn value_completions(
    path: &str,
    entry: &PropertyEntry,
    values: &[&str],
    context: &PathContext,
    cursor: Cursor,
) -> Vec<Completion> {
    let replace = TextSpan {
        line: cursor.line,
        start: context.value_start,
        end: context.value_start + context.value_prefix.chars().count(),
    };
    let documentation = property_markdown(path, entry);

    values
        .iter()
        .enumerate()
        .map(|(idx, value)| Completion {
            label: value.to_string(),
            insert_text: value.to_string(),
            replace,
            detail: t!("completion.value_detail", path = path).to_string(),
            documentation: documentation.clone(),
            sort_key: format!("{:03}_{}", idx, value),
            kind: CompletionKind::Value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(key: &str, full_path: &str, is_leaf: bool, has_group_children: bool) -> Candidate {
        Candidate {
            key: key.to_string(),
            full_path: full_path.to_string(),
            is_leaf,
            has_group_children,
        }
    }

    #[test]
    fn test_property_markdown_layout() {
        let entry = Catalog::builtin().get("spring.jpa.hibernate.ddl-auto").unwrap();
        let doc = property_markdown("spring.jpa.hibernate.ddl-auto", entry);
        assert!(doc.starts_with("**spring.jpa.hibernate.ddl-auto**\n\n"));
        assert!(doc.contains("**Type:** `string`"));
        assert!(doc.contains("**Valid values:** `none`, `validate`, `update`, `create`, `create-drop`"));
    }

    #[test]
    fn test_property_markdown_default() {
        let entry = Catalog::builtin().get("server.port").unwrap();
        let doc = property_markdown("server.port", entry);
        assert!(doc.contains("**Type:** `integer`"));
        assert!(doc.contains("**Default:** `8080`"));
        assert!(!doc.contains("Valid values"));
    }

    #[test]
    fn test_yaml_insert_text() {
        assert_eq!(
            insert_text(&candidate("port", "server.port", true, false), Dialect::Yaml),
            "port: "
        );
        assert_eq!(
            insert_text(&candidate("ssl", "server.ssl", false, true), Dialect::Yaml),
            "ssl:"
        );
        assert_eq!(
            insert_text(&candidate("cache", "app.cache", true, true), Dialect::Yaml),
            "cache:"
        );
    }

    #[test]
    fn test_properties_insert_text() {
        assert_eq!(
            insert_text(&candidate("server.port", "server.port", true, false), Dialect::Properties),
            "server.port="
        );
    }

    #[test]
    fn test_key_completion_fields() {
        let catalog = Catalog::builtin();
        let context = PathContext {
            parent_path: "server".to_string(),
            partial_text: "po".to_string(),
            replace_start: 2,
            replace_end: 4,
            ..Default::default()
        };
        let items = key_completions(
            &[
                candidate("port", "server.port", true, false),
                candidate("servlet", "server.servlet", false, true),
            ],
            &context,
            Cursor::new(4, 4),
            Dialect::Yaml,
            catalog,
        );

        let port = &items[0];
        assert_eq!(port.kind, CompletionKind::Property);
        assert_eq!(port.detail, "integer (default: 8080)");
        assert_eq!(port.sort_key, "1_port");
        assert_eq!(port.replace, TextSpan { line: 4, start: 2, end: 4 });

        let servlet = &items[1];
        assert_eq!(servlet.kind, CompletionKind::Group);
        assert_eq!(servlet.detail, "Configuration group");
        assert_eq!(servlet.sort_key, "2_servlet");
        assert!(servlet.documentation.starts_with("**server.servlet**"));
    }

    #[test]
    fn test_value_completions_replace_typed_value() {
        let entry = Catalog::builtin().get("spring.main.banner-mode").unwrap();
        let context = PathContext {
            is_value_position: true,
            value_prefix: "co".to_string(),
            value_start: 17,
            ..Default::default()
        };
        let items = value_completions(
            "spring.main.banner-mode",
            entry,
            &["console"],
            &context,
            Cursor::new(2, 19),
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].insert_text, "console");
        assert_eq!(items[0].kind, CompletionKind::Value);
        assert_eq!(items[0].replace, TextSpan { line: 2, start: 17, end: 19 });
    }
}
