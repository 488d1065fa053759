//! Path resolver
//!
//! Computes the cursor's hierarchical context without a parse tree: the
//! dotted ancestor path, the token being typed, and whether the cursor sits
//! in a key or a value position.
//!
//! Ancestors come from a single forward scan over the structural lines above
//! the cursor. Each keyed line pops every stack entry at the same or deeper
//! indentation and pushes itself, so a shallower sibling between a deep node
//! and the cursor correctly closes the deep branch.

use crate::document::{byte_offset, Cursor, Document};
use crate::parsers::indent::{indent_width, is_comment, yaml_key, DocumentLine};
use crate::parsers::properties::split_key_value;
use crate::Dialect;

/// Context of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathContext {
    /// Dotted ancestor chain above the cursor's indentation; empty at root.
    pub parent_path: String,
    /// Key token being typed; empty on a fresh position.
    pub partial_text: String,
    /// Cursor follows the `:` / `=` separator on its line.
    pub is_value_position: bool,
    /// Leading blank count of the text before the cursor.
    pub indent: usize,
    /// Column where a key replacement starts.
    pub replace_start: usize,
    /// Cursor column clamped to the line; every key replacement ends here.
    pub replace_end: usize,
    /// Key already written on the cursor line (value position only).
    pub line_key: Option<String>,
    /// Value text typed between the separator and the cursor.
    pub value_prefix: String,
    /// Column where a value replacement starts.
    pub value_start: usize,
}

impl PathContext {
    /// Dotted path of the key written on the cursor line.
    pub fn line_path(&self) -> Option<String> {
        self.line_key
            .as_deref()
            .map(|key| join_path(&self.parent_path, key))
    }
}

/// The key under a hover position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget {
    pub path: String,
    pub line: usize,
    pub key_start: usize,
    pub key_end: usize,
}

pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Push `(key, indent)` onto an ancestor stack, first popping every entry at
/// the same or deeper indentation.
pub(crate) fn push_ancestor<'a>(stack: &mut Vec<(&'a str, usize)>, key: &'a str, indent: usize) {
    pop_to_indent(stack, indent);
    stack.push((key, indent));
}

fn pop_to_indent(stack: &mut Vec<(&str, usize)>, indent: usize) {
    while stack.last().is_some_and(|(_, top)| *top >= indent) {
        stack.pop();
    }
}

pub(crate) fn stack_path(stack: &[(&str, usize)]) -> String {
    stack
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(".")
}

/// Dotted path of the keys enclosing a line at `indent` on line `before_line`.
///
/// Only keyed lines strictly above `before_line` take part.
pub fn ancestor_path(lines: &[DocumentLine<'_>], before_line: usize, indent: usize) -> String {
    let mut stack = Vec::new();
    for line in lines.iter().take_while(|l| l.number < before_line) {
        if let Some(key) = line.key {
            push_ancestor(&mut stack, key, line.indent);
        }
    }
    pop_to_indent(&mut stack, indent);
    stack_path(&stack)
}

/// Resolve the completion context at `cursor`.
pub fn resolve(doc: &Document<'_>, cursor: Cursor) -> PathContext {
    match doc.dialect() {
        Dialect::Yaml => resolve_yaml(doc, cursor),
        Dialect::Properties => resolve_properties(doc, cursor),
        Dialect::Unknown => PathContext::default(),
    }
}

fn resolve_yaml(doc: &Document<'_>, cursor: Cursor) -> PathContext {
    let line = doc.line_text(cursor.line);
    let column = cursor.column.min(line.chars().count());
    let before = &line[..byte_offset(line, column)];
    let indent = indent_width(before);
    let parent_path = ancestor_path(doc.lines(), cursor.line, indent);

    // Indentation blanks are single-byte, so `indent` is also a byte offset.
    let rest = &before[indent..];
    let partial_text = if rest.chars().all(is_key_char) {
        rest.to_string()
    } else {
        String::new()
    };

    let mut context = PathContext {
        parent_path,
        replace_start: column - partial_text.chars().count(),
        replace_end: column,
        partial_text,
        indent,
        value_start: column,
        ..Default::default()
    };

    if let Some(colon) = before.find(':') {
        context.is_value_position = true;
        context.partial_text.clear();
        context.replace_start = column;
        context.line_key = yaml_key(line).map(str::to_string);
        let value_prefix = before[colon + 1..].trim_start();
        context.value_start = column - value_prefix.chars().count();
        context.value_prefix = value_prefix.to_string();
    }

    context
}

fn resolve_properties(doc: &Document<'_>, cursor: Cursor) -> PathContext {
    let line = doc.line_text(cursor.line);
    let column = cursor.column.min(line.chars().count());
    let before = &line[..byte_offset(line, column)];
    let indent = indent_width(before);

    if let Some((key, value)) = before.split_once('=') {
        let value_prefix = value.trim_start();
        let key = key.trim();
        return PathContext {
            is_value_position: true,
            indent,
            replace_start: column,
            replace_end: column,
            line_key: (!key.is_empty()).then(|| key.to_string()),
            value_start: column - value_prefix.chars().count(),
            value_prefix: value_prefix.to_string(),
            ..Default::default()
        };
    }

    PathContext {
        partial_text: before.trim().to_string(),
        indent,
        replace_start: indent,
        replace_end: column,
        value_start: column,
        ..Default::default()
    }
}

/// Locate the property key declared on `line`, for hover.
pub fn hover_target(doc: &Document<'_>, line: usize) -> Option<HoverTarget> {
    let text = doc.line_text(line);
    let trimmed = text.trim();
    if trimmed.is_empty() || is_comment(trimmed, doc.dialect()) {
        return None;
    }

    match doc.dialect() {
        Dialect::Yaml => {
            let key = yaml_key(text)?;
            let indent = indent_width(text);
            let parent = ancestor_path(doc.lines(), line, indent);
            Some(HoverTarget {
                path: join_path(&parent, key),
                line,
                key_start: indent,
                key_end: indent + key.chars().count(),
            })
        }
        Dialect::Properties => {
            let (key, _) = split_key_value(text)?;
            let byte_start = text.find(key)?;
            let key_start = text[..byte_start].chars().count();
            Some(HoverTarget {
                path: key.to_string(),
                line,
                key_start,
                key_end: key_start + key.chars().count(),
            })
        }
        Dialect::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml_context(text: &str, line: usize, column: usize) -> PathContext {
        let doc = Document::parse(text, Dialect::Yaml);
        resolve(&doc, Cursor::new(line, column))
    }

    fn properties_context(text: &str, line: usize, column: usize) -> PathContext {
        let doc = Document::parse(text, Dialect::Properties);
        resolve(&doc, Cursor::new(line, column))
    }

    #[test]
    fn test_root_blank_line() {
        let ctx = yaml_context("server:\n  port: 8080\n\n", 2, 0);
        assert_eq!(ctx.parent_path, "");
        assert_eq!(ctx.partial_text, "");
        assert!(!ctx.is_value_position);
    }

    #[test]
    fn test_indented_blank_line_under_parent() {
        let ctx = yaml_context("server:\n  port: 8080\n  \n", 2, 2);
        assert_eq!(ctx.parent_path, "server");
        assert_eq!(ctx.indent, 2);
        assert_eq!(ctx.replace_start, 2);
    }

    #[test]
    fn test_partial_key() {
        let ctx = yaml_context("spring:\n  data", 1, 6);
        assert_eq!(ctx.parent_path, "spring");
        assert_eq!(ctx.partial_text, "data");
        assert_eq!(ctx.replace_start, 2);
        assert!(!ctx.is_value_position);
    }

    #[test]
    fn test_cursor_in_middle_of_token_only_uses_text_before_cursor() {
        let ctx = yaml_context("spring:\n  datasource", 1, 5);
        assert_eq!(ctx.partial_text, "dat");
        assert_eq!(ctx.replace_start, 2);
    }

    #[test]
    fn test_deep_nesting() {
        let text = "spring:\n  datasource:\n    hikari:\n      \n";
        let ctx = yaml_context(text, 3, 6);
        assert_eq!(ctx.parent_path, "spring.datasource.hikari");
    }

    #[test]
    fn test_shallower_sibling_closes_deep_branch() {
        let text = "\
spring:
  datasource:
    hikari:
      minimum-idle: 5
  jpa:
    hibernate:
      ddl-auto: none

";
        // Cursor at indent 4 after `jpa.hibernate` closed: parent is `spring.jpa`.
        let ctx = yaml_context(text, 7, 4);
        assert_eq!(ctx.parent_path, "spring.jpa");
    }

    #[test]
    fn test_decreasing_then_increasing_indentation() {
        let text = "\
a:
  b:
    c: 1
d:
  e:

";
        let ctx = yaml_context(text, 5, 4);
        assert_eq!(ctx.parent_path, "d.e");
    }

    #[test]
    fn test_comments_and_list_items_do_not_disturb_the_stack() {
        let text = "\
spring:
  profiles:
    include:
      - dev
# trailing comment
      - prod
  main:

";
        let ctx = yaml_context(text, 7, 4);
        assert_eq!(ctx.parent_path, "spring.main");
    }

    #[test]
    fn test_lines_below_cursor_are_ignored() {
        let text = "server:\n  \n  port: 8080\nspring:\n";
        let ctx = yaml_context(text, 1, 2);
        assert_eq!(ctx.parent_path, "server");
    }

    #[test]
    fn test_value_position() {
        let ctx = yaml_context(
            "spring:\n  main:\n    banner-mode: co",
            2,
            19,
        );
        assert!(ctx.is_value_position);
        assert_eq!(ctx.partial_text, "");
        assert_eq!(ctx.line_key.as_deref(), Some("banner-mode"));
        assert_eq!(ctx.line_path().as_deref(), Some("spring.main.banner-mode"));
        assert_eq!(ctx.value_prefix, "co");
        assert_eq!(ctx.value_start, 17);
    }

    #[test]
    fn test_column_zero_has_no_partial() {
        let ctx = yaml_context("server:\n  port", 1, 0);
        assert_eq!(ctx.partial_text, "");
        assert_eq!(ctx.parent_path, "");
    }

    #[test]
    fn test_column_past_line_end_is_clamped() {
        let ctx = yaml_context("spring:\n  da", 1, 99);
        assert_eq!(ctx.partial_text, "da");
        assert_eq!(ctx.replace_start, 2);
        assert_eq!(ctx.replace_end, 4);
    }

    #[test]
    fn test_cursor_line_past_document_end() {
        let ctx = yaml_context("server:\n  port: 1", 10, 3);
        assert_eq!(ctx.parent_path, "");
        assert_eq!(ctx.partial_text, "");
    }

    #[test]
    fn test_non_key_text_gives_empty_partial() {
        let ctx = yaml_context("list:\n  - ite", 1, 7);
        assert_eq!(ctx.partial_text, "");
        assert_eq!(ctx.replace_start, 7);
    }

    #[test]
    fn test_properties_partial() {
        let ctx = properties_context("spring.datasource.url=x\nspring.da", 1, 9);
        assert_eq!(ctx.parent_path, "");
        assert_eq!(ctx.partial_text, "spring.da");
        assert_eq!(ctx.replace_start, 0);
        assert!(!ctx.is_value_position);
    }

    #[test]
    fn test_properties_partial_with_surrounding_blanks() {
        let ctx = properties_context("  serv ", 0, 7);
        assert_eq!(ctx.partial_text, "serv");
        assert_eq!(ctx.replace_start, 2);
        assert_eq!(ctx.replace_end, 7);
    }

    #[test]
    fn test_properties_value_position() {
        let ctx = properties_context("spring.main.banner-mode = of", 0, 28);
        assert!(ctx.is_value_position);
        assert_eq!(ctx.line_key.as_deref(), Some("spring.main.banner-mode"));
        assert_eq!(ctx.line_path().as_deref(), Some("spring.main.banner-mode"));
        assert_eq!(ctx.value_prefix, "of");
        assert_eq!(ctx.value_start, 26);
    }

    #[test]
    fn test_hover_target_yaml() {
        let doc = Document::parse("server:\n  port: 8080\n", Dialect::Yaml);
        let target = hover_target(&doc, 1).unwrap();
        assert_eq!(target.path, "server.port");
        assert_eq!((target.key_start, target.key_end), (2, 6));
    }

    #[test]
    fn test_hover_target_properties() {
        let doc = Document::parse("  server.port = 8080\n", Dialect::Properties);
        let target = hover_target(&doc, 0).unwrap();
        assert_eq!(target.path, "server.port");
        assert_eq!((target.key_start, target.key_end), (2, 13));
    }

    #[test]
    fn test_hover_target_skips_comments() {
        let doc = Document::parse("# server.port=1\n", Dialect::Properties);
        assert!(hover_target(&doc, 0).is_none());
        let doc = Document::parse("# server:\n", Dialect::Yaml);
        assert!(hover_target(&doc, 0).is_none());
    }
}
