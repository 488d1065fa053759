//! Document formatting
//!
//! Both formatters return `None` when there is nothing to change, including
//! when the document cannot be formatted safely.

use crate::parsers::indent::{indent_width, is_comment};
use crate::parsers::properties::split_key_value;
use crate::parsers::yaml::{emit_yaml, parse_yaml};
use crate::Dialect;

/// Canonical text for `text`, or `None` when it is already canonical or
/// cannot be formatted.
pub fn format_text(text: &str, dialect: Dialect) -> Option<String> {
    let formatted = match dialect {
        Dialect::Yaml => format_yaml(text)?,
        Dialect::Properties => format_properties(text),
        Dialect::Unknown => return None,
    };
    (formatted != text).then_some(formatted)
}

/// Re-emit a YAML document from its parse. Malformed and empty documents are
/// left alone.
fn format_yaml(text: &str) -> Option<String> {
    match parse_yaml(text) {
        Ok(serde_yaml::Value::Null) => None,
        Ok(value) => match emit_yaml(&value) {
            Ok(out) => Some(out),
            Err(err) => {
                tracing::debug!(error = %err, "failed to emit YAML");
                None
            }
        },
        Err(err) => {
            tracing::debug!(error = %err, "skipping format of malformed YAML");
            None
        }
    }
}

fn format_properties(text: &str) -> String {
    text.split('\n')
        .map(format_properties_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_properties_line(line: &str) -> String {
    let (body, line_end) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };
    let trimmed = body.trim();
    if trimmed.is_empty() || is_comment(trimmed, Dialect::Properties) {
        return line.to_string();
    }
    match split_key_value(body) {
        Some((key, value)) => {
            let indent = &body[..indent_width(body)];
            format!("{}{}={}{}", indent, key, value, line_end)
        }
        None => line.to_string(),
    }
}
