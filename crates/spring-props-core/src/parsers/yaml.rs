//! Structural YAML parsing
//!
//! A thin layer over `serde_yaml` that reports failures as [`YamlError`]
//! values. Callers pick their fallback on the `Err` variant.

use serde_yaml::Value;

use crate::diagnostics::YamlError;
use crate::parsers::indent::physical_lines;

/// Parse a whole YAML document.
///
/// A document holding nothing but blank lines and comments is `Null`.
pub fn parse_yaml(text: &str) -> Result<Value, YamlError> {
    if is_blank_document(text) {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text).map_err(YamlError::from)
}

fn is_blank_document(text: &str) -> bool {
    physical_lines(text).all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    })
}

/// Re-serialize a parsed document (2-space indentation, authored key order).
pub fn emit_yaml(value: &Value) -> Result<String, YamlError> {
    serde_yaml::to_string(value).map_err(YamlError::from)
}

/// Render a mapping key as the dotted-path segment it stands for.
///
/// Only scalar keys have a segment form.
pub fn key_segment(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
