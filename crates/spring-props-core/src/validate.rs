//! Structural validation of YAML documents.

use std::path::Path;

use rust_i18n::t;

use crate::diagnostics::{Diagnostic, YamlError};
use crate::parsers::indent::physical_lines;
use crate::parsers::yaml::parse_yaml;

pub const YAML_SYNTAX_RULE: &str = "yaml::syntax";

/// Diagnostics for a YAML document: one error when it fails to parse.
pub fn validate_yaml(path: &Path, text: &str) -> Vec<Diagnostic> {
    match parse_yaml(text) {
        Ok(_) => Vec::new(),
        Err(err) => vec![syntax_diagnostic(path, text, &err)],
    }
}

/// Place a parse failure on a written line.
///
/// Parsers report end-of-stream failures past the last line; the diagnostic
/// moves back to the last non-blank line at or before the reported one.
fn syntax_diagnostic(path: &Path, text: &str, err: &YamlError) -> Diagnostic {
    let lines: Vec<&str> = physical_lines(text).collect();
    let last = lines.len().saturating_sub(1);
    let reported = err.line.map(|l| l.saturating_sub(1)).unwrap_or(last).min(last);

    let mut index = reported;
    while index > 0 && lines[index].trim().is_empty() {
        index -= 1;
    }

    let line_text = lines.get(index).copied().unwrap_or("");
    let first_char = line_text.chars().take_while(|c| c.is_whitespace()).count() + 1;
    let column = match err.column {
        Some(column) if index == reported && column > 0 => column,
        _ => first_char,
    };

    Diagnostic::error(
        path.to_path_buf(),
        index + 1,
        column,
        YAML_SYNTAX_RULE,
        t!("diagnostics.yaml_syntax", message = err.message).to_string(),
    )
    .with_end_column(line_text.chars().count() + 1)
}
