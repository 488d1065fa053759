//! Indentation parser
//!
//! Turns raw text into `(key, indent, line)` records. Blank lines and comments
//! are dropped entirely so they never influence path computation. Lines that
//! carry no key (list items, scalar continuations) are kept with `key: None`
//! and are ignored by the ancestor stack.

use regex::Regex;

use crate::parsers::properties::split_key_value;
use crate::regex_util::static_regex;
use crate::Dialect;

// A mapping key: leading blanks, key characters, then a colon followed by a
// blank or the end of the line.
static_regex!(fn yaml_key_pattern, r"^[ \t]*([A-Za-z0-9._-]+):(?:[ \t]|$)");

/// One structural line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine<'a> {
    /// 0-based physical line number.
    pub number: usize,
    pub text: &'a str,
    /// Leading blank count (spaces and tabs, one column each).
    pub indent: usize,
    pub key: Option<&'a str>,
}

/// Physical lines of `text`, with any `\r` before the newline removed.
pub fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Leading blank count of a line.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Whether an already-trimmed line is a comment in `dialect`.
pub fn is_comment(trimmed: &str, dialect: Dialect) -> bool {
    trimmed.starts_with('#') || (dialect == Dialect::Properties && trimmed.starts_with('!'))
}

/// The mapping key written on a YAML line, if any.
pub fn yaml_key(line: &str) -> Option<&str> {
    yaml_key_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The key a line declares in `dialect`.
pub fn line_key(line: &str, dialect: Dialect) -> Option<&str> {
    match dialect {
        Dialect::Yaml => yaml_key(line),
        Dialect::Properties => split_key_value(line).map(|(key, _)| key),
        Dialect::Unknown => None,
    }
}

/// Parse `text` into its structural lines.
pub fn parse_lines(text: &str, dialect: Dialect) -> Vec<DocumentLine<'_>> {
    physical_lines(text)
        .enumerate()
        .filter_map(|(number, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_comment(trimmed, dialect) {
                return None;
            }
            Some(DocumentLine {
                number,
                text: line,
                indent: indent_width(line),
                key: line_key(line, dialect),
            })
        })
        .collect()
}
