//! A configuration document as seen by a single request.

use crate::parsers::indent::{parse_lines, physical_lines, DocumentLine};
use crate::Dialect;

/// Position inside a document. Both fields are 0-based; `column` counts
/// characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Column span on one line (0-based, end exclusive, in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Full text plus its structural line view.
///
/// Built fresh for every request; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    text: &'a str,
    dialect: Dialect,
    lines: Vec<DocumentLine<'a>>,
}

impl<'a> Document<'a> {
    pub fn parse(text: &'a str, dialect: Dialect) -> Self {
        Self {
            text,
            dialect,
            lines: parse_lines(text, dialect),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Structural lines (no blanks, no comments).
    pub fn lines(&self) -> &[DocumentLine<'a>] {
        &self.lines
    }

    /// Raw text of a physical line; empty past the end of the document.
    pub fn line_text(&self, number: usize) -> &'a str {
        physical_lines(self.text).nth(number).unwrap_or("")
    }
}

/// Byte offset of character `column` in `line`, clamped to the line end.
pub(crate) fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}
