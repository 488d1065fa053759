//! Conversions between LSP positions and core cursors/spans.
//!
//! Both sides use 0-based lines. Core columns count characters; LSP
//! `character` values are taken as the same unit.

use spring_props_core::{Cursor, TextSpan};
use tower_lsp::lsp_types::{Position, Range};

pub fn position_to_cursor(position: Position) -> Cursor {
    Cursor::new(position.line as usize, position.character as usize)
}

pub fn span_to_range(span: TextSpan) -> Range {
    Range {
        start: Position {
            line: span.line as u32,
            character: span.start as u32,
        },
        end: Position {
            line: span.line as u32,
            character: span.end as u32,
        },
    }
}

/// Range covering the whole of `content`.
pub fn full_document_range(content: &str) -> Range {
    let mut line = 0u32;
    let mut character = 0u32;

    for c in content.chars() {
        if c == '\n' {
            line += 1;
            character = 0;
        } else {
            character += 1;
        }
    }

    Range {
        start: Position {
            line: 0,
            character: 0,
        },
        end: Position { line, character },
    }
}
