//! Hover documentation provider for LSP.
//!
//! Shows the catalog entry for the property declared on the hovered line.

use std::path::Path;

use spring_props_core::Catalog;
use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use crate::position::{position_to_cursor, span_to_range};

/// Get hover information for a position in a document.
pub fn hover_at_position(
    path: &Path,
    content: &str,
    position: Position,
    catalog: &Catalog,
) -> Option<Hover> {
    let info = spring_props_core::hover(path, content, position_to_cursor(position), catalog)?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.markdown,
        }),
        range: Some(span_to_range(info.span)),
    })
}
