//! Hover documentation for the key declared on a line.

use crate::catalog::Catalog;
use crate::completion::{property_markdown, HoverInfo};
use crate::context::hover_target;
use crate::document::{Document, TextSpan};

/// Documentation for the property declared on `line`.
///
/// Lookup is exact and case-sensitive; groups and unknown keys have no hover.
pub fn hover_line(doc: &Document<'_>, line: usize, catalog: &Catalog) -> Option<HoverInfo> {
    let target = hover_target(doc, line)?;
    let entry = catalog.get(&target.path)?;
    Some(HoverInfo {
        markdown: property_markdown(&target.path, entry),
        span: TextSpan {
            line,
            start: target.key_start,
            end: target.key_end,
        },
    })
}
