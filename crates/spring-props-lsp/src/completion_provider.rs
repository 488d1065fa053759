//! Completion provider adapter for the spring-props-core suggestion engine.

use std::path::Path;

use spring_props_core::{Catalog, Completion, CompletionKind, Settings};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, InsertTextFormat,
    MarkupContent, MarkupKind, Position, TextEdit,
};

use crate::position::{position_to_cursor, span_to_range};

/// Characters that re-trigger completion.
pub const TRIGGER_CHARACTERS: [&str; 4] = [".", ":", "=", " "];

fn completion_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Property => CompletionItemKind::PROPERTY,
        CompletionKind::Group => CompletionItemKind::MODULE,
        CompletionKind::Value => CompletionItemKind::VALUE,
    }
}

fn to_completion_item(completion: Completion) -> CompletionItem {
    CompletionItem {
        kind: Some(completion_kind(completion.kind)),
        detail: Some(completion.detail),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: completion.documentation,
        })),
        sort_text: Some(completion.sort_key),
        filter_text: Some(completion.label.clone()),
        insert_text_format: Some(InsertTextFormat::PLAIN_TEXT),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range: span_to_range(completion.replace),
            new_text: completion.insert_text,
        })),
        label: completion.label,
        ..Default::default()
    }
}

/// Return completion items for a document position.
pub fn completion_items_for_document(
    path: &Path,
    content: &str,
    position: Position,
    catalog: &Catalog,
    settings: &Settings,
) -> Vec<CompletionItem> {
    spring_props_core::complete(
        path,
        content,
        position_to_cursor(position),
        catalog,
        settings,
    )
    .into_iter()
    .map(to_completion_item)
    .collect()
}
