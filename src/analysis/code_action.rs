//! Quick fixes that lowercase flagged words

use std::collections::HashMap;

use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, Diagnostic, Range, TextEdit, WorkspaceEdit,
};

use crate::analysis::DIAGNOSTIC_SOURCE;
use crate::document::TextDocument;

/// Builds one quick fix per diagnostic published by this server.
pub fn quick_fixes(document: &TextDocument, diagnostics: &[Diagnostic]) -> Vec<CodeAction> {
    let ours: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.source.as_deref() == Some(DIAGNOSTIC_SOURCE))
        .collect();
    let is_preferred = ours.len() == 1;

    ours.into_iter()
        .map(|diagnostic| {
            let original = document.text_in(diagnostic.range);
            CodeAction {
                title: format!("Convert '{}' to lowercase", original),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![diagnostic.clone()]),
                edit: Some(workspace_edit(
                    document,
                    vec![lowercase_edit(document, diagnostic.range)],
                )),
                is_preferred: Some(is_preferred),
                ..Default::default()
            }
        })
        .collect()
}

/// Replaces `range` with its lowercase text.
pub fn lowercase_edit(document: &TextDocument, range: Range) -> TextEdit {
    TextEdit::new(range, document.text_in(range).to_lowercase())
}

pub fn workspace_edit(document: &TextDocument, edits: Vec<TextEdit>) -> WorkspaceEdit {
    WorkspaceEdit {
        changes: Some(HashMap::from([(document.uri().clone(), edits)])),
        ..Default::default()
    }
}
