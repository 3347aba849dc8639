//! Completion items
//!
//! The first item depends on the cursor: "Visual Studio Code" on the first line,
//! the document's file name anywhere else. Two static language items follow and
//! carry a numeric `data` tag that `resolve` uses to fill in details.

use serde_json::Value;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, Position, Url,
};

use crate::document::TextDocument;

pub const EDITOR_ITEM_LABEL: &str = "Visual Studio Code";

/// Static items and the `data` tag each one carries
const STATIC_ITEMS: [(&str, u64); 2] = [("TypeScript", 1), ("JavaScript", 2)];

pub fn complete(document: &TextDocument, position: Position) -> Vec<CompletionItem> {
    let first_label = if position.line == 0 {
        EDITOR_ITEM_LABEL.to_string()
    } else {
        file_name(document.uri())
    };

    let mut items = vec![text_item(first_label, None)];
    items.extend(
        STATIC_ITEMS
            .iter()
            .map(|(label, tag)| text_item(label.to_string(), Some(Value::from(*tag)))),
    );
    items
}

/// Adds detail and documentation to the static items. Anything else is
/// returned untouched.
pub fn resolve(mut item: CompletionItem) -> CompletionItem {
    let tag = item.data.as_ref().and_then(Value::as_u64);
    let Some((label, _)) = STATIC_ITEMS.iter().find(|(_, t)| Some(*t) == tag) else {
        return item;
    };

    item.detail = Some(format!("{} details", label));
    item.documentation = Some(Documentation::String(format!("{} documentation", label)));
    item
}

fn text_item(label: String, data: Option<Value>) -> CompletionItem {
    CompletionItem {
        label,
        kind: Some(CompletionItemKind::TEXT),
        data,
        ..Default::default()
    }
}

/// Last path segment of the URI, decoded when the URI is a file path
fn file_name(uri: &Url) -> String {
    uri.to_file_path()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .or_else(|| {
            uri.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| uri.to_string())
}
