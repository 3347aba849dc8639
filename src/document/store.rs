use std::collections::HashMap;

use tokio::sync::RwLock;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, TextDocumentItem, Url};
use tracing::debug;

use crate::document::error::DocumentError;
use crate::document::text_document::TextDocument;

/// Open documents keyed by URI
#[derive(Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<Url, TextDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a newly opened document, replacing any previous entry for the URI.
    pub async fn open(&self, item: TextDocumentItem) -> TextDocument {
        let TextDocumentItem {
            uri,
            language_id,
            version,
            text,
        } = item;

        let document = TextDocument::new(uri.clone(), language_id, version, text);
        self.documents.write().await.insert(uri, document.clone());
        document
    }

    /// Applies content changes to an open document and returns the updated copy.
    pub async fn change(
        &self,
        uri: &Url,
        version: i32,
        changes: Vec<TextDocumentContentChangeEvent>,
    ) -> Result<TextDocument, DocumentError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(uri)
            .ok_or_else(|| DocumentError::NotOpen(uri.clone()))?;

        debug!(
            "Applying {} change(s) to {} (version {} -> {})",
            changes.len(),
            uri,
            document.version(),
            version
        );
        document.apply_changes(changes, version);
        Ok(document.clone())
    }

    pub async fn get(&self, uri: &Url) -> Option<TextDocument> {
        self.documents.read().await.get(uri).cloned()
    }

    /// Snapshot of every open document
    pub async fn all(&self) -> Vec<TextDocument> {
        self.documents.read().await.values().cloned().collect()
    }

    pub async fn close(&self, uri: &Url) -> Option<TextDocument> {
        self.documents.write().await.remove(uri)
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}
