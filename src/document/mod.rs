//! Document layer
//! - text_document.rs: Text buffer with UTF-16 position mapping and incremental edits
//! - store.rs: Open document store shared by the LSP handlers
//! - error.rs: Document errors

pub mod error;
pub mod store;
pub mod text_document;

pub use error::DocumentError;
pub use store::DocumentStore;
pub use text_document::TextDocument;
