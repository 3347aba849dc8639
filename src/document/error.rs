use thiserror::Error;
use tower_lsp::lsp_types::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document is not open: {0}")]
    NotOpen(Url),
}
