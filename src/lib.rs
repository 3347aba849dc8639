pub mod analysis;
pub mod config;
pub mod document;
pub mod log;
pub mod lsp;
