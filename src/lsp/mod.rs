// LSP protocol layer
// - server.rs: stdio server bootstrap
// - backend.rs: LanguageServer trait implementation
// - commands.rs: workspace/executeCommand handling

pub mod backend;
pub mod commands;
pub mod server;
