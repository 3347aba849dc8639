//! Analysis layer
//! - diagnostics.rs: All-uppercase word detection
//! - completion.rs: Completion items and resolve
//! - code_action.rs: Lowercase quick fixes

pub mod code_action;
pub mod completion;
pub mod diagnostics;

/// Source tag attached to every diagnostic this server publishes
pub const DIAGNOSTIC_SOURCE: &str = "sample";
