//! Workspace commands exposed through `workspace/executeCommand`

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::{Range, Url};

/// Lowercases the text in a range: arguments are `[uri, range]`
pub const FIX_COMMAND: &str = "sample.fix";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Invalid arguments for {command}: {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("Document is not open: {0}")]
    DocumentNotOpen(Url),

    #[error("Client did not apply the edit: {0}")]
    EditRejected(String),
}

impl From<CommandError> for jsonrpc::Error {
    fn from(error: CommandError) -> Self {
        match error {
            CommandError::EditRejected(_) => {
                let mut rpc = jsonrpc::Error::internal_error();
                rpc.message = error.to_string().into();
                rpc
            }
            _ => jsonrpc::Error::invalid_params(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixArguments {
    pub uri: Url,
    pub range: Range,
}

impl FixArguments {
    pub fn parse(arguments: Vec<Value>) -> Result<Self, CommandError> {
        let invalid = |reason: String| CommandError::InvalidArguments {
            command: FIX_COMMAND.to_string(),
            reason,
        };

        let [uri, range]: [Value; 2] = arguments
            .try_into()
            .map_err(|args: Vec<Value>| invalid(format!("expected 2 arguments, got {}", args.len())))?;

        Ok(Self {
            uri: serde_json::from_value(uri).map_err(|e| invalid(format!("uri: {}", e)))?,
            range: serde_json::from_value(range).map_err(|e| invalid(format!("range: {}", e)))?,
        })
    }
}
