//! MCP server error types.

use crate::protocol::JsonRpcError;
use thiserror::Error;

/// Fatal transport errors that end the serve loop.
///
/// Malformed inbound JSON is not fatal; it is answered on the wire with a
/// parse-error response instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors a tool handler raises instead of producing a result.
///
/// `UnknownTool` is the one failure that surfaces to the host as a
/// protocol-level error rather than an error-flagged tool result.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    Internal(String),
}

impl From<HandlerError> for JsonRpcError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::UnknownTool(_) => JsonRpcError::invalid_params(err.to_string()),
            HandlerError::Internal(message) => JsonRpcError::internal(message),
        }
    }
}
