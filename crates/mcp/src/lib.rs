//! MCP (Model Context Protocol) server library.
//!
//! This crate speaks the host-facing side of MCP: newline-delimited
//! JSON-RPC 2.0 over a byte stream (normally stdin/stdout), with tool
//! discovery and invocation delegated to a [`ToolHandler`].
//!
//! # Example
//!
//! ```no_run
//! use mcp::{CallToolResult, HandlerError, Server, Tool, ToolHandler};
//!
//! struct Greeter;
//!
//! impl ToolHandler for Greeter {
//!     fn tools(&self) -> Vec<Tool> {
//!         vec![Tool {
//!             name: "greet".to_string(),
//!             description: Some("Say hello".to_string()),
//!             input_schema: serde_json::json!({"type": "object"}),
//!         }]
//!     }
//!
//!     async fn call_tool(
//!         &self,
//!         name: String,
//!         _arguments: Option<serde_json::Map<String, serde_json::Value>>,
//!     ) -> Result<CallToolResult, HandlerError> {
//!         match name.as_str() {
//!             "greet" => Ok(CallToolResult::text("hello")),
//!             other => Err(HandlerError::UnknownTool(other.to_string())),
//!         }
//!     }
//! }
//!
//! # async fn example() -> mcp::Result<()> {
//! Server::new("greeter", env!("CARGO_PKG_VERSION"), Greeter)
//!     .serve_stdio()
//!     .await
//! # }
//! ```

mod error;
mod protocol;
mod server;

pub use error::{Error, HandlerError, Result};
pub use protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, RequestId, ServerCapabilities, ServerInfo,
    Tool, ToolContent, PROTOCOL_VERSION,
};
pub use server::{Server, ToolHandler};
