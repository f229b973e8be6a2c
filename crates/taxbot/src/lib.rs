//! Taxbot — MCP tool host for a remote Portuguese-tax answering service.
//!
//! This crate owns everything between the MCP wire and the remote HTTP API:
//!
//! - **QueryClient**: one `POST /api/mcp/query` per tool call, bearer auth,
//!   no retries and no timeout budget.
//! - **QueryOutcome**: tagged decoding of the service's reply (direct answer
//!   vs. specialist clarification), so formatting is exhaustive.
//! - **TaxQuestionTool**: the single advertised tool; translates arguments
//!   to a query and the outcome (or failure) into one text content block.
//!
//! # Example
//!
//! ```no_run
//! use taxbot::{QueryClient, TaxQuestionTool};
//!
//! # async fn example() -> mcp::Result<()> {
//! let client = QueryClient::new("http://localhost:3000", "secret-key");
//! let tool = TaxQuestionTool::new(client);
//! mcp::Server::new("taxbot", env!("CARGO_PKG_VERSION"), tool)
//!     .serve_stdio()
//!     .await
//! # }
//! ```

mod api;
mod client;
mod error;
mod format;
mod outcome;
mod tool;

pub use api::QueryApi;
pub use client::{QueryClient, QUERY_PATH};
pub use error::Error;
pub use format::{render_error, render_outcome};
pub use outcome::{Answer, QueryOutcome, QueryRequest, SpecialistOption};
pub use tool::{TaxQuestionTool, SPECIALISTS, TOOL_NAME};
