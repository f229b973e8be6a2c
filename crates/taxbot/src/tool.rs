//! The tax-question tool: registry descriptor and invoker.

use mcp::{CallToolResult, HandlerError, Tool, ToolHandler};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::QueryApi;
use crate::format;
use crate::outcome::QueryRequest;

/// Tool name advertised to hosts.
pub const TOOL_NAME: &str = "ask_portuguese_tax_question";

/// Specialist codes the schema advertises. Advisory metadata for the host;
/// values are forwarded verbatim and enforced remotely, if at all.
pub const SPECIALISTS: [&str; 7] = ["civa", "cirs", "circ", "segsoc", "riti", "rgit", "cis"];

/// Tool host bridging MCP tool calls to the remote query API.
pub struct TaxQuestionTool<A> {
    api: A,
}

impl<A: QueryApi> TaxQuestionTool<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    fn descriptor() -> Tool {
        Tool {
            name: TOOL_NAME.to_string(),
            description: Some(
                "Ask questions about Portuguese taxes (IVA, IRS, IRC, Social Security, etc.). \
                 Supports ANY language (Portuguese, Russian, English, Spanish, French, German, \
                 Chinese, etc.). Provides expert answers based on official Portuguese tax codes. \
                 Long answers (>400 chars) return AI summary + PDF link with full details."
                    .to_string(),
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "Your tax question in any language",
                    },
                    "specialist": {
                        "type": "string",
                        "description": "Optional: Force a specific specialist (civa, cirs, circ, segsoc, riti, rgit, cis)",
                        "enum": SPECIALISTS,
                    },
                },
                "required": ["question"],
            }),
        }
    }
}

impl<A: QueryApi> ToolHandler for TaxQuestionTool<A> {
    fn tools(&self) -> Vec<Tool> {
        vec![Self::descriptor()]
    }

    async fn call_tool(
        &self,
        name: String,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, HandlerError> {
        if name != TOOL_NAME {
            return Err(HandlerError::UnknownTool(name));
        }

        // Structural destructuring only: a missing question is the remote
        // service's call, and the schema's specialist enum is advisory.
        let request = QueryRequest::from_arguments(arguments.as_ref());
        debug!(specialist = ?request.specialist, "forwarding tax question");

        // Total conversion: every remote failure becomes an error-flagged
        // result, never an Err back to the protocol layer.
        match self.api.query(request).await {
            Ok(outcome) => Ok(CallToolResult::text(format::render_outcome(&outcome))),
            Err(e) => {
                warn!("remote query failed: {e}");
                Ok(CallToolResult::error(format::render_error(&e)))
            }
        }
    }
}
