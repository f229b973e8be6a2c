//! MCP server loop (stdio transport, newline-delimited JSON-RPC).

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{HandlerError, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, RequestId, ServerCapabilities, ServerInfo,
    Tool, PROTOCOL_VERSION,
};

/// Trait for the tool capability behind the server.
///
/// Implementations declare their tools and execute tool calls. This is the
/// boundary between protocol plumbing and actual tool behavior.
pub trait ToolHandler: Send + Sync {
    /// The fixed set of tools to advertise via tools/list.
    fn tools(&self) -> Vec<Tool>;

    /// Execute a tool call.
    ///
    /// Returns `HandlerError::UnknownTool` for unrecognized names; any other
    /// failure mode is expected to come back as an error-flagged
    /// [`CallToolResult`], not an `Err`.
    fn call_tool(
        &self,
        name: String,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> impl Future<Output = std::result::Result<CallToolResult, HandlerError>> + Send;
}

/// MCP server: owns identity plus a tool handler and speaks the protocol
/// over a byte stream pair.
pub struct Server<H> {
    info: ServerInfo,
    handler: Arc<H>,
}

impl<H: ToolHandler + 'static> Server<H> {
    pub fn new(name: impl Into<String>, version: impl Into<String>, handler: H) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            handler: Arc::new(handler),
        }
    }

    /// Serve on the process's stdin/stdout.
    ///
    /// Stdout is the protocol channel; nothing else may write to it.
    pub async fn serve_stdio(self) -> Result<()> {
        self.serve(io::stdin(), io::stdout()).await
    }

    /// Serve on an arbitrary stream pair until the reader reaches EOF.
    ///
    /// Requests other than tools/call are answered inline (they never
    /// block). Each tools/call runs as an independent task, so multiple
    /// calls may be in flight concurrently; the only shared state is the
    /// response writer.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = BufReader::new(reader).lines();
        let writer = Arc::new(Mutex::new(writer));

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(e) => {
                    warn!("unparseable request line: {e}");
                    let response =
                        JsonRpcResponse::error(None, JsonRpcError::parse_error(e.to_string()));
                    write_message(&writer, &response).await?;
                    continue;
                }
            };

            self.dispatch(request, &writer).await?;
        }

        Ok(())
    }

    async fn dispatch<W>(&self, request: JsonRpcRequest, writer: &Arc<Mutex<W>>) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        if request.is_notification() {
            debug!(method = %request.method, "notification received");
            return Ok(());
        }
        // Checked above; every path below must answer this id exactly once.
        let Some(id) = request.id else { return Ok(()) };

        match request.method.as_str() {
            "initialize" => {
                if let Some(params) = request.params
                    && let Ok(init) = serde_json::from_value::<InitializeParams>(params)
                    && let Some(client) = init.client_info
                {
                    debug!(client = %client.name, "initialize");
                }
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION,
                    capabilities: ServerCapabilities::default(),
                    server_info: self.info.clone(),
                };
                self.respond(writer, id, serde_json::to_value(result)?).await
            }
            "ping" => self.respond(writer, id, serde_json::json!({})).await,
            "tools/list" => {
                let result = ListToolsResult {
                    tools: self.handler.tools(),
                };
                self.respond(writer, id, serde_json::to_value(result)?).await
            }
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(e) => {
                            let response = JsonRpcResponse::error(
                                Some(id),
                                JsonRpcError::invalid_params(e.to_string()),
                            );
                            return write_message(writer, &response).await;
                        }
                    };
                self.spawn_call(id, params, writer);
                Ok(())
            }
            other => {
                let response =
                    JsonRpcResponse::error(Some(id), JsonRpcError::method_not_found(other));
                write_message(writer, &response).await
            }
        }
    }

    async fn respond<W>(&self, writer: &Arc<Mutex<W>>, id: RequestId, result: Value) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_message(writer, &JsonRpcResponse::result(id, result)).await
    }

    fn spawn_call<W>(&self, id: RequestId, params: CallToolParams, writer: &Arc<Mutex<W>>)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let handler = Arc::clone(&self.handler);
        let writer = Arc::clone(writer);

        tokio::spawn(async move {
            let response = match handler.call_tool(params.name, params.arguments).await {
                Ok(result) => match serde_json::to_value(result) {
                    Ok(value) => JsonRpcResponse::result(id, value),
                    Err(e) => {
                        JsonRpcResponse::error(Some(id), JsonRpcError::internal(e.to_string()))
                    }
                },
                Err(err) => JsonRpcResponse::error(Some(id), err.into()),
            };
            if let Err(e) = write_message(&writer, &response).await {
                warn!("failed to write tools/call response: {e}");
            }
        });
    }
}

async fn write_message<W>(writer: &Mutex<W>, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    let mut writer = writer.lock().await;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use tokio::io::{duplex, DuplexStream};

    struct EchoHandler;

    impl ToolHandler for EchoHandler {
        fn tools(&self) -> Vec<Tool> {
            vec![Tool {
                name: "echo".to_string(),
                description: Some("Echo the question back".to_string()),
                input_schema: serde_json::json!({"type": "object"}),
            }]
        }

        async fn call_tool(
            &self,
            name: String,
            arguments: Option<serde_json::Map<String, Value>>,
        ) -> std::result::Result<CallToolResult, HandlerError> {
            if name != "echo" {
                return Err(HandlerError::UnknownTool(name));
            }
            let text = arguments
                .and_then(|args| args.get("question").and_then(Value::as_str).map(String::from))
                .unwrap_or_default();
            Ok(CallToolResult::text(text))
        }
    }

    struct Harness {
        input: DuplexStream,
        output: tokio::io::Lines<BufReader<DuplexStream>>,
    }

    impl Harness {
        fn start() -> Self {
            let (input, server_reader) = duplex(64 * 1024);
            let (server_writer, output) = duplex(64 * 1024);
            let server = Server::new("taxbot-test", "0.0.0", EchoHandler);
            tokio::spawn(async move {
                server.serve(server_reader, server_writer).await.unwrap();
            });
            Self {
                input,
                output: BufReader::new(output).lines(),
            }
        }

        async fn send(&mut self, line: &str) {
            self.input.write_all(line.as_bytes()).await.unwrap();
            self.input.write_all(b"\n").await.unwrap();
        }

        async fn recv(&mut self) -> Value {
            let line = self.output.next_line().await.unwrap().unwrap();
            serde_json::from_str(&line).unwrap()
        }
    }

    #[tokio::test]
    async fn initialize_handshake() {
        let mut h = Harness::start();
        h.send(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"host","version":"1.0"}}}"#)
            .await;
        let resp = h.recv().await;
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(resp["result"]["serverInfo"]["name"], "taxbot-test");
    }

    #[tokio::test]
    async fn lists_declared_tools() {
        let mut h = Harness::start();
        h.send(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        let resp = h.recv().await;
        let tools = resp["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "echo");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn calls_tool_and_returns_content() {
        let mut h = Harness::start();
        h.send(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo","arguments":{"question":"hello"}}}"#,
        )
        .await;
        let resp = h.recv().await;
        assert_eq!(resp["id"], 3);
        assert_eq!(resp["result"]["content"][0]["type"], "text");
        assert_eq!(resp["result"]["content"][0]["text"], "hello");
    }

    #[tokio::test]
    async fn unknown_tool_is_protocol_error() {
        let mut h = Harness::start();
        h.send(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        )
        .await;
        let resp = h.recv().await;
        assert_eq!(resp["error"]["code"], JsonRpcError::INVALID_PARAMS);
        assert!(
            resp["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Unknown tool: nope")
        );
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let mut h = Harness::start();
        h.send(r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#).await;
        let resp = h.recv().await;
        assert_eq!(resp["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let mut h = Harness::start();
        h.send(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        // The next response on the wire must belong to the ping, proving the
        // notification produced nothing.
        h.send(r#"{"jsonrpc":"2.0","id":6,"method":"ping"}"#).await;
        let resp = h.recv().await;
        assert_eq!(resp["id"], 6);
        assert_eq!(resp["result"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn garbage_line_answered_with_parse_error() {
        let mut h = Harness::start();
        h.send("this is not json").await;
        let resp = h.recv().await;
        assert_eq!(resp["id"], Value::Null);
        assert_eq!(resp["error"]["code"], JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn serve_ends_cleanly_on_eof() {
        let (input, server_reader) = duplex(1024);
        let (server_writer, _output) = duplex(1024);
        let server = Server::new("taxbot-test", "0.0.0", EchoHandler);
        let task = tokio::spawn(async move { server.serve(server_reader, server_writer).await });
        drop(input);
        task.await.unwrap().unwrap();
    }

    #[test]
    fn result_constructors() {
        let ok = CallToolResult::text("fine");
        assert!(!ok.is_error);
        assert_eq!(ok.content[0].as_text(), Some("fine"));

        let err = CallToolResult::error("broken");
        assert!(err.is_error);
    }
}
