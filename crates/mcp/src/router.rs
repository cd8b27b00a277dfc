//! JSON-RPC dispatch.
//!
//! Every inbound message produces exactly one [`RpcReply`]: a result
//! envelope, an error envelope, or a bare acknowledgement for notifications.

use axum::http::StatusCode;
use catalysishub_forward::GraphQLForwarder;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::McpError;
use crate::protocol::{
    GraphQLToolArguments, InitializeResult, JsonRpcRequest, JsonRpcResponse, Method, RequestId,
    ServerCapabilities, ToolCallParams, ToolCallResult,
};
use crate::tools::{ServerMetadata, Tool};

/// What to send back for one inbound message.
#[derive(Debug, Clone)]
pub enum RpcReply {
    /// Notification accepted; no body
    Acknowledged,

    /// A response envelope and the HTTP status to send it with
    Response {
        status: StatusCode,
        body: JsonRpcResponse,
    },
}

impl RpcReply {
    fn success(id: RequestId, result: Value) -> Self {
        Self::Response {
            status: StatusCode::OK,
            body: JsonRpcResponse::success(id, result),
        }
    }

    fn error(id: Option<RequestId>, error: &McpError) -> Self {
        Self::Response {
            status: error.status(),
            body: JsonRpcResponse::error(id, error.to_jsonrpc_error()),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Acknowledged => StatusCode::NO_CONTENT,
            Self::Response { status, .. } => *status,
        }
    }

    /// The response envelope, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&JsonRpcResponse> {
        match self {
            Self::Acknowledged => None,
            Self::Response { body, .. } => Some(body),
        }
    }
}

/// Routes JSON-RPC messages to the handshake, the tool catalog, or the
/// GraphQL forwarder.
///
/// Holds only immutable state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct McpRouter {
    metadata: ServerMetadata,
    forwarder: GraphQLForwarder,
}

impl McpRouter {
    #[must_use]
    pub fn new(metadata: ServerMetadata, forwarder: GraphQLForwarder) -> Self {
        Self {
            metadata,
            forwarder,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &ServerMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn forwarder(&self) -> &GraphQLForwarder {
        &self.forwarder
    }

    /// Handle a raw request body.
    ///
    /// Bodies that are not a JSON-RPC envelope get an internal-error reply
    /// with a `null` id.
    pub async fn handle_bytes(&self, body: &[u8]) -> RpcReply {
        match serde_json::from_slice::<JsonRpcRequest>(body) {
            Ok(request) => self.handle(request).await,
            Err(source) => {
                let error = McpError::Parse { source };
                tracing::warn!(error = %error, "Malformed JSON-RPC envelope");
                RpcReply::error(None, &error)
            }
        }
    }

    /// Handle one parsed envelope.
    #[tracing::instrument(skip_all, fields(method = %request.method, id = ?request.id))]
    pub async fn handle(&self, request: JsonRpcRequest) -> RpcReply {
        if request.jsonrpc.as_deref() != Some(crate::protocol::JSONRPC_VERSION) {
            tracing::debug!(jsonrpc = ?request.jsonrpc, "Unexpected jsonrpc version, continuing");
        }

        let method = Method::parse(&request.method);
        let params = request.params_object();
        tracing::debug!(method = method.as_str(), "Dispatching");

        let Some(id) = request.id else {
            tracing::debug!("Acknowledging notification");
            return RpcReply::Acknowledged;
        };

        let outcome = match method {
            Method::Initialize => self.initialize(&params),
            Method::Initialized => {
                tracing::debug!("Client initialized");
                return RpcReply::Acknowledged;
            }
            Method::ToolsList => to_result(self.metadata.tools()),
            Method::ToolsCall => self.call_tool(params).await,
            Method::Other(method) => Err(McpError::MethodNotFound { method }),
        };

        match outcome {
            Ok(result) => RpcReply::success(id, result),
            Err(error) => {
                tracing::warn!(id = %id, error = %error, "Request failed");
                RpcReply::error(Some(id), &error)
            }
        }
    }

    fn initialize(&self, params: &Map<String, Value>) -> Result<Value, McpError> {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(&self.metadata.default_protocol_version)
            .to_string();

        tracing::info!(protocol_version = %protocol_version, "Initializing session");

        to_result(&InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities::default(),
            server_info: self.metadata.server_info.clone(),
        })
    }

    async fn call_tool(&self, params: Map<String, Value>) -> Result<Value, McpError> {
        let params: ToolCallParams =
            serde_json::from_value(Value::Object(params)).map_err(|e| {
                McpError::InvalidArguments {
                    message: e.to_string(),
                }
            })?;

        let Some(tool) = Tool::from_name(&params.name) else {
            return Err(McpError::ToolNotFound { name: params.name });
        };

        tracing::debug!(tool = tool.name(), "Calling tool");

        match tool {
            Tool::GraphQL => {
                let arguments = params
                    .arguments
                    .unwrap_or_else(|| Value::Object(Map::new()));
                let arguments: GraphQLToolArguments = serde_json::from_value(arguments)
                    .map_err(|e| McpError::InvalidArguments {
                        message: e.to_string(),
                    })?;

                let result = self
                    .forwarder
                    .forward(&arguments.query, arguments.variables.as_ref())
                    .await;

                let text = result.to_json_string().map_err(|e| McpError::Internal {
                    message: e.to_string(),
                })?;

                to_result(&ToolCallResult::text(text))
            }
        }
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::Internal {
        message: e.to_string(),
    })
}
