//! MCP server exposing the Catalysis-Hub GraphQL API as a single tool.
//!
//! Clients speak JSON-RPC 2.0 over HTTP POST. The server answers the MCP
//! handshake, lists one tool (`catalysishub_graphql`) and forwards that tool's
//! `query` and `variables` to the upstream GraphQL endpoint, returning the raw
//! upstream JSON as text content.
//!
//! ```no_run
//! use catalysishub_config::AdapterConfig;
//! use catalysishub_mcp::McpHttpServer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = McpHttpServer::from_config(&AdapterConfig::default())?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod protocol;
mod router;
mod server;
mod tools;

pub use error::{JsonRpcError, McpError, INTERNAL_ERROR, METHOD_NOT_FOUND};
pub use protocol::{
    GraphQLToolArguments, InitializeResult, JsonRpcRequest, JsonRpcResponse, Method, RequestId,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolCallResult, ToolContent, ToolDefinition,
    ToolsCapability, ToolsListResult, JSONRPC_VERSION,
};
pub use router::{McpRouter, RpcReply};
pub use server::{app, McpHttpServer, READY_BODY};
pub use tools::{ServerMetadata, Tool, GRAPHQL_TOOL_NAME};
