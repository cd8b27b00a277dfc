//! The tool this server advertises, and the metadata answered at handshake.

use crate::protocol::{ServerInfo, ToolDefinition, ToolsListResult};
use serde_json::json;

/// Name of the single GraphQL tool.
pub const GRAPHQL_TOOL_NAME: &str = "catalysishub_graphql";

const GRAPHQL_TOOL_DESCRIPTION: &str = "Execute a GraphQL query against the Catalysis-Hub \
database of surface reactions and catalysis calculations. The raw JSON response is returned \
as text. The schema is not documented here: discover it with introspection queries such as \
`{ __schema { queryType { fields { name description } } } }`.";

/// Tools known to this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Forward a GraphQL query to the upstream endpoint
    GraphQL,
}

impl Tool {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            GRAPHQL_TOOL_NAME => Some(Self::GraphQL),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GraphQL => GRAPHQL_TOOL_NAME,
        }
    }

    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        match self {
            Self::GraphQL => ToolDefinition {
                name: GRAPHQL_TOOL_NAME.to_string(),
                description: GRAPHQL_TOOL_DESCRIPTION.to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The GraphQL query to execute"
                        },
                        "variables": {
                            "type": "object",
                            "description": "Optional variables for the query"
                        }
                    },
                    "required": ["query"]
                }),
            },
        }
    }
}

/// Immutable metadata built once at startup and shared by every request.
#[derive(Debug, Clone)]
pub struct ServerMetadata {
    pub server_info: ServerInfo,

    /// Answered by `initialize` when the client does not name a version
    pub default_protocol_version: String,

    tools: ToolsListResult,
}

impl ServerMetadata {
    /// Metadata naming this crate and its version.
    #[must_use]
    pub fn new(default_protocol_version: impl Into<String>) -> Self {
        Self {
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            default_protocol_version: default_protocol_version.into(),
            tools: ToolsListResult {
                tools: vec![Tool::GraphQL.definition()],
            },
        }
    }

    /// The `tools/list` catalog.
    #[must_use]
    pub const fn tools(&self) -> &ToolsListResult {
        &self.tools
    }
}
