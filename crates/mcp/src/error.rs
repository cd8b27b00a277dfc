use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 reserved error codes used by this server.
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// Structured JSON-RPC 2.0 error object sent in error responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Errors that can occur while handling one JSON-RPC message.
///
/// Upstream GraphQL failures are not represented here: they are reported as
/// data inside a successful tool result.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("parse error: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("method not found: {method}")]
    MethodNotFound { method: String },

    #[error("tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("invalid tool arguments: {message}")]
    InvalidArguments { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl McpError {
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::MethodNotFound { .. } | Self::ToolNotFound { .. } => METHOD_NOT_FOUND,
            Self::Parse { .. } | Self::InvalidArguments { .. } | Self::Internal { .. } => {
                INTERNAL_ERROR
            }
        }
    }

    /// HTTP status the error envelope is sent with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotFound { .. } | Self::ToolNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Parse { .. } | Self::InvalidArguments { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert to a JSON-RPC 2.0 error object for wire transmission.
    #[must_use]
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        let message = match self {
            Self::Parse { source } => format!("Parse error: {source}"),
            Self::MethodNotFound { method } => format!("Method not found: {method}"),
            Self::ToolNotFound { name } => format!("Tool not found: {name}"),
            Self::InvalidArguments { message } => format!("Invalid tool arguments: {message}"),
            Self::Internal { message } => format!("Internal error: {message}"),
        };
        JsonRpcError {
            code: self.code(),
            message,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_is_internal() {
        let err = McpError::Parse {
            source: serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        };
        assert_eq!(err.code(), INTERNAL_ERROR);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_jsonrpc_error().message.starts_with("Parse error"));
    }

    #[test]
    fn method_not_found_has_correct_code() {
        let err = McpError::MethodNotFound {
            method: "resources/list".to_string(),
        };
        let rpc_err = err.to_jsonrpc_error();
        assert_eq!(rpc_err.code, METHOD_NOT_FOUND);
        assert!(rpc_err.message.contains("resources/list"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn tool_not_found_uses_method_not_found_code() {
        let err = McpError::ToolNotFound {
            name: "delete_everything".to_string(),
        };
        let rpc_err = err.to_jsonrpc_error();
        assert_eq!(rpc_err.code, METHOD_NOT_FOUND);
        assert_eq!(rpc_err.message, "Tool not found: delete_everything");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_arguments_is_internal() {
        let err = McpError::InvalidArguments {
            message: "missing field `query`".to_string(),
        };
        assert_eq!(err.code(), INTERNAL_ERROR);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn data_is_omitted_when_absent() {
        let err = McpError::Internal {
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(err.to_jsonrpc_error()).unwrap();
        assert!(json.get("data").is_none());
    }
}
