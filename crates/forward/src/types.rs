//! Wire shapes exchanged with the upstream GraphQL endpoint.

use crate::ForwardError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Label prefixed to every synthesized failure message.
pub const ERROR_LABEL: &str = "HTTP Request Error";

/// Body POSTed upstream.
///
/// `variables` is left out of the JSON entirely when absent rather than being
/// sent as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Map<String, Value>>,
}

/// Outcome of forwarding one query.
///
/// Upstream bodies are opaque: a GraphQL `errors` array produced by the
/// upstream server itself comes back as [`ForwardResult::Response`], the same
/// as any other body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForwardResult {
    /// The upstream JSON body, verbatim
    Response(Value),

    /// Transport, status or parse failure folded into GraphQL error shape
    Failed(ForwardFailure),
}

/// `{"errors": [{"message": "..."}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardFailure {
    pub errors: Vec<ErrorMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ForwardResult {
    /// Builds the failure value for `error`, prefixed with [`ERROR_LABEL`].
    #[must_use]
    pub fn from_error(error: &ForwardError) -> Self {
        Self::Failed(ForwardFailure {
            errors: vec![ErrorMessage {
                message: format!("{ERROR_LABEL}: {error}"),
            }],
        })
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Compact JSON text, as embedded in a tool call result.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
