//! HTTP client forwarding GraphQL payloads to a fixed upstream endpoint.

use crate::{ForwardError, ForwardResult, GraphQLRequest, Result};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::time::Duration;

/// `User-Agent` identifying this adapter to the upstream API.
pub const DEFAULT_USER_AGENT: &str = concat!("catalysishub-mcp/", env!("CARGO_PKG_VERSION"));

/// Builder for [`GraphQLForwarder`].
///
/// ```no_run
/// use catalysishub_forward::ForwarderBuilder;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let forwarder = ForwarderBuilder::new("https://api.catalysis-hub.org/graphql")
///     .with_user_agent("my-agent/1.0")
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ForwarderBuilder {
    endpoint: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl ForwarderBuilder {
    /// Default settings:
    /// - [`DEFAULT_USER_AGENT`]
    /// - no request timeout
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Caps the whole upstream request (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Like [`with_timeout`](Self::with_timeout), but `None` leaves it unset.
    #[must_use]
    pub fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the forwarder and its pooled HTTP client.
    pub fn build(self) -> Result<GraphQLForwarder> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ForwardError::Client(e.to_string()))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            user_agent = %self.user_agent,
            timeout_secs = self.timeout.map(|t| t.as_secs()),
            "Created GraphQL forwarder"
        );

        Ok(GraphQLForwarder {
            endpoint: self.endpoint,
            user_agent: self.user_agent,
            timeout: self.timeout,
            http,
        })
    }
}

/// Forwards GraphQL queries to one upstream endpoint.
///
/// Cloning is cheap; clones share the underlying connection pool. The
/// forwarder holds no mutable state, so concurrent calls need no coordination.
#[derive(Debug, Clone)]
pub struct GraphQLForwarder {
    endpoint: String,
    user_agent: String,
    timeout: Option<Duration>,
    http: reqwest::Client,
}

impl GraphQLForwarder {
    /// Forwarder with default settings for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        ForwarderBuilder::new(endpoint).build()
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Forwards `query` and `variables` upstream.
    ///
    /// Never fails: network errors, non-success statuses and unparseable
    /// bodies all come back as [`ForwardResult::Failed`].
    pub async fn forward(
        &self,
        query: &str,
        variables: Option<&Map<String, Value>>,
    ) -> ForwardResult {
        match self.try_forward(query, variables).await {
            Ok(body) => ForwardResult::Response(body),
            Err(e) => {
                tracing::warn!(error = %e, "Forwarding failed");
                ForwardResult::from_error(&e)
            }
        }
    }

    /// Forwards `query` and `variables` upstream, returning the parsed body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The upstream returns a non-success HTTP status
    /// - The response body is not JSON
    #[tracing::instrument(
        skip(self, query, variables),
        fields(endpoint = %self.endpoint, query_len = query.len(), has_variables = variables.is_some())
    )]
    pub async fn try_forward(
        &self,
        query: &str,
        variables: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        let body = GraphQLRequest { query, variables };

        tracing::debug!("Sending GraphQL request upstream");
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ForwardError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(ForwardError::Http(status.as_u16(), error_body));
        }

        let json: Value = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse upstream response");
            ForwardError::Parse(e.to_string())
        })?;

        tracing::info!(status = status.as_u16(), "Forwarded GraphQL request");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let forwarder = GraphQLForwarder::new("https://api.example.com/graphql").unwrap();
        assert_eq!(forwarder.endpoint(), "https://api.example.com/graphql");
        assert_eq!(forwarder.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(forwarder.timeout(), None);
    }

    #[test]
    fn test_builder_overrides() {
        let forwarder = ForwarderBuilder::new("http://localhost:4000/graphql")
            .with_user_agent("test-agent/2.0")
            .with_timeout(Duration::from_secs(45))
            .build()
            .unwrap();

        assert_eq!(forwarder.user_agent(), "test-agent/2.0");
        assert_eq!(forwarder.timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_optional_timeout_can_clear() {
        let forwarder = ForwarderBuilder::new("http://localhost:4000/graphql")
            .with_timeout(Duration::from_secs(10))
            .with_optional_timeout(None)
            .build()
            .unwrap();

        assert_eq!(forwarder.timeout(), None);
    }

    #[test]
    fn test_default_user_agent_names_crate_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("catalysishub-mcp/"));
        assert!(DEFAULT_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
