//! HTTP transport: one POST route for JSON-RPC plus readiness and CORS.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use catalysishub_config::AdapterConfig;
use catalysishub_forward::ForwarderBuilder;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::router::{McpRouter, RpcReply};
use crate::tools::ServerMetadata;

/// Body returned for any non-POST, non-OPTIONS request on the RPC path.
pub const READY_BODY: &str = "ready";

impl IntoResponse for RpcReply {
    fn into_response(self) -> Response {
        match self {
            Self::Acknowledged => StatusCode::NO_CONTENT.into_response(),
            Self::Response { status, body } => (status, Json(body)).into_response(),
        }
    }
}

/// Build the axum application serving `router` on `path`.
#[must_use]
pub fn app(router: Arc<McpRouter>, path: &str) -> Router {
    Router::new()
        .route(
            path,
            post(handle_rpc)
                .options(|| async { StatusCode::NO_CONTENT })
                .fallback(|| async {
                    (
                        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                        READY_BODY,
                    )
                }),
        )
        // Every POST body reaches the router, which answers in JSON-RPC
        .layer(DefaultBodyLimit::disable())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(router)
}

async fn handle_rpc(State(router): State<Arc<McpRouter>>, body: Bytes) -> RpcReply {
    router.handle_bytes(&body).await
}

/// The adapter's HTTP server, assembled from configuration.
#[derive(Debug)]
pub struct McpHttpServer {
    addr: String,
    path: String,
    router: Arc<McpRouter>,
}

impl McpHttpServer {
    /// Build the forwarder and router described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client cannot be created.
    pub fn from_config(config: &AdapterConfig) -> anyhow::Result<Self> {
        let forwarder = ForwarderBuilder::new(&config.upstream.url)
            .with_user_agent(&config.upstream.user_agent)
            .with_optional_timeout(config.upstream.timeout_duration())
            .build()
            .context("Failed to create upstream GraphQL client")?;

        let metadata = ServerMetadata::new(&config.protocol.default_version);

        Ok(Self {
            addr: config.server.bind_address(),
            path: config.server.path.clone(),
            router: Arc::new(McpRouter::new(metadata, forwarder)),
        })
    }

    #[must_use]
    pub fn router(&self) -> Arc<McpRouter> {
        Arc::clone(&self.router)
    }

    /// Serve until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;
        let local: SocketAddr = listener.local_addr()?;

        tracing::info!(
            addr = %local,
            path = %self.path,
            upstream = %self.router_endpoint(),
            "Catalysis-Hub MCP server listening"
        );

        axum::serve(listener, app(Arc::clone(&self.router), &self.path))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }

    fn router_endpoint(&self) -> &str {
        self.router.forwarder().endpoint()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalysishub_config::{DEFAULT_ENDPOINT, DEFAULT_PROTOCOL_VERSION};

    #[test]
    fn from_config_uses_defaults() {
        let server = McpHttpServer::from_config(&AdapterConfig::default()).unwrap();
        assert_eq!(server.addr, "127.0.0.1:8787");
        assert_eq!(server.path, "/mcp");
        assert_eq!(server.router_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(
            server.router().metadata().default_protocol_version,
            DEFAULT_PROTOCOL_VERSION
        );
    }

    #[test]
    fn from_config_applies_upstream_settings() {
        let mut config = AdapterConfig::default();
        config.upstream.url = "http://localhost:4000/graphql".to_string();
        config.upstream.user_agent = "custom/1.0".to_string();
        config.upstream.timeout = Some(5);
        config.protocol.default_version = "2025-06-18".to_string();

        let server = McpHttpServer::from_config(&config).unwrap();
        let router = server.router();
        assert_eq!(router.forwarder().endpoint(), "http://localhost:4000/graphql");
        assert_eq!(router.forwarder().user_agent(), "custom/1.0");
        assert_eq!(
            router.forwarder().timeout(),
            Some(std::time::Duration::from_secs(5))
        );
        assert_eq!(router.metadata().default_protocol_version, "2025-06-18");
    }
}
