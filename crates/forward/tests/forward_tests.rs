//! Integration tests for catalysishub-forward.
//!
//! These run the forwarder against an in-process mock upstream and check both
//! the returned value and the request the upstream saw.

use catalysishub_forward::{
    ForwardError, ForwardResult, ForwarderBuilder, GraphQLForwarder, DEFAULT_USER_AGENT,
};
use catalysishub_test_utils::fixtures::{
    GRAPHQL_ERROR_RESPONSE, REACTIONS_QUERY, SCHEMA_QUERY, SCHEMA_RESPONSE,
};
use catalysishub_test_utils::{unreachable_url, MockUpstream, StatusCode};
use serde_json::{json, Map, Value};

fn failure_message(result: &ForwardResult) -> String {
    let value = serde_json::to_value(result).unwrap();
    value["errors"][0]["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_forward_returns_upstream_body() {
    let upstream = MockUpstream::start(StatusCode::OK, SCHEMA_RESPONSE).await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let result = forwarder.forward(SCHEMA_QUERY, None).await;

    assert!(!result.is_failure());
    assert_eq!(result.to_json_string().unwrap(), SCHEMA_RESPONSE);
}

#[tokio::test]
async fn test_forward_sends_query_without_variables() {
    let upstream = MockUpstream::start(StatusCode::OK, SCHEMA_RESPONSE).await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    forwarder.forward(SCHEMA_QUERY, None).await;

    let requests = upstream.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].json(), json!({ "query": SCHEMA_QUERY }));
    assert!(!requests[0].body.contains("variables"));
}

#[tokio::test]
async fn test_forward_sends_variables_and_headers() {
    let upstream = MockUpstream::json(&json!({ "data": { "reactions": null } })).await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let mut variables = Map::new();
    variables.insert("first".to_string(), json!(3));
    variables.insert("surface".to_string(), json!("Pt"));

    forwarder.forward(REACTIONS_QUERY, Some(&variables)).await;

    let request = &upstream.requests().await[0];
    assert_eq!(request.json()["query"], REACTIONS_QUERY);
    assert_eq!(request.json()["variables"], json!({ "first": 3, "surface": "Pt" }));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
}

#[tokio::test]
async fn test_forward_uses_configured_user_agent() {
    let upstream = MockUpstream::start(StatusCode::OK, SCHEMA_RESPONSE).await;
    let forwarder = ForwarderBuilder::new(upstream.url())
        .with_user_agent("catalysis-test/0.0")
        .build()
        .unwrap();

    forwarder.forward(SCHEMA_QUERY, None).await;

    let request = &upstream.requests().await[0];
    assert_eq!(request.user_agent.as_deref(), Some("catalysis-test/0.0"));
}

#[tokio::test]
async fn test_graphql_errors_pass_through_as_response() {
    let upstream = MockUpstream::start(StatusCode::OK, GRAPHQL_ERROR_RESPONSE).await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let result = forwarder.forward("{ nope }", None).await;

    // Upstream GraphQL errors are data, not a forwarding failure
    assert!(!result.is_failure());
    assert_eq!(result.to_json_string().unwrap(), GRAPHQL_ERROR_RESPONSE);
}

#[tokio::test]
async fn test_http_error_status_becomes_failure_value() {
    let upstream = MockUpstream::start(StatusCode::BAD_GATEWAY, "upstream exploded").await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let result = forwarder.forward(SCHEMA_QUERY, None).await;

    assert!(result.is_failure());
    let message = failure_message(&result);
    assert!(message.starts_with("HTTP Request Error"));
    assert!(message.contains("502"));
    // The upstream body is not relayed
    assert!(!message.contains("exploded"));
}

#[tokio::test]
async fn test_try_forward_reports_http_status() {
    let upstream = MockUpstream::start(StatusCode::SERVICE_UNAVAILABLE, "maintenance").await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let err = forwarder.try_forward(SCHEMA_QUERY, None).await.unwrap_err();

    match err {
        ForwardError::Http(status, body) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_network_failure_becomes_failure_value() {
    let forwarder = GraphQLForwarder::new(unreachable_url()).unwrap();

    let result = forwarder.forward(SCHEMA_QUERY, None).await;

    assert!(result.is_failure());
    assert!(failure_message(&result).contains("HTTP Request Error"));

    let err = forwarder.try_forward(SCHEMA_QUERY, None).await.unwrap_err();
    assert!(matches!(err, ForwardError::Network(_)));
}

#[tokio::test]
async fn test_non_json_body_becomes_failure_value() {
    let upstream = MockUpstream::start(StatusCode::OK, "<html>not json</html>").await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let err = forwarder.try_forward(SCHEMA_QUERY, None).await.unwrap_err();
    assert!(matches!(err, ForwardError::Parse(_)));

    let result = forwarder.forward(SCHEMA_QUERY, None).await;
    assert!(failure_message(&result).starts_with("HTTP Request Error"));
}

#[tokio::test]
async fn test_concurrent_forwards_are_independent() {
    let upstream = MockUpstream::start(StatusCode::OK, SCHEMA_RESPONSE).await;
    let forwarder = GraphQLForwarder::new(upstream.url()).unwrap();

    let calls = (0..8).map(|_| {
        let forwarder = forwarder.clone();
        tokio::spawn(async move { forwarder.forward(SCHEMA_QUERY, None).await })
    });

    for call in calls.collect::<Vec<_>>() {
        let result = call.await.unwrap();
        let body: Value = serde_json::from_str(&result.to_json_string().unwrap()).unwrap();
        assert_eq!(body["data"]["__schema"]["queryType"]["name"], "Query");
    }
    assert_eq!(upstream.request_count().await, 8);
}
