//! Shared queries and upstream response bodies.
//!
//! Prefer inline fixtures when the exact payload is what a test is about.

/// Smallest useful introspection query.
pub const SCHEMA_QUERY: &str = "query{__schema{queryType{name}}}";

/// Upstream answer to [`SCHEMA_QUERY`], as compact JSON text.
pub const SCHEMA_RESPONSE: &str = r#"{"data":{"__schema":{"queryType":{"name":"Query"}}}}"#;

/// A query taking variables, shaped like the Catalysis-Hub `reactions` field.
pub const REACTIONS_QUERY: &str = r"
query Reactions($first: Int, $surface: String) {
  reactions(first: $first, surfaceComposition: $surface) {
    totalCount
    edges { node { Equation reactionEnergy } }
  }
}
";

/// Upstream body carrying GraphQL-level errors (still HTTP 200).
pub const GRAPHQL_ERROR_RESPONSE: &str =
    r#"{"errors":[{"message":"Cannot query field \"nope\" on type \"Query\"."}]}"#;
