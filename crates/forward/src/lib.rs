//! Pass-through GraphQL forwarding.
//!
//! This crate sends a caller-supplied GraphQL query (and optional variables)
//! to a fixed upstream endpoint and hands back the raw JSON response. Nothing
//! is validated, cached or transformed.
//!
//! # Examples
//!
//! ```no_run
//! use catalysishub_forward::GraphQLForwarder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let forwarder = GraphQLForwarder::new("https://api.catalysis-hub.org/graphql")?;
//!     let result = forwarder
//!         .forward("{ reactions(first: 1) { totalCount } }", None)
//!         .await;
//!     println!("{}", result.to_json_string()?);
//!     Ok(())
//! }
//! ```
//!
//! Failures are values, not errors: [`GraphQLForwarder::forward`] folds them
//! into `{"errors": [{"message": "HTTP Request Error: ..."}]}`. Use
//! [`GraphQLForwarder::try_forward`] to get the typed [`ForwardError`] instead.

mod client;
mod error;
mod types;

pub use client::{ForwarderBuilder, GraphQLForwarder, DEFAULT_USER_AGENT};
pub use error::{ForwardError, Result};
pub use types::{ErrorMessage, ForwardFailure, ForwardResult, GraphQLRequest, ERROR_LABEL};
