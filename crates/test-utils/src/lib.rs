//! # Catalysis-Hub MCP Test Utilities
//!
//! Shared test infrastructure for the adapter crates.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::expect_used)]
//!
//! ## Modules
//!
//! - [`mock_upstream`] - An in-process GraphQL endpoint with canned responses
//! - [`fixtures`] - Common queries and upstream bodies

pub mod fixtures;
pub mod mock_upstream;

pub use axum::http::StatusCode;
pub use mock_upstream::{unreachable_url, MockUpstream, RecordedRequest};
