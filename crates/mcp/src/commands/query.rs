//! One-shot query command.

use anyhow::{Context, Result};
use catalysishub_config::AdapterConfig;
use catalysishub_forward::{ForwardResult, ForwarderBuilder, GraphQLForwarder};
use clap::Args;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// GraphQL query text
    #[arg(value_name = "QUERY")]
    query: String,

    /// Query variables as a JSON object
    #[arg(long, value_name = "JSON", value_parser = parse_variables)]
    variables: Option<Map<String, Value>>,

    /// Upstream GraphQL endpoint (overrides config file)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

fn parse_variables(value: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("variables must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn build_forwarder(
    mut config: AdapterConfig,
    endpoint: Option<String>,
) -> Result<GraphQLForwarder> {
    if let Some(endpoint) = endpoint {
        config.upstream.url = endpoint;
    }
    super::validate_merged(&config)?;

    ForwarderBuilder::new(config.upstream.url)
        .with_user_agent(config.upstream.user_agent)
        .with_optional_timeout(config.upstream.timeout.map(std::time::Duration::from_secs))
        .build()
        .context("Failed to create upstream GraphQL client")
}

/// Write `result` as pretty JSON, then fail if it carries a forwarding error.
fn report(result: &ForwardResult, endpoint: &str, out: &mut impl Write) -> Result<()> {
    let output = serde_json::to_string_pretty(result)?;
    writeln!(out, "{output}")?;

    if result.is_failure() {
        anyhow::bail!("Upstream request to {endpoint} failed");
    }
    Ok(())
}

pub async fn run(config_path: Option<PathBuf>, args: QueryArgs) -> Result<()> {
    let config = super::resolve_config(config_path)?;
    let forwarder = build_forwarder(config, args.endpoint)?;

    let result = forwarder.forward(&args.query, args.variables.as_ref()).await;

    report(&result, forwarder.endpoint(), &mut std::io::stdout().lock())
}
