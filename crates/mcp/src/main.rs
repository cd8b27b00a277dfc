mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalysishub-mcp")]
#[command(about = "MCP server for the Catalysis-Hub GraphQL API", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP HTTP server (the default when no command is given)
    Serve(commands::serve::ServeArgs),

    /// Forward one GraphQL query upstream and print the JSON result
    ///
    /// Exits with an error if the upstream request failed.
    Query(commands::query::QueryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::run(cli.config, args).await,
        Some(Commands::Query(args)) => commands::query::run(cli.config, args).await,
        None => commands::serve::run(cli.config, commands::serve::ServeArgs::default()).await,
    }
}

/// Logs go to stderr; stdout carries `query` output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
