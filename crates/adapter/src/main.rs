//! `apisearch-mcp`: stdio MCP adapter for the oapis.org API-search service.
//!
//! `run` serves the tool surface over stdio; `install` registers the adapter
//! in the host application's config file so it gets launched on demand.

mod install;
mod server;

use anyhow::Context as _;
use apisearch_tools::config::{DEFAULT_BASE_URL, UpstreamConfig};
use apisearch_tools::runtime::ApiSearchToolSource;
use clap::{Args, Parser, Subcommand};
use rmcp::ServiceExt as _;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "apisearch-mcp",
    version,
    about = "MCP adapter for the oapis.org API-search service"
)]
struct Cli {
    /// Default the log filter to debug (RUST_LOG still takes precedence).
    #[arg(
        long,
        global = true,
        env = "DEBUG",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the MCP tools over stdio.
    Run(RunArgs),
    /// Register this adapter in the host application's config file.
    Install(InstallArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Base URL of the upstream API-search service.
    #[arg(long, env = "APISEARCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds. When unset, no timeout is applied
    /// beyond the transport's own defaults.
    #[arg(long, env = "APISEARCH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Args)]
struct InstallArgs {
    /// Name of the server entry to register.
    #[arg(long, default_value = "apisearch")]
    name: String,

    /// Host config file to update. Defaults to the Claude Desktop config
    /// path for this platform.
    #[arg(long)]
    config_path: Option<PathBuf>,
}

fn init_tracing(debug: bool) {
    // stdout carries the protocol; diagnostics go to stderr only.
    let default_filter = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Install(args) => install::run(&args.name, args.config_path.as_deref()),
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = UpstreamConfig {
        base_url: args.base_url,
        timeout: args.timeout_secs.map(Duration::from_secs),
    };
    tracing::info!(base_url = %config.base_url, "starting apisearch MCP server on stdio");

    let source = ApiSearchToolSource::new(config);
    let service = server::ApiSearchServer::new(source)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to establish stdio MCP channel")?;
    service.waiting().await?;
    Ok(())
}
