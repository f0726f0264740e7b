//! Portal CLI
//!
//! Command-line console for the pipeline portal: inspect pipelines and their
//! per-category status, run the setup wizard, manage secrets and trigger
//! administrative operations.

mod commands;
mod config;
mod id_resolver;
mod render;
mod types;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Pipeline portal CLI", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "PORTAL_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Bearer token for the backend
    #[arg(long, env = "PORTAL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Component the pipelines and secrets belong to
    #[arg(long, env = "PORTAL_COMPONENT_ID")]
    component: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "PORTAL_REQUEST_TIMEOUT", default_value = "30")]
    request_timeout: u64,

    /// Upper bound for loading the viewer context, in seconds
    #[arg(long, env = "PORTAL_BOOTSTRAP_TIMEOUT", default_value = "10")]
    bootstrap_timeout: u64,

    /// Poll interval of `pipeline watch`, in seconds
    #[arg(long, env = "PORTAL_WATCH_INTERVAL", default_value = "5")]
    watch_interval: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_cli=info,portal_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("{} {:#}", "✗ Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
        component_id: cli.component,
        request_timeout: Duration::from_secs(cli.request_timeout),
        bootstrap_timeout: Duration::from_secs(cli.bootstrap_timeout),
        watch_interval: Duration::from_secs(cli.watch_interval),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
