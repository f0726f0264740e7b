//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod integration;
mod ops;
mod pipeline;
mod secret;
mod setup;

pub use integration::IntegrationCommands;
pub use ops::OpsCommands;
pub use pipeline::PipelineCommands;
pub use secret::SecretCommands;
pub use setup::SetupArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Set up repository, orchestrator and Piper for a pipeline
    Setup(SetupArgs),
    /// Secret store access
    Secret {
        #[command(subcommand)]
        command: SecretCommands,
    },
    /// Compliance and scanning integrations
    Integration {
        #[command(subcommand)]
        command: IntegrationCommands,
    },
    /// Administrative operations
    Ops {
        #[command(subcommand)]
        command: OpsCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, config).await,
        Commands::Setup(args) => setup::handle_setup_command(args, config).await,
        Commands::Secret { command } => secret::handle_secret_command(command, config).await,
        Commands::Integration { command } => {
            integration::handle_integration_command(command, config).await
        }
        Commands::Ops { command } => ops::handle_ops_command(command, config).await,
    }
}

/// Parse a single key=value pair
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
