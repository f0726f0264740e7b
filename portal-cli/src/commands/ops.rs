//! Administrative operations

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::id_resolver::resolve_pipeline_id;
use crate::types::IdOrPrefix;

#[derive(Subcommand)]
pub enum OpsCommands {
    /// Reconcile every resource of a pipeline now
    Reconcile {
        /// Pipeline ID or unambiguous prefix
        id: String,
    },
    /// Toggle debug mode of a pipeline
    Debug {
        /// Pipeline ID or unambiguous prefix
        id: String,
    },
}

pub async fn handle_ops_command(command: OpsCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let component = config.component_id.as_deref();

    match command {
        OpsCommands::Reconcile { id } => {
            let uuid = resolve_pipeline_id(&client, component, &IdOrPrefix::parse(&id)).await?;
            if client.force_reconciliation(uuid).await? {
                println!("{}", "✓ Reconciliation requested.".green().bold());
            } else {
                println!("{}", "Backend declined the reconciliation request.".yellow());
            }
        }
        OpsCommands::Debug { id } => {
            let uuid = resolve_pipeline_id(&client, component, &IdOrPrefix::parse(&id)).await?;
            let enabled = client.toggle_debug_label(uuid).await?;
            let state = if enabled { "enabled".yellow() } else { "disabled".normal() };
            println!("Debug mode {state} for pipeline {}", uuid.to_string().cyan());
        }
    }

    Ok(())
}
