//! Pipeline command handlers
//!
//! Handles all pipeline-related CLI commands including creation,
//! listing, viewing, deletion, and watching status changes.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use colored::*;
use portal_client::PortalClient;
use portal_core::domain::category::Category;
use portal_core::domain::pipeline::PipelineType;
use portal_core::dto::pipeline::CreatePipeline;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::id_resolver::resolve_pipeline_id;
use crate::render;
use crate::types::IdOrPrefix;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Create a new pipeline
    Create {
        /// Pipeline name
        #[arg(short, long)]
        name: String,

        /// Orchestrator type
        #[arg(short = 't', long = "type", value_enum, default_value = "jenkins")]
        pipeline_type: PipelineTypeArg,

        /// Component to create the pipeline in
        #[arg(short, long)]
        component: Option<String>,
    },
    /// List the pipelines of a component
    List {
        #[arg(short, long)]
        component: Option<String>,
    },
    /// Get pipeline details and per-category status
    Get {
        /// Pipeline ID or unambiguous prefix
        id: String,

        /// Component to resolve ID prefixes in
        #[arg(short, long)]
        component: Option<String>,

        /// Print the category summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a pipeline
    Delete {
        /// Pipeline ID or unambiguous prefix
        id: String,

        /// Component to resolve ID prefixes in
        #[arg(short, long)]
        component: Option<String>,
    },
    /// Print category status changes until interrupted
    Watch {
        /// Pipeline ID or unambiguous prefix
        id: String,

        /// Component to resolve ID prefixes in
        #[arg(short, long)]
        component: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PipelineTypeArg {
    Jenkins,
    GithubActions,
}

impl From<PipelineTypeArg> for PipelineType {
    fn from(arg: PipelineTypeArg) -> Self {
        match arg {
            PipelineTypeArg::Jenkins => PipelineType::Jenkins,
            PipelineTypeArg::GithubActions => PipelineType::GithubActions,
        }
    }
}

/// Handle pipeline commands
///
/// Routes pipeline subcommands to their respective handlers.
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        PipelineCommands::Create {
            name,
            pipeline_type,
            component,
        } => {
            let component = config.component(component.as_deref())?;
            create_pipeline(&client, component, name, pipeline_type.into()).await
        }
        PipelineCommands::List { component } => {
            let component = config.component(component.as_deref())?;
            list_pipelines(&client, component).await
        }
        PipelineCommands::Get {
            id,
            component,
            json,
        } => {
            let uuid = resolve(&client, config, component.as_deref(), &id).await?;
            get_pipeline(&client, uuid, json).await
        }
        PipelineCommands::Delete { id, component } => {
            let uuid = resolve(&client, config, component.as_deref(), &id).await?;
            delete_pipeline(&client, uuid).await
        }
        PipelineCommands::Watch { id, component } => {
            let uuid = resolve(&client, config, component.as_deref(), &id).await?;
            watch_pipeline(&client, config, uuid).await
        }
    }
}

/// Resolve `id` within the explicit component, else the configured one
async fn resolve(
    client: &PortalClient,
    config: &Config,
    component: Option<&str>,
    id: &str,
) -> Result<Uuid> {
    let component = component.or(config.component_id.as_deref());
    resolve_pipeline_id(client, component, &IdOrPrefix::parse(id)).await
}

async fn create_pipeline(
    client: &PortalClient,
    component_id: &str,
    name: String,
    pipeline_type: PipelineType,
) -> Result<()> {
    let pipeline = client
        .create_pipeline(CreatePipeline {
            component_id: component_id.to_string(),
            name,
            pipeline_type,
        })
        .await
        .context("Failed to create pipeline")?;

    println!("{}", "✓ Pipeline created successfully!".green().bold());
    println!("  ID:   {}", pipeline.id.to_string().cyan());
    println!("  Name: {}", pipeline.name.bold());
    println!("  Type: {}", pipeline.pipeline_type);

    Ok(())
}

async fn list_pipelines(client: &PortalClient, component_id: &str) -> Result<()> {
    let pipelines = client.list_pipelines(component_id).await?;

    if pipelines.is_empty() {
        println!("{}", "No pipelines found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} pipeline(s):", pipelines.len()).bold()
        );
        println!();
        for pipeline in pipelines {
            render::print_pipeline_summary(&pipeline);
        }
    }

    Ok(())
}

async fn get_pipeline(client: &PortalClient, uuid: Uuid, json: bool) -> Result<()> {
    let pipeline = client.get_pipeline(uuid).await?;

    if json {
        let summaries = pipeline.aggregator().summaries();
        println!(
            "{}",
            serde_json::to_string_pretty(&summaries).context("Failed to encode summaries")?
        );
    } else {
        render::print_pipeline_details(&pipeline);
    }

    Ok(())
}

async fn delete_pipeline(client: &PortalClient, uuid: Uuid) -> Result<()> {
    client.delete_pipeline(uuid).await?;

    println!(
        "{}",
        format!("✓ Pipeline {} deleted successfully!", uuid)
            .green()
            .bold()
    );

    Ok(())
}

/// Poll the pipeline and print every category whose state changed
///
/// Transient fetch errors are logged and the next tick retries.
async fn watch_pipeline(client: &PortalClient, config: &Config, uuid: Uuid) -> Result<()> {
    let mut interval = tokio::time::interval(config.watch_interval);
    let mut previous: BTreeMap<Category, String> = BTreeMap::new();

    println!(
        "{}",
        format!("Watching pipeline {uuid} (Ctrl-C to stop)").dimmed()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "Stopped watching.".dimmed());
                return Ok(());
            }
            _ = interval.tick() => {}
        }

        let pipeline = match client.get_pipeline(uuid).await {
            Ok(pipeline) => pipeline,
            Err(e) if e.is_not_found() => {
                println!("{}", format!("Pipeline {uuid} no longer exists.").yellow());
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "Failed to poll pipeline");
                continue;
            }
        };

        let current: BTreeMap<Category, String> = pipeline
            .aggregator()
            .summaries()
            .iter()
            .map(|summary| (summary.category, render::summary_line(summary)))
            .collect();

        for change in diff_states(&previous, &current) {
            println!("{change}");
        }
        debug!(categories = current.len(), "Polled pipeline");
        previous = current;
    }
}

/// Lines describing what changed between two polls
fn diff_states(
    previous: &BTreeMap<Category, String>,
    current: &BTreeMap<Category, String>,
) -> Vec<String> {
    let mut changes = Vec::new();
    for (category, line) in current {
        if previous.get(category) != Some(line) {
            changes.push(line.clone());
        }
    }
    for category in previous.keys() {
        if !current.contains_key(category) {
            changes.push(format!("{}: removed", category.title()));
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: PipelineCommands,
    }

    fn component_of(argv: &[&str]) -> Option<String> {
        match TestCli::try_parse_from(argv).unwrap().command {
            PipelineCommands::Get { component, .. }
            | PipelineCommands::Delete { component, .. }
            | PipelineCommands::Watch { component, .. } => component,
            _ => panic!("unexpected subcommand"),
        }
    }

    #[test]
    fn test_prefix_commands_accept_component() {
        assert_eq!(
            component_of(&["portal", "get", "5f2c", "--component", "shop"]),
            Some("shop".to_string())
        );
        assert_eq!(
            component_of(&["portal", "delete", "5f2c", "-c", "shop"]),
            Some("shop".to_string())
        );
        assert_eq!(
            component_of(&["portal", "watch", "5f2c", "-c", "shop"]),
            Some("shop".to_string())
        );
        assert_eq!(component_of(&["portal", "get", "5f2c"]), None);
    }

    #[test]
    fn test_diff_reports_changed_and_removed_categories() {
        let previous = BTreeMap::from([
            (Category::Orchestration, "Orchestration: pending (Jenkins)".to_string()),
            (Category::Compliance, "Compliance: created (Cumulus)".to_string()),
        ]);
        let current = BTreeMap::from([
            (Category::Orchestration, "Orchestration: created (Jenkins)".to_string()),
            (
                Category::SourceCodeManagement,
                "Source Code Management: created (GitHub)".to_string(),
            ),
        ]);

        let changes = diff_states(&previous, &current);

        assert_eq!(
            changes,
            vec![
                "Orchestration: created (Jenkins)".to_string(),
                "Source Code Management: created (GitHub)".to_string(),
                "Compliance: removed".to_string(),
            ]
        );
    }

    #[test]
    fn test_diff_is_empty_when_nothing_changed() {
        let state = BTreeMap::from([(Category::Orchestration, "x".to_string())]);
        assert!(diff_states(&state, &state).is_empty());
    }
}
