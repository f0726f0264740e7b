//! Integration command handlers
//!
//! Adds and removes the compliance and scanning services of a pipeline.
//! Repository, orchestrator and Piper are provisioned through `setup`.

use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use colored::*;
use portal_client::PortalClient;
use portal_core::catalog;
use portal_core::domain::kind::Kind;
use portal_core::dto::integration::{
    CreateCheckmarxOne, CreateCumulus, CreateJiraProject, CreateOpenSourceCompliance,
    CreateSonarQube, CreateStagingServiceCredentials,
};
use portal_core::dto::resource::CreatedResource;
use uuid::Uuid;

use crate::config::Config;
use crate::id_resolver::resolve_pipeline_id;
use crate::types::IdOrPrefix;

#[derive(Subcommand)]
pub enum IntegrationCommands {
    /// Add an integration to a pipeline
    Add {
        /// Pipeline ID or unambiguous prefix
        pipeline: String,

        #[arg(value_enum)]
        integration: IntegrationArg,

        /// Checkmarx ONE project name
        #[arg(long)]
        project_name: Option<String>,

        /// SonarQube or Jira project key
        #[arg(long)]
        project_key: Option<String>,

        /// PPMS software component version for open source compliance
        #[arg(long)]
        ppms_scv: Option<String>,

        /// Secret path of the staging-service credentials
        #[arg(long)]
        secret_path: Option<String>,
    },
    /// Remove an integration by resource ID
    Remove {
        #[arg(value_enum)]
        integration: IntegrationArg,

        /// Backend resource ID
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IntegrationArg {
    Cumulus,
    CheckmarxOne,
    SonarQube,
    OpenSourceCompliance,
    Jira,
    StagingService,
}

impl IntegrationArg {
    pub fn kind(self) -> Kind {
        match self {
            IntegrationArg::Cumulus => Kind::CumulusPipeline,
            IntegrationArg::CheckmarxOne => Kind::CheckmarxOneScan,
            IntegrationArg::SonarQube => Kind::SonarQubeProject,
            IntegrationArg::OpenSourceCompliance => Kind::OpenSourceComplianceScan,
            IntegrationArg::Jira => Kind::JiraProject,
            IntegrationArg::StagingService => Kind::StagingServiceCredential,
        }
    }
}

fn required(value: Option<String>, flag: &str, integration: IntegrationArg) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!(
            "{} requires --{flag}",
            catalog::display_name(&integration.kind().into())
        ),
    }
}

pub async fn handle_integration_command(
    command: IntegrationCommands,
    config: &Config,
) -> Result<()> {
    let client = config.client()?;

    match command {
        IntegrationCommands::Add {
            pipeline,
            integration,
            project_name,
            project_key,
            ppms_scv,
            secret_path,
        } => {
            let pipeline_id = resolve_pipeline_id(
                &client,
                config.component_id.as_deref(),
                &IdOrPrefix::parse(&pipeline),
            )
            .await?;

            let created = add_integration(
                &client,
                pipeline_id,
                integration,
                project_name,
                project_key,
                ppms_scv,
                secret_path,
            )
            .await?;

            println!(
                "{}",
                format!("✓ {} added!", catalog::display_name(&created.kind))
                    .green()
                    .bold()
            );
            println!("  ID: {}", created.id.cyan());
        }
        IntegrationCommands::Remove { integration, id } => {
            client.delete_resource(integration.kind(), &id).await?;
            println!(
                "{}",
                format!(
                    "✓ {} {} removed!",
                    catalog::display_name(&integration.kind().into()),
                    id
                )
                .green()
                .bold()
            );
        }
    }

    Ok(())
}

async fn add_integration(
    client: &PortalClient,
    pipeline_id: Uuid,
    integration: IntegrationArg,
    project_name: Option<String>,
    project_key: Option<String>,
    ppms_scv: Option<String>,
    secret_path: Option<String>,
) -> Result<CreatedResource> {
    let created = match integration {
        IntegrationArg::Cumulus => client.create_cumulus(CreateCumulus { pipeline_id }).await?,
        IntegrationArg::CheckmarxOne => {
            client
                .create_checkmarx_one(CreateCheckmarxOne {
                    pipeline_id,
                    project_name: required(project_name, "project-name", integration)?,
                })
                .await?
        }
        IntegrationArg::SonarQube => {
            client
                .create_sonar_qube(CreateSonarQube {
                    pipeline_id,
                    project_key: required(project_key, "project-key", integration)?,
                })
                .await?
        }
        IntegrationArg::OpenSourceCompliance => {
            client
                .create_open_source_compliance(CreateOpenSourceCompliance {
                    pipeline_id,
                    ppms_scv: ppms_scv.filter(|scv| !scv.trim().is_empty()),
                })
                .await?
        }
        IntegrationArg::Jira => {
            client
                .create_jira_project(CreateJiraProject {
                    pipeline_id,
                    project_key: required(project_key, "project-key", integration)?,
                })
                .await?
        }
        IntegrationArg::StagingService => {
            client
                .create_staging_service_credentials(CreateStagingServiceCredentials {
                    pipeline_id,
                    secret_path: required(secret_path, "secret-path", integration)?,
                })
                .await?
        }
    };
    Ok(created)
}
