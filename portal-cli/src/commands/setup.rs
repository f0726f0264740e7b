//! Setup command
//!
//! Non-interactive rendition of the setup wizard: answers come from flags,
//! the wizard decides which of them are required, and the resulting plan
//! is executed against the backend.

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use colored::*;
use portal_client::PortalClient;
use portal_client::setup::{RollbackPolicy, SetupExecutor, SetupReport};
use portal_core::wizard::{
    BuildTool, CREDENTIALS_PREFIX, CredentialType, Credentials, Orchestrator, ProvisioningPlan,
    RepositorySpec, SetupWizard, WizardAnswers, WizardContext,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::id_resolver::resolve_pipeline_id;
use crate::types::IdOrPrefix;

#[derive(Args)]
pub struct SetupArgs {
    /// Pipeline ID or unambiguous prefix
    pipeline: String,

    #[arg(short, long)]
    component: Option<String>,

    /// GitHub organization of the repository
    #[arg(long)]
    organization: String,

    /// Repository name
    #[arg(long)]
    repository: String,

    /// Register the repository as private
    #[arg(long)]
    private: bool,

    #[arg(long, value_enum)]
    orchestrator: OrchestratorArg,

    /// Store new credentials or reuse a stored secret; inferred when omitted
    #[arg(long, value_enum)]
    credential_type: Option<CredentialTypeArg>,

    /// GitHub user for new credentials
    #[arg(long)]
    username: Option<String>,

    /// GitHub token for new credentials
    #[arg(long, env = "PORTAL_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Path of a stored credential secret
    #[arg(long)]
    existing_secret: Option<String>,

    /// Build tool; inferred from the repository language when omitted
    #[arg(long)]
    build_tool: Option<String>,

    /// Delete created resources again if a later step fails
    #[arg(long)]
    rollback: bool,

    /// Print the plan without executing it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrchestratorArg {
    Jenkins,
    GithubActions,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CredentialTypeArg {
    New,
    Existing,
}

impl SetupArgs {
    /// Explicit type, else whichever kind of credential was supplied
    fn credential_type(&self) -> Option<CredentialType> {
        match self.credential_type {
            Some(CredentialTypeArg::New) => Some(CredentialType::New),
            Some(CredentialTypeArg::Existing) => Some(CredentialType::Existing),
            None if self.existing_secret.is_some() => Some(CredentialType::Existing),
            None if self.username.is_some() || self.github_token.is_some() => {
                Some(CredentialType::New)
            }
            None => None,
        }
    }

    fn answers(&self) -> Result<WizardAnswers> {
        let build_tool = self
            .build_tool
            .as_deref()
            .map(|tool| {
                BuildTool::parse(tool).with_context(|| {
                    let known: Vec<_> = BuildTool::ALL.iter().map(|t| t.as_str()).collect();
                    format!("Unknown build tool '{tool}', expected one of {}", known.join(", "))
                })
            })
            .transpose()?;

        let new_credentials = match (&self.username, &self.github_token) {
            (Some(username), Some(token)) => Some(Credentials {
                username: username.clone(),
                token: token.clone(),
            }),
            _ => None,
        };

        Ok(WizardAnswers {
            repository: Some(RepositorySpec {
                organization: self.organization.clone(),
                name: self.repository.clone(),
                private: self.private,
            }),
            orchestrator: Some(match self.orchestrator {
                OrchestratorArg::Jenkins => Orchestrator::Jenkins,
                OrchestratorArg::GithubActions => Orchestrator::GithubActions,
            }),
            credential_type: self.credential_type(),
            new_credentials,
            existing_secret_path: self.existing_secret.clone(),
            build_tool,
            // Flags are the confirmation
            confirmed: true,
        })
    }
}

pub async fn handle_setup_command(args: SetupArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let component_id = config.component(args.component.as_deref())?.to_string();
    let pipeline_id = resolve_pipeline_id(
        &client,
        Some(&component_id),
        &IdOrPrefix::parse(&args.pipeline),
    )
    .await?;

    let viewer = client.context(config.bootstrap_timeout).await;
    if !viewer.components.is_empty() && !viewer.components.contains(&component_id) {
        warn!(component = %component_id, user = %viewer.display_name, "Component is not among the viewer's components");
    }

    let context = fetch_context(&client, &component_id, &args.organization, &args.repository).await;
    let wizard = SetupWizard::new(context);
    let answers = args.answers()?;

    let steps: Vec<_> = wizard
        .visible_steps(&answers)
        .into_iter()
        .map(|step| step.title())
        .collect();
    debug!(steps = %steps.join(" → "), "Wizard flow");

    let plan = wizard
        .plan(&answers, pipeline_id, &component_id)
        .context("Setup answers are incomplete")?;

    print_plan(&plan);
    if args.dry_run {
        println!("{}", "Dry run, nothing was changed.".dimmed());
        return Ok(());
    }

    let rollback = if args.rollback {
        RollbackPolicy::DeleteCreated
    } else {
        RollbackPolicy::LeaveInPlace
    };
    let report = SetupExecutor::new(client)
        .with_rollback(rollback)
        .execute(&plan)
        .await;

    print_report(&report);
    if let Some(failure) = report.failure {
        bail!("{} failed: {}", failure.action.label(), failure.message);
    }
    Ok(())
}

/// Stored secrets and repository language, both best effort
async fn fetch_context(
    client: &PortalClient,
    component_id: &str,
    organization: &str,
    repository: &str,
) -> WizardContext {
    let (paths, language) = tokio::join!(
        client.list_secret_paths(component_id, CREDENTIALS_PREFIX),
        client.most_used_language(organization, Some(repository)),
    );

    let existing_secret_paths = paths.unwrap_or_else(|e| {
        warn!(error = %e, "Could not list stored credentials");
        Vec::new()
    });
    let most_used_language = language.unwrap_or_else(|e| {
        warn!(error = %e, "Could not detect repository language");
        None
    });

    WizardContext {
        existing_secret_paths,
        most_used_language,
    }
}

fn print_plan(plan: &ProvisioningPlan) {
    println!("{}", "Setup plan:".bold());
    println!(
        "  Repository:  {}/{}{}",
        plan.repository.organization,
        plan.repository.name.bold(),
        if plan.repository.private { " (private)" } else { "" }
    );
    println!("  Credentials: {}", plan.credentials.secret_path().cyan());
    println!("  Build tool:  {}", plan.build_tool);
    println!();
    for (index, action) in plan.actions().iter().enumerate() {
        println!("  {}. {}", index + 1, action.label());
    }
    println!();
}

fn print_report(report: &SetupReport) {
    for item in &report.created {
        println!("  {} {} {}", "✓".green(), item.action.label(), item.id.dimmed());
    }
    if let Some(failure) = &report.failure {
        println!("  {} {}: {}", "✗".red(), failure.action.label(), failure.message);
    }
    for item in &report.rolled_back {
        println!("  {} {} {}", "↺".yellow(), item.action.label(), "rolled back".dimmed());
    }
    for (item, error) in &report.rollback_errors {
        println!("  {} Could not roll back {}: {}", "!".red(), item.action.label(), error);
    }

    let orphaned = report.orphaned();
    if !orphaned.is_empty() {
        println!();
        println!("{}", "Left in place:".yellow().bold());
        for item in orphaned {
            println!("  - {} {}", item.action.label(), item.id);
        }
    }

    if report.is_success() {
        println!("{}", "✓ Setup completed successfully!".green().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SetupArgs,
    }

    fn parse(extra: &[&str]) -> SetupArgs {
        let mut argv = vec![
            "portal",
            "5f2c",
            "--organization",
            "acme",
            "--repository",
            "shop",
            "--orchestrator",
            "jenkins",
        ];
        argv.extend_from_slice(extra);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_answers_from_flags() {
        let answers = parse(&["--username", "bot", "--github-token", "t", "--build-tool", "Maven"])
            .answers()
            .unwrap();

        assert_eq!(answers.orchestrator, Some(Orchestrator::Jenkins));
        assert_eq!(answers.build_tool, Some(BuildTool::Maven));
        assert_eq!(answers.new_credentials.unwrap().username, "bot");
        assert!(answers.confirmed);
    }

    #[test]
    fn test_credential_type_follows_supplied_flags() {
        let args = parse(&["--existing-secret", "comp/github/legacy"]);
        assert_eq!(args.credential_type(), Some(CredentialType::Existing));

        let args = parse(&["--username", "bot", "--credential-type", "existing"]);
        assert_eq!(args.credential_type(), Some(CredentialType::Existing));

        assert_eq!(parse(&[]).credential_type(), None);
    }

    #[test]
    fn test_unknown_build_tool_is_rejected() {
        let error = parse(&["--build-tool", "ant"]).answers().unwrap_err();
        assert!(error.to_string().contains("Unknown build tool 'ant'"));
    }

    #[test]
    fn test_language_inference_completes_plan() {
        let wizard = SetupWizard::new(WizardContext {
            existing_secret_paths: Vec::new(),
            most_used_language: Some("Go".to_string()),
        });
        let answers = parse(&["--username", "bot", "--github-token", "t"])
            .answers()
            .unwrap();

        let plan = wizard
            .plan(&answers, uuid::Uuid::nil(), "comp")
            .unwrap();
        assert_eq!(plan.build_tool, BuildTool::Golang);
        assert_eq!(plan.credentials.secret_path(), "comp/github/shop");
    }
}
