//! Provisioning plan produced by a completed wizard
//!
//! Resource creation has a fixed dependency order: the orchestrator needs
//! the repository identifier and the Piper configuration needs the
//! orchestrator identifier. The plan only records what to create; the
//! executor threads the returned identifiers through.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::{BuildTool, Credentials, Orchestrator, RepositorySpec};
use crate::domain::kind::Kind;
use crate::domain::secret::SecretPath;

/// Where the orchestrator reads its repository credentials from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Credentials entered in the wizard, written before anything else
    New {
        path: SecretPath,
        credentials: Credentials,
    },
    /// Secret already present in the store
    Existing { path: String },
}

impl CredentialSource {
    pub fn secret_path(&self) -> String {
        match self {
            CredentialSource::New { path, .. } => path.to_string(),
            CredentialSource::Existing { path } => path.clone(),
        }
    }
}

/// One backend call of the setup chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupAction {
    WriteCredentials,
    CreateGithubRepository,
    CreateJenkinsPipeline,
    CreateGithubActions,
    CreatePiperConfig,
}

impl SetupAction {
    pub fn label(self) -> &'static str {
        match self {
            SetupAction::WriteCredentials => "Store credentials",
            SetupAction::CreateGithubRepository => "Register GitHub repository",
            SetupAction::CreateJenkinsPipeline => "Create Jenkins pipeline",
            SetupAction::CreateGithubActions => "Set up GitHub Actions",
            SetupAction::CreatePiperConfig => "Generate Piper configuration",
        }
    }

    /// Actions one of which must have run first, since this action consumes
    /// the identifier it returned
    pub fn requires(self) -> &'static [SetupAction] {
        match self {
            SetupAction::WriteCredentials | SetupAction::CreateGithubRepository => &[],
            SetupAction::CreateJenkinsPipeline | SetupAction::CreateGithubActions => {
                &[SetupAction::CreateGithubRepository]
            }
            SetupAction::CreatePiperConfig => &[
                SetupAction::CreateJenkinsPipeline,
                SetupAction::CreateGithubActions,
            ],
        }
    }

    /// Backend resource kind the action creates; `None` for secret writes
    pub fn created_kind(self) -> Option<Kind> {
        match self {
            SetupAction::WriteCredentials => None,
            SetupAction::CreateGithubRepository => Some(Kind::GithubRepository),
            SetupAction::CreateJenkinsPipeline => Some(Kind::JenkinsPipeline),
            SetupAction::CreateGithubActions => Some(Kind::GithubActionsWorkflow),
            SetupAction::CreatePiperConfig => Some(Kind::PiperConfig),
        }
    }
}

/// Everything needed to run the setup chain for one pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningPlan {
    pub pipeline_id: Uuid,
    pub credentials: CredentialSource,
    pub repository: RepositorySpec,
    pub orchestrator: Orchestrator,
    pub build_tool: BuildTool,
}

impl ProvisioningPlan {
    /// Actions in execution order
    pub fn actions(&self) -> Vec<SetupAction> {
        let mut actions = Vec::with_capacity(4);
        if matches!(self.credentials, CredentialSource::New { .. }) {
            actions.push(SetupAction::WriteCredentials);
        }
        actions.push(SetupAction::CreateGithubRepository);
        actions.push(self.orchestrator_action());
        actions.push(SetupAction::CreatePiperConfig);
        actions
    }

    pub fn orchestrator_action(&self) -> SetupAction {
        match self.orchestrator {
            Orchestrator::Jenkins => SetupAction::CreateJenkinsPipeline,
            Orchestrator::GithubActions => SetupAction::CreateGithubActions,
        }
    }
}
