//! Wizard steps, answers and fetched context

use serde::{Deserialize, Serialize};

/// One page of the setup wizard, in flow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    Repository,
    Orchestrator,
    CredentialType,
    NewCredentials,
    ExistingCredentials,
    BuildTool,
    Review,
}

impl WizardStep {
    pub const ORDER: [WizardStep; 7] = [
        WizardStep::Repository,
        WizardStep::Orchestrator,
        WizardStep::CredentialType,
        WizardStep::NewCredentials,
        WizardStep::ExistingCredentials,
        WizardStep::BuildTool,
        WizardStep::Review,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Repository => "Repository",
            WizardStep::Orchestrator => "Orchestrator",
            WizardStep::CredentialType => "Credential Type",
            WizardStep::NewCredentials => "New Credentials",
            WizardStep::ExistingCredentials => "Existing Credentials",
            WizardStep::BuildTool => "Build Tool",
            WizardStep::Review => "Review",
        }
    }
}

/// Build orchestrator the pipeline runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orchestrator {
    Jenkins,
    GithubActions,
}

/// Whether the wizard stores new credentials or reuses a stored secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    New,
    Existing,
}

/// Build tool Piper is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    Maven,
    Gradle,
    Npm,
    Golang,
    Pip,
    Docker,
}

impl BuildTool {
    pub const ALL: [BuildTool; 6] = [
        BuildTool::Maven,
        BuildTool::Gradle,
        BuildTool::Npm,
        BuildTool::Golang,
        BuildTool::Pip,
        BuildTool::Docker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildTool::Maven => "maven",
            BuildTool::Gradle => "gradle",
            BuildTool::Npm => "npm",
            BuildTool::Golang => "golang",
            BuildTool::Pip => "pip",
            BuildTool::Docker => "docker",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(input.trim()))
    }

    /// Build tool preselected for a repository language
    pub fn from_language(language: &str) -> Option<Self> {
        match language.trim().to_ascii_lowercase().as_str() {
            "java" => Some(BuildTool::Maven),
            "kotlin" => Some(BuildTool::Gradle),
            "javascript" | "typescript" => Some(BuildTool::Npm),
            "go" => Some(BuildTool::Golang),
            "python" => Some(BuildTool::Pip),
            "dockerfile" => Some(BuildTool::Docker),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuildTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository the wizard registers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    pub organization: String,
    pub name: String,
    pub private: bool,
}

/// Username and token written to the secret store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

/// Values entered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardAnswers {
    pub repository: Option<RepositorySpec>,
    pub orchestrator: Option<Orchestrator>,
    pub credential_type: Option<CredentialType>,
    pub new_credentials: Option<Credentials>,
    pub existing_secret_path: Option<String>,
    pub build_tool: Option<BuildTool>,
    pub confirmed: bool,
}

/// State fetched asynchronously before the wizard is shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardContext {
    /// Credential secrets already stored for the component
    pub existing_secret_paths: Vec<String>,
    /// Most-used language of the organization's repositories
    pub most_used_language: Option<String>,
}

impl WizardContext {
    pub fn inferred_build_tool(&self) -> Option<BuildTool> {
        self.most_used_language
            .as_deref()
            .and_then(BuildTool::from_language)
    }
}
