//! Setup executor
//!
//! Runs a [`ProvisioningPlan`] against a [`ProvisioningBackend`] in plan
//! order. The chain stops at the first failure. Whatever was created before
//! that point is reported, and under [`RollbackPolicy::DeleteCreated`] it is
//! deleted again in reverse order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use portal_core::domain::kind::Kind;
use portal_core::domain::secret::SecretPath;
use portal_core::dto::github::{CreateGithubActions, CreateGithubRepository};
use portal_core::dto::jenkins::CreateJenkinsPipeline;
use portal_core::dto::piper::CreatePiperConfig;
use portal_core::dto::resource::CreatedResource;
use portal_core::wizard::{CredentialSource, ProvisioningPlan, SetupAction};
use tracing::{error, info, warn};

use crate::PortalClient;
use crate::error::{ClientError, Result};

/// Backend calls the setup chain needs
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    async fn write_secret(&self, path: &SecretPath, data: &BTreeMap<String, String>) -> Result<()>;

    async fn create_github_repository(&self, req: CreateGithubRepository) -> Result<CreatedResource>;

    async fn create_jenkins_pipeline(&self, req: CreateJenkinsPipeline) -> Result<CreatedResource>;

    async fn create_github_actions(&self, req: CreateGithubActions) -> Result<CreatedResource>;

    async fn create_piper_config(&self, req: CreatePiperConfig) -> Result<CreatedResource>;

    async fn delete_resource(&self, kind: Kind, id: &str) -> Result<()>;
}

#[async_trait]
impl ProvisioningBackend for PortalClient {
    async fn write_secret(&self, path: &SecretPath, data: &BTreeMap<String, String>) -> Result<()> {
        PortalClient::write_secret(self, path, data).await
    }

    async fn create_github_repository(&self, req: CreateGithubRepository) -> Result<CreatedResource> {
        PortalClient::create_github_repository(self, req).await
    }

    async fn create_jenkins_pipeline(&self, req: CreateJenkinsPipeline) -> Result<CreatedResource> {
        PortalClient::create_jenkins_pipeline(self, req).await
    }

    async fn create_github_actions(&self, req: CreateGithubActions) -> Result<CreatedResource> {
        PortalClient::create_github_actions(self, req).await
    }

    async fn create_piper_config(&self, req: CreatePiperConfig) -> Result<CreatedResource> {
        PortalClient::create_piper_config(self, req).await
    }

    async fn delete_resource(&self, kind: Kind, id: &str) -> Result<()> {
        PortalClient::delete_resource(self, kind, id).await
    }
}

/// What to do with resources created before a failed step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Keep them and report them as orphaned
    #[default]
    LeaveInPlace,
    /// Delete them in reverse creation order; stored secrets are kept
    DeleteCreated,
}

/// Something a setup action produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub action: SetupAction,
    /// Backend identifier, or the secret path for credential writes
    pub id: String,
    pub name: String,
}

/// The step that stopped the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFailure {
    pub action: SetupAction,
    /// User-facing error text
    pub message: String,
}

/// Outcome of one setup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// Items created, in creation order
    pub created: Vec<CreatedItem>,
    pub failure: Option<SetupFailure>,
    /// Items deleted again under [`RollbackPolicy::DeleteCreated`]
    pub rolled_back: Vec<CreatedItem>,
    /// Items whose deletion failed, with the error text
    pub rollback_errors: Vec<(CreatedItem, String)>,
}

impl SetupReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Items left behind by a failed run
    pub fn orphaned(&self) -> Vec<&CreatedItem> {
        if self.is_success() {
            return Vec::new();
        }
        self.created
            .iter()
            .filter(|item| !self.rolled_back.contains(item))
            .collect()
    }
}

/// Identifiers returned by earlier actions
#[derive(Debug, Default)]
struct ChainState {
    repository_id: Option<String>,
    orchestration_id: Option<String>,
}

impl ChainState {
    fn require(value: &Option<String>, what: &str) -> Result<String> {
        value
            .clone()
            .ok_or_else(|| ClientError::InternalError(format!("{what} is not available yet")))
    }
}

pub struct SetupExecutor<B> {
    backend: B,
    rollback: RollbackPolicy,
}

impl<B: ProvisioningBackend> SetupExecutor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            rollback: RollbackPolicy::default(),
        }
    }

    pub fn with_rollback(mut self, rollback: RollbackPolicy) -> Self {
        self.rollback = rollback;
        self
    }

    /// Run every action of `plan`, stopping at the first failure
    pub async fn execute(&self, plan: &ProvisioningPlan) -> SetupReport {
        let mut report = SetupReport::default();
        let mut state = ChainState::default();

        for action in plan.actions() {
            info!(action = action.label(), pipeline_id = %plan.pipeline_id, "Running setup step");

            match self.run(action, plan, &mut state).await {
                Ok(item) => report.created.push(item),
                Err(e) => {
                    error!(action = action.label(), error = %e, "Setup step failed");
                    report.failure = Some(SetupFailure {
                        action,
                        message: e.user_message(),
                    });
                    break;
                }
            }
        }

        if report.is_success() {
            info!(pipeline_id = %plan.pipeline_id, created = report.created.len(), "Setup completed");
            return report;
        }

        if self.rollback == RollbackPolicy::DeleteCreated {
            self.roll_back(&mut report).await;
        }

        for item in report.orphaned() {
            warn!(action = item.action.label(), id = %item.id, "Resource left in place after failed setup");
        }

        report
    }

    async fn run(
        &self,
        action: SetupAction,
        plan: &ProvisioningPlan,
        state: &mut ChainState,
    ) -> Result<CreatedItem> {
        match action {
            SetupAction::WriteCredentials => {
                let CredentialSource::New { path, credentials } = &plan.credentials else {
                    return Err(ClientError::InternalError(
                        "no new credentials to store".to_string(),
                    ));
                };
                let data = BTreeMap::from([
                    ("username".to_string(), credentials.username.clone()),
                    ("token".to_string(), credentials.token.clone()),
                ]);
                self.backend.write_secret(path, &data).await?;

                Ok(CreatedItem {
                    action,
                    id: path.to_string(),
                    name: path.name().to_string(),
                })
            }
            SetupAction::CreateGithubRepository => {
                let created = self
                    .backend
                    .create_github_repository(CreateGithubRepository {
                        pipeline_id: plan.pipeline_id,
                        organization: plan.repository.organization.clone(),
                        name: plan.repository.name.clone(),
                        private: plan.repository.private,
                    })
                    .await?;
                state.repository_id = Some(created.id.clone());
                Ok(item(action, created))
            }
            SetupAction::CreateJenkinsPipeline => {
                let created = self
                    .backend
                    .create_jenkins_pipeline(CreateJenkinsPipeline {
                        pipeline_id: plan.pipeline_id,
                        repository_id: ChainState::require(&state.repository_id, "repository id")?,
                        credentials_secret_path: plan.credentials.secret_path(),
                    })
                    .await?;
                state.orchestration_id = Some(created.id.clone());
                Ok(item(action, created))
            }
            SetupAction::CreateGithubActions => {
                let created = self
                    .backend
                    .create_github_actions(CreateGithubActions {
                        pipeline_id: plan.pipeline_id,
                        repository_id: ChainState::require(&state.repository_id, "repository id")?,
                        credentials_secret_path: plan.credentials.secret_path(),
                    })
                    .await?;
                state.orchestration_id = Some(created.id.clone());
                Ok(item(action, created))
            }
            SetupAction::CreatePiperConfig => {
                let created = self
                    .backend
                    .create_piper_config(CreatePiperConfig {
                        pipeline_id: plan.pipeline_id,
                        orchestration_id: ChainState::require(
                            &state.orchestration_id,
                            "orchestration id",
                        )?,
                        build_tool: plan.build_tool.as_str().to_string(),
                    })
                    .await?;
                Ok(item(action, created))
            }
        }
    }

    /// Delete created resources newest first; secrets stay
    async fn roll_back(&self, report: &mut SetupReport) {
        for created in report.created.iter().rev() {
            let Some(kind) = created.action.created_kind() else {
                continue;
            };

            match self.backend.delete_resource(kind, &created.id).await {
                Ok(()) => {
                    info!(action = created.action.label(), id = %created.id, "Rolled back");
                    report.rolled_back.push(created.clone());
                }
                Err(e) => {
                    warn!(action = created.action.label(), id = %created.id, error = %e, "Rollback failed");
                    report.rollback_errors.push((created.clone(), e.user_message()));
                }
            }
        }
    }
}

fn item(action: SetupAction, created: CreatedResource) -> CreatedItem {
    CreatedItem {
        action,
        id: created.id,
        name: created.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::domain::kind::KindOrStepKey;
    use portal_core::wizard::{BuildTool, Credentials, Orchestrator, RepositorySpec};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    /// Records every call and fails the configured one
    #[derive(Default, Clone)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<String>>>,
        fail_on: Option<&'static str>,
        fail_deletes: bool,
    }

    impl FakeBackend {
        fn failing_on(call: &'static str) -> Self {
            Self {
                fail_on: Some(call),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String, kind: Kind) -> Result<CreatedResource> {
            let name = call.split(':').next().unwrap_or_default().to_string();
            self.calls.lock().unwrap().push(call);
            if self.fail_on == Some(name.as_str()) {
                return Err(ClientError::api_error(500, format!("{name} exploded")));
            }
            Ok(CreatedResource {
                id: format!("{name}-id"),
                kind: KindOrStepKey::Kind(kind),
                name: name.clone(),
            })
        }
    }

    #[async_trait]
    impl ProvisioningBackend for FakeBackend {
        async fn write_secret(&self, path: &SecretPath, data: &BTreeMap<String, String>) -> Result<()> {
            let keys: Vec<_> = data.keys().cloned().collect();
            self.record(format!("write_secret:{path}:{}", keys.join(",")), Kind::GithubRepository)
                .map(|_| ())
        }

        async fn create_github_repository(&self, req: CreateGithubRepository) -> Result<CreatedResource> {
            self.record(
                format!("create_github_repository:{}/{}", req.organization, req.name),
                Kind::GithubRepository,
            )
        }

        async fn create_jenkins_pipeline(&self, req: CreateJenkinsPipeline) -> Result<CreatedResource> {
            self.record(
                format!(
                    "create_jenkins_pipeline:{}:{}",
                    req.repository_id, req.credentials_secret_path
                ),
                Kind::JenkinsPipeline,
            )
        }

        async fn create_github_actions(&self, req: CreateGithubActions) -> Result<CreatedResource> {
            self.record(
                format!("create_github_actions:{}", req.repository_id),
                Kind::GithubActionsWorkflow,
            )
        }

        async fn create_piper_config(&self, req: CreatePiperConfig) -> Result<CreatedResource> {
            self.record(
                format!("create_piper_config:{}:{}", req.orchestration_id, req.build_tool),
                Kind::PiperConfig,
            )
        }

        async fn delete_resource(&self, kind: Kind, id: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("delete:{}:{id}", kind.as_str()));
            if self.fail_deletes {
                return Err(ClientError::NotFound(id.to_string()));
            }
            Ok(())
        }
    }

    fn plan(credentials: CredentialSource, orchestrator: Orchestrator) -> ProvisioningPlan {
        ProvisioningPlan {
            pipeline_id: Uuid::nil(),
            credentials,
            repository: RepositorySpec {
                organization: "acme".to_string(),
                name: "shop".to_string(),
                private: true,
            },
            orchestrator,
            build_tool: BuildTool::Maven,
        }
    }

    fn new_credentials() -> CredentialSource {
        CredentialSource::New {
            path: SecretPath::parse("comp/github/shop").unwrap(),
            credentials: Credentials {
                username: "bot".to_string(),
                token: "t0ken".to_string(),
            },
        }
    }

    fn existing_credentials() -> CredentialSource {
        CredentialSource::Existing {
            path: "comp/github/legacy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_full_chain_threads_identifiers() {
        let backend = FakeBackend::default();
        let executor = SetupExecutor::new(backend.clone());

        let report = executor
            .execute(&plan(new_credentials(), Orchestrator::Jenkins))
            .await;

        assert!(report.is_success());
        assert_eq!(
            backend.calls(),
            vec![
                "write_secret:comp/github/shop:token,username",
                "create_github_repository:acme/shop",
                "create_jenkins_pipeline:create_github_repository-id:comp/github/shop",
                "create_piper_config:create_jenkins_pipeline-id:maven",
            ]
        );
        assert_eq!(report.created.len(), 4);
        assert!(report.orphaned().is_empty());
    }

    #[tokio::test]
    async fn test_existing_credentials_skip_secret_write() {
        let backend = FakeBackend::default();
        let executor = SetupExecutor::new(backend.clone());

        let report = executor
            .execute(&plan(existing_credentials(), Orchestrator::GithubActions))
            .await;

        assert!(report.is_success());
        assert_eq!(
            backend.calls(),
            vec![
                "create_github_repository:acme/shop",
                "create_github_actions:create_github_repository-id",
                "create_piper_config:create_github_actions-id:maven",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_halts_chain_and_reports_orphans() {
        let backend = FakeBackend::failing_on("create_jenkins_pipeline");
        let executor = SetupExecutor::new(backend.clone());

        let report = executor
            .execute(&plan(existing_credentials(), Orchestrator::Jenkins))
            .await;

        assert!(!report.is_success());
        let failure = report.failure.clone().unwrap();
        assert_eq!(failure.action, SetupAction::CreateJenkinsPipeline);
        assert_eq!(failure.message, "create_jenkins_pipeline exploded");

        // Piper is never attempted
        assert_eq!(backend.calls().len(), 2);
        assert!(!backend.calls().iter().any(|c| c.starts_with("create_piper_config")));

        let orphaned = report.orphaned();
        assert_eq!(orphaned.len(), 1);
        assert_eq!(orphaned[0].action, SetupAction::CreateGithubRepository);
        assert!(report.rolled_back.is_empty());
    }

    #[tokio::test]
    async fn test_rollback_deletes_in_reverse_and_keeps_secrets() {
        let backend = FakeBackend::failing_on("create_piper_config");
        let executor =
            SetupExecutor::new(backend.clone()).with_rollback(RollbackPolicy::DeleteCreated);

        let report = executor
            .execute(&plan(new_credentials(), Orchestrator::Jenkins))
            .await;

        let deletes: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("delete:"))
            .collect();
        assert_eq!(
            deletes,
            vec![
                "delete:JenkinsPipeline:create_jenkins_pipeline-id",
                "delete:GithubRepository:create_github_repository-id",
            ]
        );
        assert_eq!(report.rolled_back.len(), 2);

        // The credential secret is the only thing left behind
        let orphaned = report.orphaned();
        assert_eq!(orphaned.len(), 1);
        assert_eq!(orphaned[0].action, SetupAction::WriteCredentials);
    }

    #[tokio::test]
    async fn test_rollback_errors_are_recorded() {
        let backend = FakeBackend {
            fail_on: Some("create_github_actions"),
            fail_deletes: true,
            ..FakeBackend::default()
        };
        let executor =
            SetupExecutor::new(backend.clone()).with_rollback(RollbackPolicy::DeleteCreated);

        let report = executor
            .execute(&plan(existing_credentials(), Orchestrator::GithubActions))
            .await;

        assert!(report.rolled_back.is_empty());
        assert_eq!(report.rollback_errors.len(), 1);
        assert_eq!(
            report.rollback_errors[0].0.action,
            SetupAction::CreateGithubRepository
        );
        assert_eq!(report.orphaned().len(), 1);
    }

    #[tokio::test]
    async fn test_first_step_failure_creates_nothing() {
        let backend = FakeBackend::failing_on("write_secret");
        let executor = SetupExecutor::new(backend.clone());

        let report = executor
            .execute(&plan(new_credentials(), Orchestrator::Jenkins))
            .await;

        assert_eq!(report.failure.unwrap().action, SetupAction::WriteCredentials);
        assert!(report.created.is_empty());
        assert_eq!(backend.calls().len(), 1);
    }
}
