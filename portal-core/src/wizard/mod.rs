//! Setup wizard
//!
//! The wizard that provisions a repository, an orchestrator and its Piper
//! configuration, modelled as an explicit ordered list of steps. Each step
//! carries a visibility precondition over the entered answers and the
//! asynchronously fetched [`WizardContext`], plus a completeness check.
//! Rendering is left to the caller; this module only decides which step
//! comes next and what the finished answers provision.

mod error;
mod plan;
mod step;

pub use error::WizardError;
pub use plan::{CredentialSource, ProvisioningPlan, SetupAction};
pub use step::{
    BuildTool, CredentialType, Credentials, Orchestrator, RepositorySpec, WizardAnswers,
    WizardContext, WizardStep,
};

use uuid::Uuid;

use crate::domain::secret::SecretPath;

/// Secret prefix under which wizard credentials are stored
pub const CREDENTIALS_PREFIX: &str = "github";

const MAX_NAME_LENGTH: usize = 100;

/// Drives the step sequence of the setup wizard
#[derive(Debug, Clone, Default)]
pub struct SetupWizard {
    context: WizardContext,
}

impl SetupWizard {
    pub fn new(context: WizardContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    /// Credential type in effect: implicitly NEW when nothing is stored yet
    pub fn effective_credential_type(&self, answers: &WizardAnswers) -> Option<CredentialType> {
        if self.context.existing_secret_paths.is_empty() {
            Some(CredentialType::New)
        } else {
            answers.credential_type
        }
    }

    /// Build tool in effect: the answer, or the one inferred from the language
    pub fn effective_build_tool(&self, answers: &WizardAnswers) -> Option<BuildTool> {
        answers
            .build_tool
            .or_else(|| self.context.inferred_build_tool())
    }

    pub fn is_visible(&self, step: WizardStep, answers: &WizardAnswers) -> bool {
        match step {
            WizardStep::Repository | WizardStep::Orchestrator | WizardStep::Review => true,
            WizardStep::CredentialType => !self.context.existing_secret_paths.is_empty(),
            WizardStep::NewCredentials => {
                self.effective_credential_type(answers) == Some(CredentialType::New)
            }
            WizardStep::ExistingCredentials => {
                self.effective_credential_type(answers) == Some(CredentialType::Existing)
            }
            WizardStep::BuildTool => self.context.inferred_build_tool().is_none(),
        }
    }

    /// Steps shown for the current answers, in flow order
    pub fn visible_steps(&self, answers: &WizardAnswers) -> Vec<WizardStep> {
        WizardStep::ORDER
            .into_iter()
            .filter(|step| self.is_visible(*step, answers))
            .collect()
    }

    /// Check the answer of a single step
    pub fn check_step(&self, step: WizardStep, answers: &WizardAnswers) -> Result<(), WizardError> {
        match step {
            WizardStep::Repository => {
                let repository = answers
                    .repository
                    .as_ref()
                    .ok_or(WizardError::Incomplete(step))?;
                validate_github_name("organization", &repository.organization)?;
                validate_github_name("repository name", &repository.name)
            }
            WizardStep::Orchestrator => answers
                .orchestrator
                .map(|_| ())
                .ok_or(WizardError::Incomplete(step)),
            WizardStep::CredentialType => answers
                .credential_type
                .map(|_| ())
                .ok_or(WizardError::Incomplete(step)),
            WizardStep::NewCredentials => {
                let credentials = answers
                    .new_credentials
                    .as_ref()
                    .ok_or(WizardError::Incomplete(step))?;
                if credentials.username.trim().is_empty() {
                    return Err(WizardError::invalid("username", "cannot be empty"));
                }
                if credentials.token.trim().is_empty() {
                    return Err(WizardError::invalid("token", "cannot be empty"));
                }
                Ok(())
            }
            WizardStep::ExistingCredentials => {
                let path = answers
                    .existing_secret_path
                    .as_ref()
                    .ok_or(WizardError::Incomplete(step))?;
                if !self.context.existing_secret_paths.contains(path) {
                    return Err(WizardError::invalid(
                        "secret path",
                        format!("'{path}' is not a stored credential"),
                    ));
                }
                Ok(())
            }
            WizardStep::BuildTool => answers
                .build_tool
                .map(|_| ())
                .ok_or(WizardError::Incomplete(step)),
            WizardStep::Review => {
                if answers.confirmed {
                    Ok(())
                } else {
                    Err(WizardError::Incomplete(step))
                }
            }
        }
    }

    /// Step after `current`, once `current` is answered
    ///
    /// Returns `Ok(None)` after the review step.
    pub fn next_step(
        &self,
        current: WizardStep,
        answers: &WizardAnswers,
    ) -> Result<Option<WizardStep>, WizardError> {
        if !self.is_visible(current, answers) {
            return Err(WizardError::StepNotVisible(current));
        }
        self.check_step(current, answers)?;

        Ok(self
            .visible_steps(answers)
            .into_iter()
            .skip_while(|step| *step != current)
            .nth(1))
    }

    /// Step before `current`, `None` on the first step
    pub fn previous_step(&self, current: WizardStep, answers: &WizardAnswers) -> Option<WizardStep> {
        self.visible_steps(answers)
            .into_iter()
            .take_while(|step| *step != current)
            .last()
    }

    /// Check every visible step, reporting the first problem
    pub fn validate(&self, answers: &WizardAnswers) -> Result<(), WizardError> {
        self.visible_steps(answers)
            .into_iter()
            .try_for_each(|step| self.check_step(step, answers))
    }

    /// Turn complete answers into the provisioning plan for `pipeline_id`
    ///
    /// New credentials are stored at `<component>/github/<repository>`.
    pub fn plan(
        &self,
        answers: &WizardAnswers,
        pipeline_id: Uuid,
        component_id: &str,
    ) -> Result<ProvisioningPlan, WizardError> {
        self.validate(answers)?;

        let repository = answers
            .repository
            .clone()
            .ok_or(WizardError::Incomplete(WizardStep::Repository))?;
        let orchestrator = answers
            .orchestrator
            .ok_or(WizardError::Incomplete(WizardStep::Orchestrator))?;
        let build_tool = self
            .effective_build_tool(answers)
            .ok_or(WizardError::Incomplete(WizardStep::BuildTool))?;

        let credentials = match self.effective_credential_type(answers) {
            Some(CredentialType::New) => CredentialSource::New {
                path: SecretPath::new(component_id, CREDENTIALS_PREFIX, &repository.name),
                credentials: answers
                    .new_credentials
                    .clone()
                    .ok_or(WizardError::Incomplete(WizardStep::NewCredentials))?,
            },
            Some(CredentialType::Existing) => CredentialSource::Existing {
                path: answers
                    .existing_secret_path
                    .clone()
                    .ok_or(WizardError::Incomplete(WizardStep::ExistingCredentials))?,
            },
            None => return Err(WizardError::Incomplete(WizardStep::CredentialType)),
        };

        Ok(ProvisioningPlan {
            pipeline_id,
            credentials,
            repository,
            orchestrator,
            build_tool,
        })
    }
}

fn validate_github_name(field: &'static str, value: &str) -> Result<(), WizardError> {
    if value.is_empty() {
        return Err(WizardError::invalid(field, "cannot be empty"));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(WizardError::invalid(
            field,
            format!("is too long (max {MAX_NAME_LENGTH} characters)"),
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(WizardError::invalid(
            field,
            "may only contain letters, digits, '-', '_' and '.'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(paths: &[&str], language: Option<&str>) -> WizardContext {
        WizardContext {
            existing_secret_paths: paths.iter().map(|p| p.to_string()).collect(),
            most_used_language: language.map(str::to_string),
        }
    }

    fn complete_answers() -> WizardAnswers {
        WizardAnswers {
            repository: Some(RepositorySpec {
                organization: "acme".to_string(),
                name: "payments".to_string(),
                private: true,
            }),
            orchestrator: Some(Orchestrator::Jenkins),
            credential_type: None,
            new_credentials: Some(Credentials {
                username: "bot".to_string(),
                token: "token".to_string(),
            }),
            existing_secret_path: None,
            build_tool: None,
            confirmed: true,
        }
    }

    #[test]
    fn test_no_stored_secrets_skips_credential_type() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        assert_eq!(
            wizard.visible_steps(&WizardAnswers::default()),
            vec![
                WizardStep::Repository,
                WizardStep::Orchestrator,
                WizardStep::NewCredentials,
                WizardStep::Review,
            ]
        );
    }

    #[test]
    fn test_credential_type_branches() {
        let wizard = SetupWizard::new(context(&["comp/github/old"], Some("Go")));
        let mut answers = WizardAnswers::default();

        let steps = wizard.visible_steps(&answers);
        assert!(steps.contains(&WizardStep::CredentialType));
        assert!(!steps.contains(&WizardStep::NewCredentials));
        assert!(!steps.contains(&WizardStep::ExistingCredentials));

        answers.credential_type = Some(CredentialType::Existing);
        let steps = wizard.visible_steps(&answers);
        assert!(steps.contains(&WizardStep::ExistingCredentials));
        assert!(!steps.contains(&WizardStep::NewCredentials));

        answers.credential_type = Some(CredentialType::New);
        let steps = wizard.visible_steps(&answers);
        assert!(steps.contains(&WizardStep::NewCredentials));
        assert!(!steps.contains(&WizardStep::ExistingCredentials));
    }

    #[test]
    fn test_unknown_language_shows_build_tool() {
        let wizard = SetupWizard::new(context(&[], Some("COBOL")));
        assert!(
            wizard
                .visible_steps(&WizardAnswers::default())
                .contains(&WizardStep::BuildTool)
        );

        let wizard = SetupWizard::new(context(&[], None));
        assert!(
            wizard
                .visible_steps(&WizardAnswers::default())
                .contains(&WizardStep::BuildTool)
        );
    }

    #[test]
    fn test_next_step_requires_answer() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        let answers = WizardAnswers::default();

        assert_eq!(
            wizard.next_step(WizardStep::Repository, &answers),
            Err(WizardError::Incomplete(WizardStep::Repository))
        );
    }

    #[test]
    fn test_navigation_skips_hidden_steps() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        let answers = complete_answers();

        assert_eq!(
            wizard.next_step(WizardStep::Orchestrator, &answers),
            Ok(Some(WizardStep::NewCredentials))
        );
        assert_eq!(
            wizard.next_step(WizardStep::NewCredentials, &answers),
            Ok(Some(WizardStep::Review))
        );
        assert_eq!(wizard.next_step(WizardStep::Review, &answers), Ok(None));
        assert_eq!(
            wizard.previous_step(WizardStep::Review, &answers),
            Some(WizardStep::NewCredentials)
        );
        assert_eq!(wizard.previous_step(WizardStep::Repository, &answers), None);
        assert_eq!(
            wizard.next_step(WizardStep::BuildTool, &answers),
            Err(WizardError::StepNotVisible(WizardStep::BuildTool))
        );
    }

    #[test]
    fn test_invalid_repository_name() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        let mut answers = complete_answers();
        answers.repository.as_mut().unwrap().name = "my repo".to_string();

        assert!(matches!(
            wizard.validate(&answers),
            Err(WizardError::InvalidAnswer {
                field: "repository name",
                ..
            })
        ));
    }

    #[test]
    fn test_existing_path_must_be_stored() {
        let wizard = SetupWizard::new(context(&["comp/github/old"], Some("Java")));
        let mut answers = complete_answers();
        answers.credential_type = Some(CredentialType::Existing);
        answers.existing_secret_path = Some("comp/github/other".to_string());

        assert!(matches!(
            wizard.validate(&answers),
            Err(WizardError::InvalidAnswer { field: "secret path", .. })
        ));
    }

    #[test]
    fn test_plan_with_new_credentials() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        let pipeline_id = Uuid::new_v4();
        let plan = wizard.plan(&complete_answers(), pipeline_id, "comp-1").unwrap();

        assert_eq!(plan.build_tool, BuildTool::Maven);
        assert_eq!(plan.credentials.secret_path(), "comp-1/github/payments");
        assert_eq!(
            plan.actions(),
            vec![
                SetupAction::WriteCredentials,
                SetupAction::CreateGithubRepository,
                SetupAction::CreateJenkinsPipeline,
                SetupAction::CreatePiperConfig,
            ]
        );
    }

    #[test]
    fn test_plan_with_existing_credentials() {
        let wizard = SetupWizard::new(context(&["comp-1/github/shared"], None));
        let mut answers = complete_answers();
        answers.orchestrator = Some(Orchestrator::GithubActions);
        answers.credential_type = Some(CredentialType::Existing);
        answers.existing_secret_path = Some("comp-1/github/shared".to_string());
        answers.build_tool = Some(BuildTool::Docker);

        let plan = wizard.plan(&answers, Uuid::new_v4(), "comp-1").unwrap();

        assert_eq!(
            plan.credentials,
            CredentialSource::Existing {
                path: "comp-1/github/shared".to_string()
            }
        );
        assert_eq!(
            plan.actions(),
            vec![
                SetupAction::CreateGithubRepository,
                SetupAction::CreateGithubActions,
                SetupAction::CreatePiperConfig,
            ]
        );
    }

    #[test]
    fn test_plan_requires_confirmation() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        let mut answers = complete_answers();
        answers.confirmed = false;

        assert_eq!(
            wizard.plan(&answers, Uuid::new_v4(), "comp-1"),
            Err(WizardError::Incomplete(WizardStep::Review))
        );
    }

    #[test]
    fn test_action_dependencies_precede_actions() {
        let wizard = SetupWizard::new(context(&[], Some("Java")));
        let actions = wizard
            .plan(&complete_answers(), Uuid::new_v4(), "comp-1")
            .unwrap()
            .actions();

        for (index, action) in actions.iter().enumerate() {
            let requires = action.requires();
            if !requires.is_empty() {
                assert!(actions[..index].iter().any(|a| requires.contains(a)));
            }
        }
    }
}
