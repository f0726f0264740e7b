//! GitHub repository and GitHub Actions integration

use portal_core::dto::github::{CreateGithubActions, CreateGithubRepository};
use portal_core::dto::resource::CreatedResource;
use serde_json::json;
use tracing::{debug, info};

use crate::PortalClient;
use crate::error::Result;
use crate::graphql::delete_mutation;

const CREATE_GITHUB_REPOSITORY: &str = "mutation CreateGithubRepository($input: CreateGithubRepositoryInput!) { createGithubRepository(input: $input) { id kind name } }";
const DELETE_GITHUB_REPOSITORY: &str =
    delete_mutation!("DeleteGithubRepository", "deleteGithubRepository");

const CREATE_GITHUB_ACTIONS: &str = "mutation CreateGithubActions($input: CreateGithubActionsInput!) { createGithubActions(input: $input) { id kind name } }";
const DELETE_GITHUB_ACTIONS: &str = delete_mutation!("DeleteGithubActions", "deleteGithubActions");

const MOST_USED_LANGUAGE: &str = "query MostUsedLanguage($organization: String!, $repository: String) { mostUsedLanguage(organization: $organization, repository: $repository) }";

impl PortalClient {
    // =============================================================================
    // GitHub
    // =============================================================================

    /// Register a GitHub repository for a pipeline
    pub async fn create_github_repository(
        &self,
        req: CreateGithubRepository,
    ) -> Result<CreatedResource> {
        let created: CreatedResource = self
            .execute(
                "CreateGithubRepository",
                CREATE_GITHUB_REPOSITORY,
                json!({ "input": req }),
                "createGithubRepository",
            )
            .await?;

        info!(repository_id = %created.id, "GitHub repository registered");
        Ok(created)
    }

    pub async fn delete_github_repository(&self, id: &str) -> Result<()> {
        self.execute_delete(
            "DeleteGithubRepository",
            DELETE_GITHUB_REPOSITORY,
            "deleteGithubRepository",
            id,
        )
        .await
    }

    /// Create the GitHub Actions workflow of a pipeline
    pub async fn create_github_actions(&self, req: CreateGithubActions) -> Result<CreatedResource> {
        let created: CreatedResource = self
            .execute(
                "CreateGithubActions",
                CREATE_GITHUB_ACTIONS,
                json!({ "input": req }),
                "createGithubActions",
            )
            .await?;

        info!(orchestration_id = %created.id, "GitHub Actions workflow created");
        Ok(created)
    }

    pub async fn delete_github_actions(&self, id: &str) -> Result<()> {
        self.execute_delete(
            "DeleteGithubActions",
            DELETE_GITHUB_ACTIONS,
            "deleteGithubActions",
            id,
        )
        .await
    }

    /// Most-used language across an organization's repositories
    ///
    /// Narrowed to a single repository when `repository` is given. Returns
    /// `None` when the backend has no language statistics.
    pub async fn most_used_language(
        &self,
        organization: &str,
        repository: Option<&str>,
    ) -> Result<Option<String>> {
        let result = self
            .execute::<_, String>(
                "MostUsedLanguage",
                MOST_USED_LANGUAGE,
                json!({ "organization": organization, "repository": repository }),
                "mostUsedLanguage",
            )
            .await;

        match result {
            Ok(language) => Ok(Some(language)),
            Err(e) if e.is_not_found() => {
                debug!(organization, "No language statistics available");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
