//! Compliance and scanning integrations
//!
//! Every integration follows the same shape: a `create<Name>(input)` mutation
//! returning the created resource and a `delete<Name>(id)` mutation returning
//! a boolean.

use portal_core::domain::kind::Kind;
use portal_core::dto::integration::{
    CreateCheckmarxOne, CreateCumulus, CreateJiraProject, CreateOpenSourceCompliance,
    CreateSonarQube, CreateStagingServiceCredentials,
};
use portal_core::dto::resource::CreatedResource;
use serde_json::json;
use tracing::info;

use crate::PortalClient;
use crate::error::Result;
use crate::graphql::delete_mutation;

/// Generates the create/delete pair of one integration
macro_rules! integration {
    (
        $(#[$doc:meta])*
        $create_fn:ident, $delete_fn:ident, $input:ty,
        $create_op:literal, $create_field:literal,
        $delete_op:literal, $delete_field:literal
    ) => {
        impl PortalClient {
            $(#[$doc])*
            pub async fn $create_fn(&self, req: $input) -> Result<CreatedResource> {
                const QUERY: &str = concat!(
                    "mutation ",
                    $create_op,
                    "($input: ",
                    $create_op,
                    "Input!) { ",
                    $create_field,
                    "(input: $input) { id kind name } }"
                );

                let created: CreatedResource = self
                    .execute($create_op, QUERY, json!({ "input": req }), $create_field)
                    .await?;

                info!(id = %created.id, kind = %created.kind, "Integration created");
                Ok(created)
            }

            pub async fn $delete_fn(&self, id: &str) -> Result<()> {
                self.execute_delete(
                    $delete_op,
                    delete_mutation!($delete_op, $delete_field),
                    $delete_field,
                    id,
                )
                .await?;

                info!(id, operation = $delete_op, "Integration deleted");
                Ok(())
            }
        }
    };
}

integration!(
    /// Attach a Cumulus compliance pipeline
    create_cumulus, delete_cumulus, CreateCumulus,
    "CreateCumulus", "createCumulus",
    "DeleteCumulus", "deleteCumulus"
);

integration!(
    /// Create a Checkmarx ONE scan project
    create_checkmarx_one, delete_checkmarx_one, CreateCheckmarxOne,
    "CreateCheckmarxOne", "createCheckmarxOne",
    "DeleteCheckmarxOne", "deleteCheckmarxOne"
);

integration!(
    /// Create a SonarQube project
    create_sonar_qube, delete_sonar_qube, CreateSonarQube,
    "CreateSonarQube", "createSonarQube",
    "DeleteSonarQube", "deleteSonarQube"
);

integration!(
    /// Enable open source compliance scanning
    ///
    /// The PPMS software component version is optional here but the
    /// category is reported as not compliant until one is set.
    create_open_source_compliance, delete_open_source_compliance, CreateOpenSourceCompliance,
    "CreateOpenSourceCompliance", "createOpenSourceCompliance",
    "DeleteOpenSourceCompliance", "deleteOpenSourceCompliance"
);

integration!(
    /// Link a Jira project
    create_jira_project, delete_jira_project, CreateJiraProject,
    "CreateJiraProject", "createJiraProject",
    "DeleteJiraProject", "deleteJiraProject"
);

integration!(
    /// Register staging-service credentials stored at a secret path
    create_staging_service_credentials, delete_staging_service_credentials,
    CreateStagingServiceCredentials,
    "CreateStagingServiceCredentials", "createStagingServiceCredentials",
    "DeleteStagingServiceCredentials", "deleteStagingServiceCredentials"
);

impl PortalClient {
    /// Delete any backend-managed resource by kind
    ///
    /// GitHub Advanced Security is enabled on the repository and has no
    /// delete mutation of its own.
    pub async fn delete_resource(&self, kind: Kind, id: &str) -> Result<()> {
        match kind {
            Kind::GithubRepository => self.delete_github_repository(id).await,
            Kind::JenkinsPipeline => self.delete_jenkins_pipeline(id).await,
            Kind::GithubActionsWorkflow => self.delete_github_actions(id).await,
            Kind::PiperConfig => self.delete_piper_config(id).await,
            Kind::CumulusPipeline => self.delete_cumulus(id).await,
            Kind::CheckmarxOneScan => self.delete_checkmarx_one(id).await,
            Kind::SonarQubeProject => self.delete_sonar_qube(id).await,
            Kind::OpenSourceComplianceScan => self.delete_open_source_compliance(id).await,
            Kind::JiraProject => self.delete_jira_project(id).await,
            Kind::StagingServiceCredential => self.delete_staging_service_credentials(id).await,
            Kind::GithubAdvancedSecurity => Err(crate::ClientError::InvalidRequest(format!(
                "{} cannot be deleted on its own",
                kind.as_str()
            ))),
        }
    }
}
