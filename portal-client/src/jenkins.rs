//! Jenkins pipeline integration

use portal_core::dto::jenkins::CreateJenkinsPipeline;
use portal_core::dto::resource::CreatedResource;
use serde_json::json;
use tracing::info;

use crate::PortalClient;
use crate::error::Result;
use crate::graphql::delete_mutation;

const CREATE_JENKINS_PIPELINE: &str = "mutation CreateJenkinsPipeline($input: CreateJenkinsPipelineInput!) { createJenkinsPipeline(input: $input) { id kind name } }";
const DELETE_JENKINS_PIPELINE: &str =
    delete_mutation!("DeleteJenkinsPipeline", "deleteJenkinsPipeline");

impl PortalClient {
    /// Create the Jenkins job that orchestrates a pipeline
    pub async fn create_jenkins_pipeline(
        &self,
        req: CreateJenkinsPipeline,
    ) -> Result<CreatedResource> {
        let created: CreatedResource = self
            .execute(
                "CreateJenkinsPipeline",
                CREATE_JENKINS_PIPELINE,
                json!({ "input": req }),
                "createJenkinsPipeline",
            )
            .await?;

        info!(orchestration_id = %created.id, "Jenkins pipeline created");
        Ok(created)
    }

    pub async fn delete_jenkins_pipeline(&self, id: &str) -> Result<()> {
        self.execute_delete(
            "DeleteJenkinsPipeline",
            DELETE_JENKINS_PIPELINE,
            "deleteJenkinsPipeline",
            id,
        )
        .await
    }
}
