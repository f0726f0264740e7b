//! Pipeline lifecycle operations

use portal_core::domain::pipeline::Pipeline;
use portal_core::dto::pipeline::CreatePipeline;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::PortalClient;
use crate::error::Result;
use crate::graphql::delete_mutation;

/// Selection set shared by every pipeline query
macro_rules! pipeline_fragment {
    () => {
        "fragment PipelineFields on Pipeline {
            id
            name
            pipelineType
            createdAt
            labels
            resourceRefs { kind status error name }
            notManagedServices {
                fortify { serverUrl projectName projectVersion }
                checkmarx { serverUrl projectName team }
                whiteSource { productName projectNames }
            }
        }"
    };
}

const LIST_PIPELINES: &str = concat!(
    "query Pipelines($componentId: ID!) { pipelines(componentId: $componentId) { ...PipelineFields } }\n",
    pipeline_fragment!()
);

const GET_PIPELINE: &str = concat!(
    "query Pipeline($id: ID!) { pipeline(id: $id) { ...PipelineFields } }\n",
    pipeline_fragment!()
);

const CREATE_PIPELINE: &str = concat!(
    "mutation CreatePipeline($input: CreatePipelineInput!) { createPipeline(input: $input) { ...PipelineFields } }\n",
    pipeline_fragment!()
);

const DELETE_PIPELINE: &str = delete_mutation!("DeletePipeline", "deletePipeline");

impl PortalClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// List the pipelines of a component
    ///
    /// # Arguments
    /// * `component_id` - The component the pipelines belong to
    pub async fn list_pipelines(&self, component_id: &str) -> Result<Vec<Pipeline>> {
        self.execute(
            "Pipelines",
            LIST_PIPELINES,
            json!({ "componentId": component_id }),
            "pipelines",
        )
        .await
    }

    /// Get a pipeline by ID
    ///
    /// # Returns
    /// The pipeline, or [`crate::ClientError::NotFound`] if it does not exist
    pub async fn get_pipeline(&self, pipeline_id: Uuid) -> Result<Pipeline> {
        self.execute("Pipeline", GET_PIPELINE, json!({ "id": pipeline_id }), "pipeline")
            .await
    }

    /// Provision a new pipeline
    ///
    /// # Arguments
    /// * `req` - The pipeline creation request
    ///
    /// # Example
    /// ```no_run
    /// # use portal_client::PortalClient;
    /// # use portal_core::domain::pipeline::PipelineType;
    /// # use portal_core::dto::pipeline::CreatePipeline;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PortalClient::new("http://localhost:8080");
    /// let pipeline = client.create_pipeline(CreatePipeline {
    ///     component_id: "my-component".to_string(),
    ///     name: "main".to_string(),
    ///     pipeline_type: PipelineType::Jenkins,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_pipeline(&self, req: CreatePipeline) -> Result<Pipeline> {
        let pipeline: Pipeline = self
            .execute(
                "CreatePipeline",
                CREATE_PIPELINE,
                json!({ "input": req }),
                "createPipeline",
            )
            .await?;

        info!(pipeline_id = %pipeline.id, name = %pipeline.name, "Pipeline created");
        Ok(pipeline)
    }

    /// Delete a pipeline
    pub async fn delete_pipeline(&self, pipeline_id: Uuid) -> Result<()> {
        self.execute_delete(
            "DeletePipeline",
            DELETE_PIPELINE,
            "deletePipeline",
            &pipeline_id.to_string(),
        )
        .await?;

        info!(%pipeline_id, "Pipeline deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_include_fragment() {
        for query in [LIST_PIPELINES, GET_PIPELINE, CREATE_PIPELINE] {
            assert!(query.contains("...PipelineFields"));
            assert!(query.contains("fragment PipelineFields on Pipeline"));
            assert!(query.contains("resourceRefs { kind status error name }"));
        }
    }
}
