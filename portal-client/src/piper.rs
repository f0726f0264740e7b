//! Piper configuration

use portal_core::dto::piper::CreatePiperConfig;
use portal_core::dto::resource::CreatedResource;
use serde_json::json;
use tracing::info;

use crate::PortalClient;
use crate::error::Result;
use crate::graphql::delete_mutation;

const CREATE_PIPER_CONFIG: &str = "mutation CreatePiperConfig($input: CreatePiperConfigInput!) { createPiperConfig(input: $input) { id kind name } }";
const DELETE_PIPER_CONFIG: &str = delete_mutation!("DeletePiperConfig", "deletePiperConfig");

impl PortalClient {
    /// Generate the Piper configuration for an orchestrator
    ///
    /// # Arguments
    /// * `req` - Orchestrator identifier and build tool
    pub async fn create_piper_config(&self, req: CreatePiperConfig) -> Result<CreatedResource> {
        let created: CreatedResource = self
            .execute(
                "CreatePiperConfig",
                CREATE_PIPER_CONFIG,
                json!({ "input": req }),
                "createPiperConfig",
            )
            .await?;

        info!(piper_id = %created.id, build_tool = %req.build_tool, "Piper configuration created");
        Ok(created)
    }

    pub async fn delete_piper_config(&self, id: &str) -> Result<()> {
        self.execute_delete("DeletePiperConfig", DELETE_PIPER_CONFIG, "deletePiperConfig", id)
            .await
    }
}
