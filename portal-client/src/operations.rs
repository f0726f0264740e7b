//! Administrative pipeline operations

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::PortalClient;
use crate::error::Result;

const FORCE_RECONCILIATION: &str =
    "mutation ForceReconciliation($id: ID!) { forceReconciliation(id: $id) }";
const TOGGLE_DEBUG_LABEL: &str =
    "mutation ToggleDebugLabel($id: ID!) { toggleDebugLabel(id: $id) }";

impl PortalClient {
    /// Ask the backend to reconcile every resource of a pipeline now
    ///
    /// Returns whether the backend accepted the request.
    pub async fn force_reconciliation(&self, pipeline_id: Uuid) -> Result<bool> {
        let accepted: bool = self
            .execute(
                "ForceReconciliation",
                FORCE_RECONCILIATION,
                json!({ "id": pipeline_id }),
                "forceReconciliation",
            )
            .await?;

        info!(%pipeline_id, accepted, "Reconciliation requested");
        Ok(accepted)
    }

    /// Flip the debug label of a pipeline
    ///
    /// # Returns
    /// Whether debug mode is enabled after the toggle
    pub async fn toggle_debug_label(&self, pipeline_id: Uuid) -> Result<bool> {
        let enabled: bool = self
            .execute(
                "ToggleDebugLabel",
                TOGGLE_DEBUG_LABEL,
                json!({ "id": pipeline_id }),
                "toggleDebugLabel",
            )
            .await?;

        info!(%pipeline_id, enabled, "Debug label toggled");
        Ok(enabled)
    }
}
