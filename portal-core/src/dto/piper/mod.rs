//! Piper DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to generate the Piper build configuration of an orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePiperConfig {
    pub pipeline_id: Uuid,
    /// Jenkins pipeline or GitHub Actions resource the configuration belongs to
    pub orchestration_id: String,
    pub build_tool: String,
}
