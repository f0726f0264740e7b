//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::PipelineType;

/// Request to provision a new pipeline for a component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipeline {
    pub component_id: String,
    pub name: String,
    pub pipeline_type: PipelineType,
}
