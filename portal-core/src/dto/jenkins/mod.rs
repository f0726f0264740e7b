//! Jenkins DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a Jenkins pipeline building a registered repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJenkinsPipeline {
    pub pipeline_id: Uuid,
    pub repository_id: String,
    pub credentials_secret_path: String,
}
