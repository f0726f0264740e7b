//! GitHub DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register (and create, if missing) a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGithubRepository {
    pub pipeline_id: Uuid,
    pub organization: String,
    pub name: String,
    pub private: bool,
}

/// Request to set up GitHub Actions workflows for a registered repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGithubActions {
    pub pipeline_id: Uuid,
    pub repository_id: String,
    pub credentials_secret_path: String,
}
