//! Integration DTOs
//!
//! One create request per integration the backend can provision on a
//! pipeline besides the setup chain (repository, orchestrator, Piper).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a Cumulus pipeline storing compliance evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCumulus {
    pub pipeline_id: Uuid,
}

/// Request to onboard the pipeline to Checkmarx ONE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckmarxOne {
    pub pipeline_id: Uuid,
    pub project_name: String,
}

/// Request to create a SonarQube project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSonarQube {
    pub pipeline_id: Uuid,
    pub project_key: String,
}

/// Request to register the pipeline for Open Source Compliance scans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpenSourceCompliance {
    pub pipeline_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppms_scv: Option<String>,
}

/// Request to link a Jira project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJiraProject {
    pub pipeline_id: Uuid,
    pub project_key: String,
}

/// Request to provision staging-service credentials for artefact uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStagingServiceCredentials {
    pub pipeline_id: Uuid,
    pub secret_path: String,
}
