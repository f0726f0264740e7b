//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::resource::{NotManagedServices, ResourceRef};
use crate::aggregation::CategoryAggregator;

/// Label that makes the backend log reconciliation details for a pipeline
pub const DEBUG_LABEL: &str = "portal.hyperspace/debug";

/// Label carrying the PPMS software component version of the component
pub const PPMS_SCV_LABEL: &str = "portal.hyperspace/ppms-scv";

/// Pipeline aggregate as reported by the backend
///
/// Created server-side when a pipeline is provisioned. The portal only
/// observes it through queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    pub pipeline_type: PipelineType,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub resource_refs: Vec<ResourceRef>,
    #[serde(default)]
    pub not_managed_services: Option<NotManagedServices>,
}

impl Pipeline {
    pub fn is_debug_enabled(&self) -> bool {
        self.labels
            .get(DEBUG_LABEL)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// PPMS SCV identifier, if one was supplied for this pipeline's component
    pub fn ppms_scv(&self) -> Option<&str> {
        self.labels
            .get(PPMS_SCV_LABEL)
            .map(String::as_str)
            .filter(|scv| !scv.trim().is_empty())
    }

    /// Category aggregator over this pipeline's resources
    ///
    /// The PPMS SCV check reads [`PPMS_SCV_LABEL`].
    pub fn aggregator(&self) -> CategoryAggregator<'_> {
        CategoryAggregator::new(&self.resource_refs)
            .with_not_managed_services(self.not_managed_services.as_ref())
            .with_ppms_scv_check(move || self.ppms_scv().is_some())
    }
}

/// Kind of pipeline the backend provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineType {
    Jenkins,
    GithubActions,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for PipelineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineType::Jenkins => write!(f, "Jenkins"),
            PipelineType::GithubActions => write!(f, "GitHub Actions"),
            PipelineType::Other => write!(f, "Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kind::Kind;
    use crate::domain::status::ServiceStatus;

    fn pipeline(labels: &[(&str, &str)]) -> Pipeline {
        Pipeline {
            id: Uuid::new_v4(),
            name: "main".to_string(),
            pipeline_type: PipelineType::Jenkins,
            created_at: chrono::Utc::now(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            resource_refs: vec![ResourceRef::new(
                Kind::GithubRepository,
                ServiceStatus::Created,
            )],
            not_managed_services: None,
        }
    }

    #[test]
    fn test_debug_label() {
        assert!(!pipeline(&[]).is_debug_enabled());
        assert!(pipeline(&[(DEBUG_LABEL, "true")]).is_debug_enabled());
        assert!(!pipeline(&[(DEBUG_LABEL, "false")]).is_debug_enabled());
    }

    #[test]
    fn test_blank_scv_is_not_provided() {
        assert_eq!(pipeline(&[(PPMS_SCV_LABEL, "  ")]).ppms_scv(), None);
        assert_eq!(
            pipeline(&[(PPMS_SCV_LABEL, "SCV-1234")]).ppms_scv(),
            Some("SCV-1234")
        );
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": "5f0c7c8e-6d4f-4a57-9d38-1d8f0a3c2b11",
            "name": "main",
            "pipelineType": "GITHUB_ACTIONS",
            "createdAt": "2026-03-01T10:00:00Z",
            "resourceRefs": [
                { "kind": "GithubRepository", "status": "CREATED", "name": "app" },
                { "kind": "Fortify", "status": "NOT_MANAGED" }
            ]
        }"#;
        let pipeline: Pipeline = serde_json::from_str(json).unwrap();

        assert_eq!(pipeline.pipeline_type, PipelineType::GithubActions);
        assert_eq!(pipeline.resource_refs.len(), 2);
        assert!(pipeline.labels.is_empty());
        assert!(pipeline.not_managed_services.is_none());
    }
}
