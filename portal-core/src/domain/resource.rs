//! Resource references attached to a pipeline

use serde::{Deserialize, Serialize};

use super::kind::{KindOrStepKey, StepKey};
use super::status::ServiceStatus;

/// One provisioned (or not yet provisioned) backend resource
///
/// The same kind may appear more than once in a pipeline, e.g. while a
/// validation tool is being replaced by another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub kind: KindOrStepKey,
    pub status: ServiceStatus,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: impl Into<KindOrStepKey>, status: ServiceStatus) -> Self {
        Self {
            kind: kind.into(),
            status,
            error: String::new(),
            name: String::new(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Configuration of tools the backend cannot manage
///
/// Each field carries the tool-specific payload the backend stores for
/// information. A tool listed here counts as present with status
/// `NOT_MANAGED`, whether or not a matching [`ResourceRef`] exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotManagedServices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fortify: Option<FortifyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkmarx: Option<CheckmarxConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_source: Option<WhiteSourceConfig>,
}

impl NotManagedServices {
    /// Step keys of all tools carried in this payload
    pub fn step_keys(&self) -> Vec<StepKey> {
        let mut keys = Vec::new();
        if self.fortify.is_some() {
            keys.push(StepKey::Fortify);
        }
        if self.checkmarx.is_some() {
            keys.push(StepKey::Checkmarx);
        }
        if self.white_source.is_some() {
            keys.push(StepKey::WhiteSource);
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.step_keys().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortifyConfig {
    pub server_url: String,
    pub project_name: String,
    #[serde(default)]
    pub project_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckmarxConfig {
    pub server_url: String,
    pub project_name: String,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteSourceConfig {
    pub product_name: String,
    #[serde(default)]
    pub project_names: Vec<String>,
}
