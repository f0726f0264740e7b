//! Resource DTOs shared by all integrations

use serde::{Deserialize, Serialize};

use crate::domain::kind::KindOrStepKey;

/// Handle returned by every create mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResource {
    pub id: String,
    pub kind: KindOrStepKey,
    #[serde(default)]
    pub name: String,
}
