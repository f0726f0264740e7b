//! Service status reported for each resource reference

use serde::{Deserialize, Serialize};

/// Provisioning status of a resource attached to a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    /// Resource exists and is reconciled by the backend
    Created,

    /// Resource is recorded but the backend does not manage it
    NotManaged,

    /// Backend accepted the resource and is still provisioning it
    PendingCreation,

    /// Backend failed to provision the resource
    FailingCreation,

    /// Resource was expected but could not be found
    NotFound,

    /// Anything the backend reports that the portal does not recognise
    #[serde(other)]
    Unknown,
}

impl ServiceStatus {
    pub fn is_not_managed(self) -> bool {
        matches!(self, ServiceStatus::NotManaged)
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Created => write!(f, "Created"),
            ServiceStatus::NotManaged => write!(f, "Not Managed"),
            ServiceStatus::PendingCreation => write!(f, "Pending Creation"),
            ServiceStatus::FailingCreation => write!(f, "Failing Creation"),
            ServiceStatus::NotFound => write!(f, "Not Found"),
            ServiceStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let status: ServiceStatus = serde_json::from_str("\"PENDING_CREATION\"").unwrap();
        assert_eq!(status, ServiceStatus::PendingCreation);
        assert_eq!(
            serde_json::to_string(&ServiceStatus::NotManaged).unwrap(),
            "\"NOT_MANAGED\""
        );
    }

    #[test]
    fn test_unrecognised_status_is_unknown() {
        let status: ServiceStatus = serde_json::from_str("\"DELETING\"").unwrap();
        assert_eq!(status, ServiceStatus::Unknown);
    }
}
