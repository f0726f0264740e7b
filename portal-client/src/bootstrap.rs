//! Bootstrap context
//!
//! The viewer context is fetched once per client. Loading it must never
//! block or fail a command: a slow or broken backend yields an empty
//! context after the timeout.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::PortalClient;

/// Default upper bound for loading the bootstrap context
pub const DEFAULT_BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(10);

const VIEWER: &str = "query Viewer { viewer { userId displayName components } }";

/// Authenticated viewer and the components they can see
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapContext {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub components: Vec<String>,
}

impl BootstrapContext {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_empty() && self.components.is_empty()
    }
}

/// Fetch the viewer context, falling back to an empty one
///
/// Errors and timeouts are logged and swallowed.
pub async fn load_context(client: &PortalClient, timeout: Duration) -> BootstrapContext {
    let request = client.execute::<_, BootstrapContext>("Viewer", VIEWER, json!({}), "viewer");

    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(context)) => {
            debug!(user_id = %context.user_id, components = context.components.len(), "Bootstrap context loaded");
            context
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to load bootstrap context");
            BootstrapContext::default()
        }
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "Timed out loading bootstrap context");
            BootstrapContext::default()
        }
    }
}

impl PortalClient {
    /// Bootstrap context, loaded on first use and shared by clones
    pub async fn context(&self, timeout: Duration) -> &BootstrapContext {
        self.context
            .get_or_init(|| load_context(self, timeout))
            .await
    }
}
