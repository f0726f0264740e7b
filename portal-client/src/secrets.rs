//! Secret store access
//!
//! Secrets live under `<component>/<prefix>/<name>`. Values never appear in
//! logs; only paths and key names do.

use std::collections::BTreeMap;

use portal_core::domain::secret::SecretPath;
use portal_core::dto::secret::SecretData;
use serde_json::json;
use tracing::{debug, info};

use crate::PortalClient;
use crate::error::Result;

const WRITE_SECRET: &str =
    "mutation WriteSecret($path: String!, $data: JSON!) { writeSecret(path: $path, data: $data) }";
const READ_SECRET: &str = "query Secret($path: String!) { secret(path: $path) { path data } }";
const LIST_SECRET_PATHS: &str = "query SecretPaths($componentId: ID!, $prefix: String!) { secretPaths(componentId: $componentId, prefix: $prefix) }";

impl PortalClient {
    // =============================================================================
    // Secrets
    // =============================================================================

    /// Write key/value data at `path`, replacing what was there
    pub async fn write_secret(&self, path: &SecretPath, data: &BTreeMap<String, String>) -> Result<()> {
        let _: bool = self
            .execute(
                "WriteSecret",
                WRITE_SECRET,
                json!({ "path": path.to_string(), "data": data }),
                "writeSecret",
            )
            .await?;

        info!(%path, keys = data.len(), "Secret written");
        Ok(())
    }

    pub async fn read_secret(&self, path: &SecretPath) -> Result<SecretData> {
        self.execute(
            "Secret",
            READ_SECRET,
            json!({ "path": path.to_string() }),
            "secret",
        )
        .await
    }

    /// List the full paths stored under `<component_id>/<prefix>/`
    pub async fn list_secret_paths(&self, component_id: &str, prefix: &str) -> Result<Vec<String>> {
        let paths: Vec<String> = self
            .execute(
                "SecretPaths",
                LIST_SECRET_PATHS,
                json!({ "componentId": component_id, "prefix": prefix }),
                "secretPaths",
            )
            .await?;

        debug!(component_id, prefix, count = paths.len(), "Listed secret paths");
        Ok(paths)
    }
}
