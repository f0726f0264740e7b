//! ID resolver module
//!
//! Handles resolution of pipeline ID prefixes to full UUIDs by listing the
//! component's pipelines. This allows users to specify short, unambiguous
//! prefixes instead of full UUIDs.

use anyhow::{Context, Result, anyhow};
use portal_client::PortalClient;
use portal_core::domain::pipeline::Pipeline;
use uuid::Uuid;

use crate::types::IdOrPrefix;

/// Resolve a pipeline ID or prefix to a full UUID
///
/// A full UUID is returned immediately without a request; prefixes need a
/// component to search in.
///
/// # Errors
/// Returns an error if:
/// - No component is configured for a prefix
/// - No pipeline matches the prefix
/// - Multiple pipelines match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_pipeline_id(
    client: &PortalClient,
    component_id: Option<&str>,
    id_or_prefix: &IdOrPrefix,
) -> Result<Uuid> {
    if let Some(uuid) = id_or_prefix.as_uuid() {
        return Ok(uuid);
    }

    let component_id = component_id.with_context(|| {
        format!("'{id_or_prefix}' is not a full pipeline ID; pass --component to resolve prefixes")
    })?;

    let pipelines = client
        .list_pipelines(component_id)
        .await
        .context("Failed to fetch pipelines for ID resolution")?;

    match_pipeline(&pipelines, id_or_prefix)
}

fn match_pipeline(pipelines: &[Pipeline], id_or_prefix: &IdOrPrefix) -> Result<Uuid> {
    let matches: Vec<_> = pipelines
        .iter()
        .filter(|p| id_or_prefix.matches(p.id))
        .collect();

    match matches.as_slice() {
        [] => Err(anyhow!(
            "No pipeline found with ID starting with '{}'",
            id_or_prefix
        )),
        [pipeline] => Ok(pipeline.id),
        _ => {
            let ids: Vec<String> = matches.iter().map(|p| p.id.to_string()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple pipelines: {}",
                id_or_prefix,
                ids.join(", ")
            ))
        }
    }
}
