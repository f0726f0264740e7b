//! Portal GraphQL Client
//!
//! A type-safe client for the pipeline backend's GraphQL API.
//!
//! This crate is the service layer of the portal: one module per backend
//! resource kind, each a thin wrapper around a query or mutation. It also
//! hosts the secret store access, the best-effort bootstrap context and the
//! executor that runs the setup wizard's provisioning plan.
//!
//! # Example
//!
//! ```no_run
//! use portal_client::PortalClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PortalClient::new("http://localhost:8080").with_token("token");
//!
//!     for pipeline in client.list_pipelines("my-component").await? {
//!         println!("{} ({})", pipeline.name, pipeline.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod error;
mod github;
mod graphql;
mod integrations;
mod jenkins;
mod operations;
mod pipelines;
mod piper;
mod secrets;
pub mod setup;

// Re-export commonly used types
pub use bootstrap::{BootstrapContext, DEFAULT_BOOTSTRAP_TIMEOUT};
pub use error::{ClientError, Result};
pub use graphql::GraphQlError;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Client for the portal's GraphQL API
///
/// Cloning is cheap and clones share the cached bootstrap context.
#[derive(Debug, Clone)]
pub struct PortalClient {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token sent with every request
    token: Option<String>,
    /// Bootstrap context, loaded at most once
    context: Arc<OnceCell<BootstrapContext>>,
}

impl PortalClient {
    /// Create a new portal client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use portal_client::PortalClient;
    ///
    /// let client = PortalClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new portal client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use portal_client::PortalClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PortalClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
            context: Arc::new(OnceCell::new()),
        }
    }

    /// Send `token` as bearer authorization with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint all GraphQL operations are posted to
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an HTTP response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
