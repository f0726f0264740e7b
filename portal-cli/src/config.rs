//! Configuration module
//!
//! Handles CLI configuration: backend connection, component scope and the
//! timeouts used by long-running commands.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use portal_client::PortalClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend
    pub api_url: String,
    /// Bearer token, if the backend requires one
    pub token: Option<String>,
    /// Default component for commands that need one
    pub component_id: Option<String>,
    pub request_timeout: Duration,
    pub bootstrap_timeout: Duration,
    pub watch_interval: Duration,
}

impl Config {
    /// Check the values clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!("API URL must start with http:// or https://, got '{}'", self.api_url);
        }
        for (name, value) in [
            ("request timeout", self.request_timeout),
            ("bootstrap timeout", self.bootstrap_timeout),
            ("watch interval", self.watch_interval),
        ] {
            if value.is_zero() {
                bail!("{name} must be greater than zero");
            }
        }
        Ok(())
    }

    /// Component to operate on, preferring an explicit argument
    pub fn component<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .or(self.component_id.as_deref())
            .context("No component given; pass --component or set PORTAL_COMPONENT_ID")
    }

    /// Build a client honouring the request timeout and token
    pub fn client(&self) -> Result<PortalClient> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let client = PortalClient::with_client(&self.api_url, http);
        Ok(match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }
}
