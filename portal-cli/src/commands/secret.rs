//! Secret command handlers

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use portal_core::domain::secret::SecretPath;

use super::parse_key_val;
use crate::config::Config;

#[derive(Subcommand)]
pub enum SecretCommands {
    /// Show the keys stored at a path
    Read {
        /// Path as <component>/<prefix>/<name>
        path: String,

        /// Print values instead of masking them
        #[arg(long)]
        show_values: bool,
    },
    /// Write key=value pairs to a path, replacing its content
    Write {
        /// Path as <component>/<prefix>/<name>
        path: String,

        #[arg(required = true, value_parser = parse_key_val)]
        data: Vec<(String, String)>,
    },
    /// List the secret paths under a prefix
    List {
        /// Prefix, e.g. "github"
        prefix: String,

        #[arg(short, long)]
        component: Option<String>,
    },
}

pub async fn handle_secret_command(command: SecretCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        SecretCommands::Read { path, show_values } => {
            let path = parse_path(&path)?;
            let secret = client.read_secret(&path).await?;

            println!("{}", secret.path.bold());
            for (key, value) in &secret.data {
                let shown = if show_values { value.as_str() } else { "********" };
                println!("  {}: {}", key.cyan(), shown);
            }
        }
        SecretCommands::Write { path, data } => {
            let path = parse_path(&path)?;
            let data: BTreeMap<String, String> = data.into_iter().collect();
            client.write_secret(&path, &data).await?;

            println!(
                "{}",
                format!("✓ Wrote {} key(s) to {}", data.len(), path).green().bold()
            );
        }
        SecretCommands::List { prefix, component } => {
            let component = config.component(component.as_deref())?;
            let paths = client.list_secret_paths(component, &prefix).await?;

            if paths.is_empty() {
                println!("{}", "No secrets found.".yellow());
            }
            for path in paths {
                println!("  {path}");
            }
        }
    }

    Ok(())
}

fn parse_path(input: &str) -> Result<SecretPath> {
    SecretPath::parse(input)
        .with_context(|| format!("Invalid secret path '{input}', expected <component>/<prefix>/<name>"))
}
