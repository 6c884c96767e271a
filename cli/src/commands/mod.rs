//! CLI command implementations

pub mod auth_link;
pub mod execute;
pub mod format;
pub mod quickstart;

pub use auth_link::auth_link_command;
pub use execute::execute_command;
pub use format::format_command;
pub use quickstart::quickstart_command;

use crate::config::CliConfigLoader;
use agent_actions_core::connect::{ConnectClient, FixtureConnectClient, HttpConnectClient};
use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;

/// Where connector calls go
pub enum ClientSource {
    /// The live service, configured by the loader
    Service(CliConfigLoader),
    /// Canned responses from a fixture file
    Fixture(PathBuf),
}

/// Build the connector client for a command
pub async fn build_client(source: ClientSource) -> Result<Box<dyn ConnectClient>> {
    match source {
        ClientSource::Fixture(path) => {
            info!("Using fixture responses from {}", path.display());
            let client = FixtureConnectClient::from_file(&path)
                .await
                .with_context(|| format!("Failed to load fixture: {}", path.display()))?;
            Ok(Box::new(client))
        }
        ClientSource::Service(loader) => {
            let config = loader.load().await?;
            info!("Connecting to {}", config.env_url);
            let client = HttpConnectClient::new(config).context("Failed to initialize client")?;
            Ok(Box::new(client))
        }
    }
}

/// Parse a `--input` JSON object
pub fn parse_tool_input(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    match serde_json::from_str(raw).context("Tool input is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("Tool input must be a JSON object, got: {}", other)),
    }
}
