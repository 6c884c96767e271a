//! Offline connector client replaying canned responses
//!
//! Useful for demos and tests without credentials. Accounts requested but not
//! listed are created in a pending state; issuing an authorization link can
//! mark the account active so a consent round trip can be rehearsed.

use super::client::ConnectClient;
use super::types::{AccountStatus, AuthorizationLink, ConnectedAccount, ToolExecution};
use crate::error::{ConnectError, Result};
use crate::tools::ToolResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

/// Status given to accounts created by the fixture client
pub const PENDING_STATUS: &str = "PENDING_AUTH";

/// Canned connector responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectFixture {
    /// Accounts known up front
    #[serde(default)]
    pub accounts: Vec<ConnectedAccount>,

    /// Authorization link per connection name
    #[serde(default)]
    pub links: HashMap<String, String>,

    /// Result per tool name
    #[serde(default)]
    pub results: HashMap<String, ToolResult>,

    /// Activate the account once its authorization link was handed out
    #[serde(default)]
    pub activate_on_link: bool,
}

impl ConnectFixture {
    /// Load a fixture from a JSON file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Connector client backed by a [`ConnectFixture`]
pub struct FixtureConnectClient {
    accounts: Mutex<Vec<ConnectedAccount>>,
    links: HashMap<String, String>,
    results: HashMap<String, ToolResult>,
    activate_on_link: bool,
}

impl FixtureConnectClient {
    pub fn new(fixture: ConnectFixture) -> Self {
        Self {
            accounts: Mutex::new(fixture.accounts),
            links: fixture.links,
            results: fixture.results,
            activate_on_link: fixture.activate_on_link,
        }
    }

    /// Load the fixture file and build a client from it
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(ConnectFixture::load(path).await?))
    }

    /// Snapshot of the accounts currently known to the client
    pub async fn accounts(&self) -> Vec<ConnectedAccount> {
        self.accounts.lock().await.clone()
    }
}

#[async_trait]
impl ConnectClient for FixtureConnectClient {
    async fn get_or_create_connected_account(
        &self,
        connection_name: &str,
        identifier: &str,
    ) -> Result<ConnectedAccount> {
        let mut accounts = self.accounts.lock().await;

        if let Some(account) = accounts
            .iter()
            .find(|a| a.connection_name == connection_name && a.identifier == identifier)
        {
            return Ok(account.clone());
        }

        let account = ConnectedAccount {
            id: format!("ca_{}_{}", connection_name, identifier),
            connection_name: connection_name.to_string(),
            identifier: identifier.to_string(),
            status: AccountStatus::Other(PENDING_STATUS.to_string()),
        };
        debug!("Created fixture account {}", account.id);
        accounts.push(account.clone());
        Ok(account)
    }

    async fn get_authorization_link(
        &self,
        connection_name: &str,
        identifier: &str,
    ) -> Result<AuthorizationLink> {
        let link = self
            .links
            .get(connection_name)
            .cloned()
            .ok_or_else(|| ConnectError::AccountNotFound {
                connection_name: connection_name.to_string(),
                identifier: identifier.to_string(),
            })?;

        if self.activate_on_link {
            let mut accounts = self.accounts.lock().await;
            for account in accounts
                .iter_mut()
                .filter(|a| a.connection_name == connection_name && a.identifier == identifier)
            {
                account.status = AccountStatus::Active;
            }
        }

        Ok(AuthorizationLink { link })
    }

    async fn execute_tool(&self, execution: ToolExecution) -> Result<ToolResult> {
        execution.validate()?;

        self.results
            .get(&execution.tool_name)
            .cloned()
            .ok_or_else(|| {
                ConnectError::ToolNotFound {
                    name: execution.tool_name.clone(),
                }
                .into()
            })
    }
}
