//! Connector client trait

use super::types::{AuthorizationLink, ConnectedAccount, ToolExecution};
use crate::error::Result;
use crate::tools::ToolResult;
use async_trait::async_trait;

/// Operations offered by the connector service
#[async_trait]
pub trait ConnectClient: Send + Sync {
    /// Fetch the connected account for `identifier` on `connection_name`,
    /// creating it when it does not exist yet
    async fn get_or_create_connected_account(
        &self,
        connection_name: &str,
        identifier: &str,
    ) -> Result<ConnectedAccount>;

    /// Get the URL the user visits to authorize the connection
    async fn get_authorization_link(
        &self,
        connection_name: &str,
        identifier: &str,
    ) -> Result<AuthorizationLink>;

    /// Run a tool and return its result
    async fn execute_tool(&self, execution: ToolExecution) -> Result<ToolResult>;
}
