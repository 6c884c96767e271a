//! Connected account and tool execution types

use crate::error::{ConnectError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Authorization state of a connected account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    /// The user granted access; tools can run
    Active,
    /// Any other status reported by the service, kept verbatim
    Other(String),
}

impl AccountStatus {
    /// Get the status as reported by the service
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Other(status) => status,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl From<String> for AccountStatus {
    fn from(status: String) -> Self {
        if status == "ACTIVE" {
            AccountStatus::Active
        } else {
            AccountStatus::Other(status)
        }
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's OAuth grant to a third-party connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedAccount {
    /// Connected account id
    pub id: String,
    /// Connection name (e.g. `gmail`)
    pub connection_name: String,
    /// End-user identifier the grant belongs to
    pub identifier: String,
    /// Authorization status
    pub status: AccountStatus,
}

impl ConnectedAccount {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// URL the user visits to authorize a connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationLink {
    pub link: String,
}

/// A request to run a remote tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecution {
    /// Name of the tool to run
    pub tool_name: String,

    /// End-user identifier to run the tool for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Connected account to run the tool against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_account_id: Option<String>,

    /// Tool input parameters
    #[serde(default)]
    pub tool_input: Map<String, Value>,
}

impl ToolExecution {
    /// Create a new execution request without a target
    pub fn new<S: Into<String>>(tool_name: S) -> Self {
        Self {
            tool_name: tool_name.into(),
            identifier: None,
            connected_account_id: None,
            tool_input: Map::new(),
        }
    }

    /// Run for an end-user identifier
    pub fn for_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Run against a connected account
    pub fn for_account<S: Into<String>>(mut self, connected_account_id: S) -> Self {
        self.connected_account_id = Some(connected_account_id.into());
        self
    }

    /// Set the tool input
    pub fn with_input(mut self, tool_input: Map<String, Value>) -> Self {
        self.tool_input = tool_input;
        self
    }

    /// Ensure the request names who the tool runs for
    pub fn validate(&self) -> Result<()> {
        if self.identifier.is_none() && self.connected_account_id.is_none() {
            return Err(ConnectError::MissingTarget {
                name: self.tool_name.clone(),
            }
            .into());
        }
        Ok(())
    }
}
