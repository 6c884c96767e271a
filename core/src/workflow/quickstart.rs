//! Quickstart workflow
//!
//! 1. Get or create the connected account for a user.
//! 2. If it is not active, hand out the authorization link, wait for the user
//!    and fetch the account again.
//! 3. If it is active, run the tool.

use super::prompt::AuthorizationPrompt;
use crate::connect::{ConnectClient, ConnectedAccount, ToolExecution};
use crate::error::{Error, Result};
use crate::output::{WorkflowEvent, WorkflowOutput};
use crate::tools::ToolResult;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

/// What the quickstart should do
#[derive(Debug, Clone)]
pub struct QuickstartOptions {
    /// Connection to use (e.g. `gmail`)
    pub connection_name: String,
    /// End-user identifier
    pub identifier: String,
    /// Tool to run once the account is active
    pub tool_name: String,
    /// Tool input parameters
    pub tool_input: Map<String, Value>,
}

impl Default for QuickstartOptions {
    /// Fetch the last five unread emails of `user_123`
    fn default() -> Self {
        let mut tool_input = Map::new();
        tool_input.insert("query".to_string(), json!("is:unread"));
        tool_input.insert("max_results".to_string(), json!(5));

        Self {
            connection_name: "gmail".to_string(),
            identifier: "user_123".to_string(),
            tool_name: "gmail_fetch_mails".to_string(),
            tool_input,
        }
    }
}

/// How the quickstart ended
#[derive(Debug, Clone)]
pub enum QuickstartOutcome {
    /// The tool ran against an active account
    Executed {
        account: ConnectedAccount,
        result: ToolResult,
    },
    /// The account never became active; no tool was run
    NotAuthorized { account: ConnectedAccount },
}

/// Runs the quickstart against a connector client
pub struct Quickstart<'a> {
    client: &'a dyn ConnectClient,
    output: &'a dyn WorkflowOutput,
    prompt: &'a dyn AuthorizationPrompt,
}

impl<'a> Quickstart<'a> {
    pub fn new(
        client: &'a dyn ConnectClient,
        output: &'a dyn WorkflowOutput,
        prompt: &'a dyn AuthorizationPrompt,
    ) -> Self {
        Self {
            client,
            output,
            prompt,
        }
    }

    pub async fn run(&self, options: &QuickstartOptions) -> Result<QuickstartOutcome> {
        info!(
            "Starting quickstart for {}/{}",
            options.connection_name, options.identifier
        );

        let mut account = self
            .client
            .get_or_create_connected_account(&options.connection_name, &options.identifier)
            .await?;
        debug!("Connected account {} is {}", account.id, account.status);
        self.emit(WorkflowEvent::AccountResolved {
            account: account.clone(),
        })
        .await?;

        if !account.is_active() {
            let link = self
                .client
                .get_authorization_link(&options.connection_name, &options.identifier)
                .await?;
            self.emit(WorkflowEvent::AuthorizationRequired {
                connection_name: options.connection_name.clone(),
                link: link.clone(),
            })
            .await?;

            self.prompt.wait_for_authorization(&link).await?;

            account = self
                .client
                .get_or_create_connected_account(&options.connection_name, &options.identifier)
                .await?;
            self.emit(WorkflowEvent::AccountRefreshed {
                account: account.clone(),
            })
            .await?;
        }

        if !account.is_active() {
            warn!("Connected account {} is still {}", account.id, account.status);
            self.emit(WorkflowEvent::NotAuthorized {
                account: account.clone(),
            })
            .await?;
            return Ok(QuickstartOutcome::NotAuthorized { account });
        }

        self.emit(WorkflowEvent::ToolStarted {
            tool_name: options.tool_name.clone(),
        })
        .await?;

        let execution = ToolExecution::new(options.tool_name.clone())
            .for_account(account.id.clone())
            .with_input(options.tool_input.clone());
        let result = self.client.execute_tool(execution).await?;

        self.emit(WorkflowEvent::ToolCompleted {
            tool_name: options.tool_name.clone(),
            result: result.clone(),
        })
        .await?;

        Ok(QuickstartOutcome::Executed { account, result })
    }

    async fn emit(&self, event: WorkflowEvent) -> Result<()> {
        self.output
            .emit_event(event)
            .await
            .map_err(|e| Error::Generic(format!("Failed to emit workflow event: {}", e)))
    }
}
