//! Output abstraction layer for workflows
//!
//! Workflows report progress as [`WorkflowEvent`]s; the CLI, tests or any
//! embedding application decide how to present them.

use crate::connect::{AuthorizationLink, ConnectedAccount};
use crate::tools::ToolResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Null output handler that discards all events
pub struct NullOutput;

#[async_trait]
impl WorkflowOutput for NullOutput {
    async fn emit_event(
        &self,
        _event: WorkflowEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Events emitted while a workflow runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkflowEvent {
    /// The connected account was fetched or created
    AccountResolved { account: ConnectedAccount },
    /// The account is not active; the user must visit the link
    AuthorizationRequired {
        connection_name: String,
        link: AuthorizationLink,
    },
    /// The account was fetched again after the authorization pause
    AccountRefreshed { account: ConnectedAccount },
    /// A tool is about to run
    ToolStarted { tool_name: String },
    /// A tool finished
    ToolCompleted { tool_name: String, result: ToolResult },
    /// The account is still inactive, no tool was run
    NotAuthorized { account: ConnectedAccount },
}

/// Abstract output interface for workflow execution
#[async_trait]
pub trait WorkflowOutput: Send + Sync {
    /// Emit a workflow event
    async fn emit_event(
        &self,
        event: WorkflowEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Flush any buffered output
    async fn flush(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
