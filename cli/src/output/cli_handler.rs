//! CLI output handler implementation

use agent_actions_core::output::{WorkflowEvent, WorkflowOutput};
use agent_actions_core::ResponseFormatter;
use async_trait::async_trait;
use std::io::Write;
use tracing::debug;

/// CLI output configuration
#[derive(Debug, Clone, Default)]
pub struct CliOutputConfig {
    /// Print the raw JSON result before the formatted report
    pub show_raw: bool,
}

/// CLI output handler that formats workflow events for terminal display
pub struct CliOutputHandler {
    config: CliOutputConfig,
    formatter: ResponseFormatter,
}

impl CliOutputHandler {
    /// Create a new CLI output handler
    pub fn new(config: CliOutputConfig) -> Self {
        Self {
            config,
            formatter: ResponseFormatter::new(),
        }
    }

    /// Lines printed for an event
    pub fn render_event(&self, event: &WorkflowEvent) -> Vec<String> {
        match event {
            WorkflowEvent::AccountResolved { account } => vec![
                format!("🔗 Connected account ID: {}", account.id),
                format!("🔐 Account status: {}", account.status),
            ],

            WorkflowEvent::AuthorizationRequired {
                connection_name,
                link,
            } => vec![
                format!(
                    "⚠️  {} connection not active. User needs to authorize.",
                    connection_name
                ),
                format!("🔗 Authorization URL: {}", link.link),
                format!("👆 Open the link above to authorize {} access", connection_name),
            ],

            WorkflowEvent::AccountRefreshed { account } => {
                vec![format!("🔄 Updated account status: {}", account.status)]
            }

            WorkflowEvent::ToolStarted { tool_name } => {
                vec![format!("🛠️  Executing {}...", tool_name)]
            }

            WorkflowEvent::ToolCompleted { tool_name, result } => {
                let mut lines = vec![format!("✅ {} completed", tool_name)];
                if self.config.show_raw {
                    match serde_json::to_string_pretty(result) {
                        Ok(raw) => lines.push(raw),
                        Err(e) => debug!("Could not serialize raw result: {}", e),
                    }
                }
                lines.push(self.formatter.format(result, Some(tool_name.as_str())));
                lines
            }

            WorkflowEvent::NotAuthorized { account } => vec![format!(
                "❌ {} connection still not active (status: {}). Please try authorization again.",
                account.connection_name, account.status
            )],
        }
    }
}

impl Default for CliOutputHandler {
    fn default() -> Self {
        Self::new(CliOutputConfig::default())
    }
}

#[async_trait]
impl WorkflowOutput for CliOutputHandler {
    async fn emit_event(
        &self,
        event: WorkflowEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for line in self.render_event(&event) {
            println!("{}", line);
        }
        Ok(())
    }

    async fn flush(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        std::io::stdout().flush().map_err(|e| e.into())
    }
}
