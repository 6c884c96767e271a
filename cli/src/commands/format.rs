//! Format a saved tool result

use agent_actions_core::{ResponseFormatter, ToolResult};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Render a tool result read from `input` (stdin when `None` or `-`)
pub async fn format_command(input: Option<PathBuf>, tool_name: Option<String>) -> Result<()> {
    let content = match input.as_ref().filter(|path| path.as_os_str() != "-") {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read tool result: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read tool result from stdin")?;
            buffer
        }
    };

    let result = parse_tool_result(&content)?;
    debug!(
        "Formatting result with {} top-level field(s)",
        result.data.as_ref().map(|d| d.len()).unwrap_or(0)
    );

    println!(
        "{}",
        ResponseFormatter::new().format(&result, tool_name.as_deref())
    );
    Ok(())
}

/// Read either a full tool result (`{"data": ..., "execution_id": ...}`) or a
/// bare payload object
pub fn parse_tool_result(content: &str) -> Result<ToolResult> {
    let value: Value = serde_json::from_str(content).context("Tool result is not valid JSON")?;
    Ok(ToolResult::from_document(value))
}
