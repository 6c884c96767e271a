//! Run a single tool and render its result

use super::{build_client, parse_tool_input, ClientSource};
use agent_actions_core::{ResponseFormatter, ToolExecution};
use anyhow::{anyhow, Result};
use tracing::info;

/// Arguments of the execute command
#[derive(Debug, Clone)]
pub struct ExecuteArgs {
    pub tool: String,
    pub identifier: Option<String>,
    pub account_id: Option<String>,
    pub input: Option<String>,
    pub show_raw: bool,
}

/// Build the execution request from the command arguments
pub fn tool_execution(args: &ExecuteArgs) -> Result<ToolExecution> {
    let mut execution =
        ToolExecution::new(args.tool.clone()).with_input(parse_tool_input(args.input.as_deref())?);

    match (&args.identifier, &args.account_id) {
        (_, Some(account_id)) => execution = execution.for_account(account_id.clone()),
        (Some(identifier), None) => execution = execution.for_identifier(identifier.clone()),
        (None, None) => return Err(anyhow!("Either --identifier or --account-id is required")),
    }

    Ok(execution)
}

/// Execute a tool and print the formatted result
pub async fn execute_command(source: ClientSource, args: ExecuteArgs) -> Result<()> {
    let execution = tool_execution(&args)?;
    let client = build_client(source).await?;

    info!("Executing tool {}", execution.tool_name);
    let result = client.execute_tool(execution).await?;

    if args.show_raw {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    println!(
        "{}",
        ResponseFormatter::new().format(&result, Some(args.tool.as_str()))
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExecuteArgs {
        ExecuteArgs {
            tool: "googlecalendar_list_events".to_string(),
            identifier: None,
            account_id: None,
            input: None,
            show_raw: false,
        }
    }

    #[test]
    fn test_requires_a_target() {
        assert!(tool_execution(&args()).is_err());
    }

    #[test]
    fn test_account_id_preferred() {
        let execution = tool_execution(&ExecuteArgs {
            identifier: Some("default".to_string()),
            account_id: Some("ca_1".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(execution.connected_account_id.as_deref(), Some("ca_1"));
        assert!(execution.identifier.is_none());
    }

    #[test]
    fn test_identifier_with_input() {
        let execution = tool_execution(&ExecuteArgs {
            identifier: Some("default".to_string()),
            input: Some(r#"{"max_results": 1}"#.to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(execution.identifier.as_deref(), Some("default"));
        assert_eq!(execution.tool_input["max_results"], 1);
    }
}
