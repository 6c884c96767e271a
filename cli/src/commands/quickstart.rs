//! Quickstart command: authorize a connection and run one tool

use super::{build_client, parse_tool_input, ClientSource};
use crate::output::{CliOutputConfig, CliOutputHandler};
use crate::prompt::StdinPrompt;
use agent_actions_core::output::WorkflowOutput;
use agent_actions_core::workflow::{
    AuthorizationPrompt, NoPrompt, Quickstart, QuickstartOptions, QuickstartOutcome,
};
use anyhow::{anyhow, Result};
use tracing::info;

/// Arguments of the quickstart command
#[derive(Debug, Clone)]
pub struct QuickstartArgs {
    pub connection: Option<String>,
    pub identifier: Option<String>,
    pub tool: Option<String>,
    pub input: Option<String>,
    pub show_raw: bool,
    /// Re-check the account right away instead of waiting for Enter
    pub no_wait: bool,
}

/// Build workflow options, keeping the defaults for anything not given
pub fn quickstart_options(args: &QuickstartArgs) -> Result<QuickstartOptions> {
    let mut options = QuickstartOptions::default();

    if let Some(connection) = &args.connection {
        options.connection_name = connection.clone();
    }
    if let Some(identifier) = &args.identifier {
        options.identifier = identifier.clone();
    }
    if let Some(tool) = &args.tool {
        options.tool_name = tool.clone();
        // The default input only fits the default tool.
        options.tool_input.clear();
    }
    if args.input.is_some() {
        options.tool_input = parse_tool_input(args.input.as_deref())?;
    }

    Ok(options)
}

/// Run the quickstart workflow
pub async fn quickstart_command(source: ClientSource, args: QuickstartArgs) -> Result<()> {
    let options = quickstart_options(&args)?;
    let client = build_client(source).await?;
    println!("✅ Client initialized successfully");

    let output = CliOutputHandler::new(CliOutputConfig {
        show_raw: args.show_raw,
    });
    let prompt: Box<dyn AuthorizationPrompt> = if args.no_wait {
        Box::new(NoPrompt)
    } else {
        Box::new(StdinPrompt)
    };

    let outcome = Quickstart::new(client.as_ref(), &output, prompt.as_ref())
        .run(&options)
        .await?;
    output
        .flush()
        .await
        .map_err(|e| anyhow!("Failed to flush output: {}", e))?;

    match outcome {
        QuickstartOutcome::Executed { account, .. } => {
            info!("Quickstart finished for account {}", account.id);
            println!("\n🎉 Quickstart completed successfully!");
            Ok(())
        }
        QuickstartOutcome::NotAuthorized { account } => Err(anyhow!(
            "Connected account {} is not active (status: {})",
            account.id,
            account.status
        )),
    }
}
