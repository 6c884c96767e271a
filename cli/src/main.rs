//! # agent-actions CLI
//!
//! Command-line interface for Agent Actions: connect a user's third-party
//! account, run a tool on their behalf and print a readable summary.
//!
//! ## Usage
//!
//! - `agent-actions quickstart` - Authorize Gmail for `user_123` and fetch unread mail
//! - `agent-actions auth-link --connection gmail --identifier user_123` - Print an authorization link
//! - `agent-actions execute --tool googlecalendar_list_events --identifier default` - Run one tool
//! - `agent-actions format result.json` - Render a saved tool result

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;
mod prompt;

use commands::execute::ExecuteArgs;
use commands::quickstart::QuickstartArgs;
use commands::{
    auth_link_command, execute_command, format_command, quickstart_command, ClientSource,
};
use config::CliConfigLoader;

/// agent-actions - Act in third-party apps on behalf of users
#[derive(Parser)]
#[command(name = "agent-actions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Connect user accounts, run tools and render their results")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment URL override
    #[arg(long, global = true)]
    env_url: Option<String>,

    /// Client id override
    #[arg(long, global = true)]
    client_id: Option<String>,

    /// Client secret override
    #[arg(long, global = true)]
    client_secret: Option<String>,

    /// Replay canned responses from a fixture file instead of calling the service
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize a connection if needed, then run one tool
    Quickstart {
        /// Connection name
        #[arg(long)]
        connection: Option<String>,
        /// End-user identifier
        #[arg(long)]
        identifier: Option<String>,
        /// Tool to run
        #[arg(long)]
        tool: Option<String>,
        /// Tool input as a JSON object
        #[arg(long)]
        input: Option<String>,
        /// Print the raw result before the summary
        #[arg(long)]
        raw: bool,
        /// Re-check the account without waiting for Enter
        #[arg(long)]
        no_wait: bool,
    },

    /// Print the authorization link for a connection
    AuthLink {
        /// Connection name
        #[arg(long)]
        connection: String,
        /// End-user identifier
        #[arg(long)]
        identifier: String,
    },

    /// Run a tool and print its result
    Execute {
        /// Tool to run
        #[arg(long)]
        tool: String,
        /// End-user identifier
        #[arg(long)]
        identifier: Option<String>,
        /// Connected account id
        #[arg(long)]
        account_id: Option<String>,
        /// Tool input as a JSON object
        #[arg(long)]
        input: Option<String>,
        /// Print the raw result before the summary
        #[arg(long)]
        raw: bool,
    },

    /// Render a saved tool result (reads stdin when no file is given)
    Format {
        /// Tool result JSON file, or `-` for stdin
        file: Option<PathBuf>,
        /// Tool name used to pick the renderer
        #[arg(long)]
        tool: Option<String>,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(env_url) = &cli.env_url {
        loader = loader.with_env_url_override(env_url.clone());
    }

    if let Some(client_id) = &cli.client_id {
        loader = loader.with_client_id_override(client_id.clone());
    }

    if let Some(client_secret) = &cli.client_secret {
        loader = loader.with_client_secret_override(client_secret.clone());
    }

    loader
}

/// Pick the fixture when given, the live service otherwise
fn client_source(cli: &Cli) -> ClientSource {
    match &cli.fixture {
        Some(path) => ClientSource::Fixture(path.clone()),
        None => ClientSource::Service(build_config_loader(cli)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    agent_actions_core::init_tracing_with_debug(cli.verbose);

    // Credentials may live in a .env file next to the project
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let source = client_source(&cli);

    match cli.command {
        Commands::Quickstart {
            connection,
            identifier,
            tool,
            input,
            raw,
            no_wait,
        } => {
            quickstart_command(
                source,
                QuickstartArgs {
                    connection,
                    identifier,
                    tool,
                    input,
                    show_raw: raw,
                    no_wait,
                },
            )
            .await
        }
        Commands::AuthLink {
            connection,
            identifier,
        } => auth_link_command(source, connection, identifier).await,
        Commands::Execute {
            tool,
            identifier,
            account_id,
            input,
            raw,
        } => {
            execute_command(
                source,
                ExecuteArgs {
                    tool,
                    identifier,
                    account_id,
                    input,
                    show_raw: raw,
                },
            )
            .await
        }
        Commands::Format { file, tool } => format_command(file, tool).await,
    }
}
