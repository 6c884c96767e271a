//! # Agent Actions Core
//!
//! Core library for Agent Actions: let an agent act in third-party
//! applications (Gmail, Google Calendar, Drive) on behalf of a user.
//!
//! The crate covers the connected-account lifecycle (get or create, request an
//! authorization link, wait for consent), remote tool execution, and the
//! [`ResponseFormatter`] that turns a tool result into a readable report.

// Core modules
pub mod config;
pub mod connect;
pub mod error;
pub mod output;
pub mod tools;
pub mod workflow;

// Re-export commonly used types
pub use config::ResolvedConnectConfig;
pub use connect::{AccountStatus, AuthorizationLink, ConnectClient, ConnectedAccount, ToolExecution};
pub use tools::{ResponseFormatter, ToolKind, ToolResult};
pub use workflow::{Quickstart, QuickstartOutcome};

/// Current version of the agent-actions-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing with a specific debug mode
///
/// Logs go to stderr so that rendered reports on stdout stay clean.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
