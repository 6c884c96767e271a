//! CLI-specific output implementations
//!
//! Terminal implementation of the workflow output abstraction.

pub mod cli_handler;

pub use cli_handler::{CliOutputConfig, CliOutputHandler};
