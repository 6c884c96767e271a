//! Minimal configuration module for agent-actions core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::ResolvedConnectConfig;
