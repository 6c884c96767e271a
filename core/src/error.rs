//! Error types and handling for Agent Actions Core

use thiserror::Error;

/// Result type alias for Agent Actions operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Agent Actions Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connector service errors
    #[error("Connect error: {0}")]
    Connect(#[from] ConnectError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .names.join(", "))]
    MissingVariables { names: Vec<String> },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// Connector service errors
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Connected account not found: {connection_name}/{identifier}")]
    AccountNotFound {
        connection_name: String,
        identifier: String,
    },

    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Tool execution needs an identifier or a connected account id: {name}")]
    MissingTarget { name: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
