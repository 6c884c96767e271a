//! Configuration types for the connector client
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use serde::{Deserialize, Serialize};

/// A fully resolved connector configuration ready for use by core
#[derive(Clone, Serialize, Deserialize)]
pub struct ResolvedConnectConfig {
    /// Environment URL of the connector service
    pub env_url: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Optional scope requested with the client-credentials grant
    #[serde(default)]
    pub scope: Option<String>,
}

impl ResolvedConnectConfig {
    /// Create a new resolved connector config
    pub fn new(env_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            env_url: env_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            scope: None,
        }
    }

    /// Set the token scope
    pub fn with_scope(mut self, scope: String) -> Self {
        self.scope = Some(scope);
        self
    }

    /// URL of the OAuth token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.env_url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.is_empty() {
            return Err("Client id cannot be empty".to_string());
        }

        if self.client_secret.is_empty() {
            return Err("Client secret cannot be empty".to_string());
        }

        if self.env_url.is_empty() {
            return Err("Environment URL cannot be empty".to_string());
        }

        if !self.env_url.starts_with("http://") && !self.env_url.starts_with("https://") {
            return Err("Environment URL must start with http:// or https://".to_string());
        }

        Ok(())
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for ResolvedConnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConnectConfig")
            .field("env_url", &self.env_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ResolvedConnectConfig {
        ResolvedConnectConfig::new(
            "https://acme.scalekit.dev/".to_string(),
            "skc_123".to_string(),
            "secret".to_string(),
        )
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let cfg = config();
        assert_eq!(cfg.env_url, "https://acme.scalekit.dev");
        assert_eq!(cfg.token_url(), "https://acme.scalekit.dev/oauth/token");
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut cfg = config();
        cfg.env_url = "acme.scalekit.dev".to_string();
        assert_eq!(
            cfg.validate().unwrap_err(),
            "Environment URL must start with http:// or https://"
        );
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut cfg = config();
        cfg.client_secret.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"secret\""));
    }
}
