//! Simple CLI configuration loader for agent-actions
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./agent-actions.json or ./.agent-actions/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/agent-actions/config.json or ~/.config/agent-actions/config.json
//! 4. Environment variables only (no files)
//!
//! Fields missing from the file fall back to the environment
//! (`SCALEKIT_CLIENT_ID`, `SCALEKIT_CLIENT_SECRET`, `SCALEKIT_ENV_URL`).

use agent_actions_core::error::ConfigError;
use agent_actions_core::ResolvedConnectConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CLIENT_ID_VAR: &str = "SCALEKIT_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SCALEKIT_CLIENT_SECRET";
pub const ENV_URL_VAR: &str = "SCALEKIT_ENV_URL";
/// Older name of the environment URL variable
pub const ENVIRONMENT_URL_VAR: &str = "SCALEKIT_ENVIRONMENT_URL";
pub const SCOPE_VAR: &str = "SCALEKIT_SCOPE";

const CONFIG_FILE_NAME: &str = "agent-actions.json";
const CONFIG_DIR_NAME: &str = ".agent-actions";
const APP_DIR_NAME: &str = "agent-actions";

/// Raw configuration file format (simple single-file schema)
///
/// Any value can be written as `env:VAR_NAME` to read it from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Environment URL of the connector service
    pub env_url: Option<String>,
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// Token scope (optional)
    pub scope: Option<String>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    env_url_override: Option<String>,
    client_id_override: Option<String>,
    client_secret_override: Option<String>,
    /// Directory searched for project config (defaults to the working directory)
    search_dir: Option<PathBuf>,
    /// Fixed environment (defaults to the process environment)
    env_vars: Option<HashMap<String, String>>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            env_url_override: None,
            client_id_override: None,
            client_secret_override: None,
            search_dir: None,
            env_vars: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set environment URL override
    pub fn with_env_url_override(mut self, env_url: String) -> Self {
        self.env_url_override = Some(env_url);
        self
    }

    /// Set client id override
    pub fn with_client_id_override(mut self, client_id: String) -> Self {
        self.client_id_override = Some(client_id);
        self
    }

    /// Set client secret override
    pub fn with_client_secret_override(mut self, client_secret: String) -> Self {
        self.client_secret_override = Some(client_secret);
        self
    }

    /// Search for project config in `dir` instead of the working directory
    pub fn with_search_dir(mut self, dir: PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedConnectConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            let expanded = expand_path(override_path);
            self.load_from_path(&expanded).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?.unwrap_or_default()
        };

        // Step 2: Apply flag overrides
        if let Some(env_url) = &self.env_url_override {
            config.env_url = Some(env_url.clone());
        }
        if let Some(client_id) = &self.client_id_override {
            config.client_id = Some(client_id.clone());
        }
        if let Some(client_secret) = &self.client_secret_override {
            config.client_secret = Some(client_secret.clone());
        }

        // Step 3: Fill gaps from the environment
        self.apply_env_fallback(&mut config);

        // Step 4: Resolve to final config
        self.resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<Option<RawConfig>> {
        if let Some(config) = self.try_load_project().await? {
            return Ok(Some(config));
        }

        self.try_load_xdg().await
    }

    /// Try loading from the project directory
    async fn try_load_project(&self) -> Result<Option<RawConfig>> {
        let dir = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let config_file = dir.join(CONFIG_FILE_NAME);
        if config_file.exists() {
            return Ok(Some(self.load_file(&config_file).await?));
        }

        let dir_config = dir.join(CONFIG_DIR_NAME).join("config.json");
        if dir_config.exists() {
            return Ok(Some(self.load_file(&dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RawConfig>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join(APP_DIR_NAME).join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into())
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        self.env_var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        match &self.env_vars {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
        .filter(|value| !value.is_empty())
    }

    fn apply_env_fallback(&self, config: &mut RawConfig) {
        if config.env_url.is_none() {
            config.env_url = self
                .env_var(ENV_URL_VAR)
                .or_else(|| self.env_var(ENVIRONMENT_URL_VAR));
        }
        if config.client_id.is_none() {
            config.client_id = self.env_var(CLIENT_ID_VAR);
        }
        if config.client_secret.is_none() {
            config.client_secret = self.env_var(CLIENT_SECRET_VAR);
        }
        if config.scope.is_none() {
            config.scope = self.env_var(SCOPE_VAR);
        }
    }

    /// Resolve `env:VAR_NAME` references
    fn resolve_value(&self, value: String) -> Result<String> {
        match value.strip_prefix("env:") {
            Some(var_name) => self
                .env_var(var_name)
                .ok_or_else(|| anyhow!("Environment variable not found: {}", var_name)),
            None => Ok(value),
        }
    }

    /// Resolve raw config to ResolvedConnectConfig
    fn resolve_config(&self, config: RawConfig) -> Result<ResolvedConnectConfig> {
        let (env_url, client_id, client_secret) =
            match (config.env_url, config.client_id, config.client_secret) {
                (Some(env_url), Some(client_id), Some(client_secret)) => {
                    (env_url, client_id, client_secret)
                }
                (env_url, client_id, client_secret) => {
                    let names = [
                        (client_id.is_none(), CLIENT_ID_VAR),
                        (client_secret.is_none(), CLIENT_SECRET_VAR),
                        (env_url.is_none(), ENV_URL_VAR),
                    ]
                    .into_iter()
                    .filter(|(is_missing, _)| *is_missing)
                    .map(|(_, name)| name.to_string())
                    .collect();
                    return Err(ConfigError::MissingVariables { names }.into());
                }
            };

        let mut resolved = ResolvedConnectConfig::new(
            self.resolve_value(env_url)?,
            self.resolve_value(client_id)?,
            self.resolve_value(client_secret)?,
        );
        if let Some(scope) = config.scope {
            resolved = resolved.with_scope(self.resolve_value(scope)?);
        }

        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `~` and environment variables in a user-supplied path
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}
