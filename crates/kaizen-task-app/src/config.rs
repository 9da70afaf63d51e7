/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed app configuration and per-call credential reads
[POS]:    Configuration layer - store endpoint and session credentials
[UPDATE]: When adding new configuration options
*/

use anyhow::{Context, Result};
use kaizen_task_client::{Credential, CredentialSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the kaizen-task CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Task-store endpoint
    #[serde(default)]
    pub store: StoreConfig,
    /// Session credential supplied by the external auth collaborator
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL of the task-store service
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Owner identity the task list is scoped to
    pub email: String,
    /// Bearer token for the task store
    #[serde(default)]
    pub token: String,
}

fn default_base_url() -> String {
    "http://localhost:4875".to_string()
}

impl AppConfig {
    /// Load and parse the YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        serde_yaml::from_str(&text).context("parse config file")
    }

    /// Credential from this config, or None when the token is absent
    pub fn credential(&self) -> Option<Credential> {
        if self.credentials.token.is_empty() {
            return None;
        }
        Some(Credential {
            token: self.credentials.token.clone(),
            owner_email: self.credentials.email.to_lowercase(),
        })
    }
}

/// Credential source that re-reads the config file on every call, so a
/// token refreshed by the auth collaborator is picked up without restart
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for FileCredentialSource {
    fn current(&self) -> Option<Credential> {
        let config = AppConfig::load(&self.path).ok()?;
        config.credential()
    }
}
