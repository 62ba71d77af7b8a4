//! Installation-level configuration and the config store for envcopy.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{EndpointKind, WorkflowError};

/// Operator-configured endpoint URLs, read from the installation config.
///
/// Both fields are optional at the type level but required at use: an
/// absent (or empty) URL is a configuration error surfaced to the operator,
/// never a silent no-op. The camelCase aliases match the key names of the
/// host shell's configuration map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL of the environment-listing endpoint.
    #[serde(default, alias = "listEnvironmentsUrl")]
    pub list_environments_url: Option<String>,
    /// URL of the entry-copy endpoint.
    #[serde(default, alias = "copyEntryUrl")]
    pub copy_entry_url: Option<String>,
}

impl EndpointConfig {
    pub fn new(
        list_environments_url: impl Into<String>,
        copy_entry_url: impl Into<String>,
    ) -> Self {
        Self {
            list_environments_url: Some(list_environments_url.into()),
            copy_entry_url: Some(copy_entry_url.into()),
        }
    }

    /// The listing endpoint, or `ConfigurationMissing(list)`.
    pub fn list_environments_url(&self) -> Result<&str, WorkflowError> {
        required(&self.list_environments_url, EndpointKind::List)
    }

    /// The copy endpoint, or `ConfigurationMissing(copy)`.
    pub fn copy_entry_url(&self) -> Result<&str, WorkflowError> {
        required(&self.copy_entry_url, EndpointKind::Copy)
    }
}

fn required(value: &Option<String>, which: EndpointKind) -> Result<&str, WorkflowError> {
    match value.as_deref() {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(WorkflowError::missing(which)),
    }
}

/// Behavior switches for the copy dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOptions {
    /// Whether the copy endpoint requires HTTP Basic credentials.
    ///
    /// Deployment-dependent: some copy services run open, others demand
    /// operator credentials. One controller serves both variants.
    #[serde(default, alias = "requireCredentials")]
    pub require_credentials: bool,
}

/// Full contents of envcopy.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote endpoint URLs.
    #[serde(default)]
    pub endpoints: EndpointConfig,
    /// Dialog behavior.
    #[serde(default)]
    pub dialog: DialogOptions,
}

/// Loads and saves envcopy.toml.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the default location under the user config directory.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("envcopy");
        Ok(Self::from_path(config_dir.join("envcopy.toml")))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config; a missing file yields the defaults.
    pub fn load(&self) -> anyhow::Result<AppConfig> {
        if !self.config_path.exists() {
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;
        toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    pub fn save(&self, config: &AppConfig) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
