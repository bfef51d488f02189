use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_ROLES_PATH: &str = "/api/v1/roles";

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token attached to every request, if set.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_roles_path")]
    pub roles_path: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_roles_path() -> String {
    DEFAULT_ROLES_PATH.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            roles_path: default_roles_path(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("FLEET_API_URL").unwrap_or_else(|_| default_api_url()),
            token: std::env::var("FLEET_API_TOKEN").ok().filter(|t| !t.is_empty()),
            roles_path: std::env::var("FLEET_ROLES_PATH")
                .unwrap_or_else(|_| default_roles_path()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        if !self.roles_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "roles_path must start with '/', got '{}'",
                self.roles_path
            )));
        }
        Ok(())
    }
}
