use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Connection settings for the deployment API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the deployment API (e.g. "https://wharf.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session token sent as `Wharf-Session-Token`; omitted when empty.
    #[serde(default)]
    pub token: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Deployment API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Wildcard application host used to build forwarding URLs
    /// (e.g. "*.apps.example.com").
    #[serde(default = "default_proxy_host")]
    pub proxy_host: String,

    /// Workspace to display, as "owner/name".
    #[serde(default = "default_workspace")]
    pub workspace: String,

    /// Configured active-user limit; 0 means unlimited.
    #[serde(default)]
    pub user_limit: u64,

    /// Deployment announcement shown under the header; supports a
    /// restricted inline subset of Markdown. Empty means no banner.
    #[serde(default)]
    pub banner: String,

    /// Run against generated data instead of a live deployment.
    #[serde(default)]
    pub demo: bool,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_proxy_host() -> String {
    "*.apps.localhost".to_string()
}

fn default_workspace() -> String {
    "admin/workspace".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            proxy_host: default_proxy_host(),
            workspace: default_workspace(),
            user_limit: 0,
            banner: String::new(),
            demo: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Configured user limit, `None` when unlimited.
    pub fn user_limit(&self) -> Option<u64> {
        if self.user_limit == 0 {
            None
        } else {
            Some(self.user_limit)
        }
    }

    /// Split the configured workspace into (owner, name).
    pub fn workspace_parts(&self) -> (&str, &str) {
        match self.workspace.split_once('/') {
            Some((owner, name)) => (owner, name),
            None => ("admin", self.workspace.as_str()),
        }
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_config() {
        let json5 = r#"
        {
            api: {
                base_url: "https://wharf.example.com",
                token: "secret",
            },
            proxy_host: "*.apps.example.com",
            workspace: "alice/dev",
            user_limit: 100,
            logging: {
                level: "debug",
            },
        }
        "#;

        let config: DashboardConfig = parse_config(json5).unwrap();

        assert_eq!(config.api.base_url, "https://wharf.example.com");
        assert_eq!(config.api.token, "secret");
        assert_eq!(config.proxy_host, "*.apps.example.com");
        assert_eq!(config.workspace_parts(), ("alice", "dev"));
        assert_eq!(config.user_limit(), Some(100));
        assert_eq!(config.logging.level, "debug");
        assert!(!config.demo);
    }

    #[test]
    fn test_default_config() {
        let config: DashboardConfig = parse_config("{}").unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert!(config.api.token.is_empty());
        assert_eq!(config.user_limit(), None);
        assert!(config.banner.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_workspace_without_owner() {
        let config: DashboardConfig = parse_config(r#"{ workspace: "dev" }"#).unwrap();
        assert_eq!(config.workspace_parts(), ("admin", "dev"));
    }

    #[test]
    fn test_zero_user_limit_is_unlimited() {
        let config: DashboardConfig = parse_config(r#"{ user_limit: 0 }"#).unwrap();
        assert_eq!(config.user_limit(), None);
    }
}
