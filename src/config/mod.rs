//
//  trello-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Two layers of configuration live here:
//!
//! - [`ClientConfig`]: the immutable settings an [`HttpClient`](crate::api::HttpClient)
//!   reads on every request.
//! - [`Config`]: the CLI's TOML file, whose values override the client
//!   defaults.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/trello/config.toml`
//! - **macOS**: `~/Library/Application Support/trello/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\trello\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [client]
//! base_uri = "https://api.trello.com/"
//! timeout = 30
//! api_version = 1
//!
//! [auth]
//! scheme = "url_client_id"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trello_api::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("timeout", "30")?;
//! config.save()?;
//!
//! let client_config = config.client_config();
//! println!("Timeout: {:?}", client_config.timeout());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`client`]: Client options and their defaults
//! - [`file`]: Low-level configuration file I/O operations

mod client;
mod file;

pub use client::*;
pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::AuthScheme;

/// Key under which the authentication scheme is exposed by [`Config::get`].
pub const AUTH_SCHEME_KEY: &str = "auth_scheme";

/// The CLI's persistent configuration.
///
/// Every field is optional; unset values fall back to the
/// [`ClientConfig`] defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Client option overrides.
    #[serde(default)]
    pub client: ClientSettings,

    /// Authentication preferences. Secrets live in the keyring, not here.
    #[serde(default)]
    pub auth: AuthSettings,
}

/// `[client]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_errors: Option<bool>,
}

/// `[auth]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthSettings {
    /// One of the [`AuthScheme`] names. Defaults to `url_client_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Builds the client configuration: defaults overridden by this file.
    pub fn client_config(&self) -> ClientConfig {
        let settings = &self.client;
        let mut config = ClientConfig::default();

        if let Some(base_uri) = &settings.base_uri {
            config = config.with_base_uri(base_uri.clone());
        }
        if let Some(user_agent) = &settings.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(timeout) = settings.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        if let Some(api_version) = settings.api_version {
            config = config.with_api_version(api_version);
        }
        if let Some(http_errors) = settings.http_errors {
            config = config.with_http_errors(http_errors);
        }

        config
    }

    /// Returns the configured authentication scheme.
    pub fn auth_scheme(&self) -> Result<AuthScheme> {
        match &self.auth.scheme {
            Some(scheme) => Ok(scheme.parse()?),
            None => Ok(AuthScheme::UrlClientId),
        }
    }

    /// Returns the explicitly configured value for a key.
    pub fn get(&self, key: &str) -> Option<String> {
        let settings = &self.client;
        match key {
            "base_uri" => settings.base_uri.clone(),
            "user_agent" => settings.user_agent.clone(),
            "timeout" => settings.timeout.map(|t| t.to_string()),
            "api_version" => settings.api_version.map(|v| v.to_string()),
            "http_errors" => settings.http_errors.map(|e| e.to_string()),
            AUTH_SCHEME_KEY => self.auth.scheme.clone(),
            _ => None,
        }
    }

    /// Sets a key after validating its value.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key == AUTH_SCHEME_KEY {
            let scheme: AuthScheme = value.parse()?;
            self.auth.scheme = Some(scheme.to_string());
            return Ok(());
        }

        let settings = &mut self.client;
        match ClientOption::parse(key, value)? {
            ClientOption::BaseUri(base_uri) => settings.base_uri = Some(base_uri),
            ClientOption::UserAgent(user_agent) => settings.user_agent = Some(user_agent),
            ClientOption::Timeout(timeout) => settings.timeout = Some(timeout.as_secs()),
            ClientOption::ApiVersion(api_version) => settings.api_version = Some(api_version),
            ClientOption::HttpErrors(http_errors) => settings.http_errors = Some(http_errors),
        }
        Ok(())
    }

    /// Removes an explicitly configured value.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let settings = &mut self.client;
        match key {
            "base_uri" => settings.base_uri = None,
            "user_agent" => settings.user_agent = None,
            "timeout" => settings.timeout = None,
            "api_version" => settings.api_version = None,
            "http_errors" => settings.http_errors = None,
            AUTH_SCHEME_KEY => self.auth.scheme = None,
            _ => bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// All keys with their effective values (explicit or default).
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .client_config()
            .options()
            .into_iter()
            .map(|option| (option.name().to_string(), option.to_string()))
            .collect();

        let scheme = self
            .auth
            .scheme
            .clone()
            .unwrap_or_else(|| AuthScheme::UrlClientId.to_string());
        entries.push((AUTH_SCHEME_KEY.to_string(), scheme));
        entries
    }

    /// Every key accepted by [`Config::get`] and [`Config::set`].
    pub fn keys() -> Vec<&'static str> {
        let mut keys = ClientOption::NAMES.to_vec();
        keys.push(AUTH_SCHEME_KEY);
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_client_config() {
        let config = Config::default();
        assert_eq!(config.client_config(), ClientConfig::default());
        assert_eq!(config.auth_scheme().unwrap(), AuthScheme::UrlClientId);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("timeout", "30").unwrap();
        config.set("api_version", "2").unwrap();
        config.set(AUTH_SCHEME_KEY, "url_token").unwrap();

        assert_eq!(config.get("timeout").as_deref(), Some("30"));
        assert_eq!(config.client_config().timeout(), Duration::from_secs(30));
        assert_eq!(config.client_config().api_version(), 2);
        assert_eq!(config.auth_scheme().unwrap(), AuthScheme::UrlToken);
        assert_eq!(config.get("base_uri"), None);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("timeout", "forever").is_err());
        assert!(config.set("colour", "red").is_err());
        assert!(config.set(AUTH_SCHEME_KEY, "oauth").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unset() {
        let mut config = Config::default();
        config.set("user_agent", "bot/1.0").unwrap();
        config.unset("user_agent").unwrap();
        assert_eq!(config.get("user_agent"), None);
        assert!(config.unset("nope").is_err());
    }

    #[test]
    fn test_entries_include_defaults() {
        let config = Config::default();
        let entries = config.entries();
        assert_eq!(entries.len(), Config::keys().len());
        assert!(entries.contains(&("api_version".to_string(), "1".to_string())));
        assert!(entries.contains(&(AUTH_SCHEME_KEY.to_string(), "url_client_id".to_string())));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("base_uri", "http://localhost:3000/").unwrap();
        config.set("http_errors", "false").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!loaded.client_config().http_errors());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_malformed_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client\ntimeout = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
        assert!(err.chain().count() > 1);
    }

    #[test]
    fn test_parse_toml() {
        let content = "[client]\ntimeout = 5\n\n[auth]\nscheme = \"url_token\"\n";
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.client.timeout, Some(5));
        assert_eq!(config.auth_scheme().unwrap(), AuthScheme::UrlToken);
    }
}
