//
//  trello-api
//  config/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Configuration
//!
//! [`ClientConfig`] holds the settings the HTTP client reads on every request.
//! It is an immutable value: overrides produce a new configuration and never
//! reset the options they do not touch.
//!
//! ## Recognized Options
//!
//! | Option | Default |
//! |--------|---------|
//! | `base_uri` | `https://api.trello.com/` |
//! | `user_agent` | `trello-api/<version>` |
//! | `timeout` | 10 seconds (`0` disables it) |
//! | `api_version` | `1` |
//! | `http_errors` | `true` |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use trello_api::config::{ClientConfig, ClientOption};
//!
//! let config = ClientConfig::default()
//!     .with_option(ClientOption::Timeout(Duration::from_secs(30)))
//!     .with_api_version(1);
//!
//! assert_eq!(config.timeout(), Duration::from_secs(30));
//! assert_eq!(config.base_uri(), "https://api.trello.com/");
//! ```

use std::fmt;
use std::time::Duration;

use crate::api::ApiError;

/// Default API host.
pub const DEFAULT_BASE_URI: &str = "https://api.trello.com/";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: u32 = 1;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings used to build every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_uri: String,
    user_agent: String,
    timeout: Duration,
    api_version: u32,
    http_errors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            user_agent: format!("trello-api/{}", crate::VERSION),
            timeout: DEFAULT_TIMEOUT,
            api_version: DEFAULT_API_VERSION,
            http_errors: true,
        }
    }
}

/// A single configuration override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOption {
    /// Root URL every versioned path is resolved against.
    BaseUri(String),
    /// Value of the `User-Agent` header.
    UserAgent(String),
    /// Per-request timeout. Zero disables it.
    Timeout(Duration),
    /// Integer version prefixed to every path.
    ApiVersion(u32),
    /// Whether non-2xx responses are reported as errors.
    HttpErrors(bool),
}

impl ClientOption {
    /// Names accepted by [`ClientOption::parse`].
    pub const NAMES: &'static [&'static str] =
        &["base_uri", "user_agent", "timeout", "api_version", "http_errors"];

    /// Parses an option from its name and string value.
    ///
    /// `timeout` is given in whole seconds, where `0` means no timeout. Unknown names and unparsable
    /// values are reported as [`ApiError::Validation`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use trello_api::config::ClientOption;
    ///
    /// let option = ClientOption::parse("timeout", "30")?;
    /// assert_eq!(option, ClientOption::Timeout(Duration::from_secs(30)));
    /// assert!(ClientOption::parse("retries", "3").is_err());
    /// # Ok::<(), trello_api::api::ApiError>(())
    /// ```
    pub fn parse(name: &str, value: &str) -> Result<Self, ApiError> {
        let invalid = |expected: &str| {
            ApiError::Validation(format!(
                "Invalid value '{}' for option '{}': expected {}",
                value, name, expected
            ))
        };

        match name {
            "base_uri" => {
                url::Url::parse(value).map_err(|_| invalid("an absolute URL"))?;
                Ok(Self::BaseUri(value.to_string()))
            }
            "user_agent" => Ok(Self::UserAgent(value.to_string())),
            "timeout" => value
                .trim()
                .parse::<u64>()
                .map(|secs| Self::Timeout(Duration::from_secs(secs)))
                .map_err(|_| invalid("a number of seconds")),
            "api_version" => value
                .trim()
                .parse::<u32>()
                .map(Self::ApiVersion)
                .map_err(|_| invalid("a positive integer")),
            "http_errors" => value
                .trim()
                .parse::<bool>()
                .map(Self::HttpErrors)
                .map_err(|_| invalid("true or false")),
            _ => Err(ApiError::Validation(format!(
                "Unknown option '{}'. Valid options: {}",
                name,
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Returns the option's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BaseUri(_) => "base_uri",
            Self::UserAgent(_) => "user_agent",
            Self::Timeout(_) => "timeout",
            Self::ApiVersion(_) => "api_version",
            Self::HttpErrors(_) => "http_errors",
        }
    }
}

impl fmt::Display for ClientOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseUri(value) | Self::UserAgent(value) => write!(f, "{}", value),
            Self::Timeout(timeout) => write!(f, "{}", timeout.as_secs()),
            Self::ApiVersion(version) => write!(f, "{}", version),
            Self::HttpErrors(enabled) => write!(f, "{}", enabled),
        }
    }
}

impl ClientConfig {
    /// Returns a copy of this configuration with one option overridden.
    pub fn with_option(mut self, option: ClientOption) -> Self {
        match option {
            ClientOption::BaseUri(base_uri) => self.base_uri = base_uri,
            ClientOption::UserAgent(user_agent) => self.user_agent = user_agent,
            ClientOption::Timeout(timeout) => self.timeout = timeout,
            ClientOption::ApiVersion(api_version) => self.api_version = api_version,
            ClientOption::HttpErrors(http_errors) => self.http_errors = http_errors,
        }
        self
    }

    /// Overrides the base URI.
    pub fn with_base_uri(self, base_uri: impl Into<String>) -> Self {
        self.with_option(ClientOption::BaseUri(base_uri.into()))
    }

    /// Overrides the user agent.
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        self.with_option(ClientOption::UserAgent(user_agent.into()))
    }

    /// Overrides the request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_option(ClientOption::Timeout(timeout))
    }

    /// Overrides the API version.
    pub fn with_api_version(self, api_version: u32) -> Self {
        self.with_option(ClientOption::ApiVersion(api_version))
    }

    /// Overrides whether error statuses are reported as errors.
    pub fn with_http_errors(self, http_errors: bool) -> Self {
        self.with_option(ClientOption::HttpErrors(http_errors))
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    pub fn http_errors(&self) -> bool {
        self.http_errors
    }

    /// Returns every option with its current value, in [`ClientOption::NAMES`] order.
    pub fn options(&self) -> Vec<ClientOption> {
        vec![
            ClientOption::BaseUri(self.base_uri.clone()),
            ClientOption::UserAgent(self.user_agent.clone()),
            ClientOption::Timeout(self.timeout),
            ClientOption::ApiVersion(self.api_version),
            ClientOption::HttpErrors(self.http_errors),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_uri(), DEFAULT_BASE_URI);
        assert_eq!(config.api_version(), 1);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent().starts_with("trello-api/"));
        assert!(config.http_errors());
    }

    #[test]
    fn test_override_keeps_other_options() {
        let config = ClientConfig::default()
            .with_base_uri("http://localhost:8080/")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.base_uri(), "http://localhost:8080/");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.user_agent(), ClientConfig::default().user_agent());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            ClientOption::parse("api_version", "2").unwrap(),
            ClientOption::ApiVersion(2)
        );
        assert_eq!(
            ClientOption::parse("http_errors", "false").unwrap(),
            ClientOption::HttpErrors(false)
        );
        assert_eq!(
            ClientOption::parse("timeout", "0").unwrap(),
            ClientOption::Timeout(Duration::ZERO)
        );
        assert!(matches!(
            ClientOption::parse("timeout", "soon"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            ClientOption::parse("base_uri", "not a url"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            ClientOption::parse("proxy", "x"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_options_round_trip_through_display() {
        let config = ClientConfig::default().with_api_version(3);
        for option in config.options() {
            let parsed = ClientOption::parse(option.name(), &option.to_string()).unwrap();
            assert_eq!(parsed, option);
        }
    }
}
