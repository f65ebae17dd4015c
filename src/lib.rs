//
//  trello-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Trello API Library
//!
//! A client for the Trello REST API, and the core of the `trello` CLI.
//!
//! ## Overview
//!
//! The library turns typed, resource-oriented calls into authenticated HTTP
//! requests, and HTTP responses into results or typed errors. Responses are
//! handed back undecoded; callers decide how to read them.
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, request construction, transport, resource wrappers
//! - [`auth`]: Authentication methods and keyring credential storage
//! - [`config`]: Client options and the CLI configuration file
//! - [`cli`]: Command-line interface definitions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trello_api::api::HttpClient;
//! use trello_api::auth::AuthScheme;
//! use trello_api::config::ClientConfig;
//!
//! # async fn example() -> Result<(), trello_api::api::ApiError> {
//! let mut client = HttpClient::new(ClientConfig::default())?;
//! client.authenticate("api-key", Some("token"), AuthScheme::UrlClientId);
//!
//! client.card_labels().set("5f1a2b3c", &["red"]).await?;
//!
//! if let Some(request) = client.last_request() {
//!     println!("Last call: {} {}", request.method, request.url.path());
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// HTTP client layer for the Trello API.
///
/// Builds versioned, authenticated requests, sends them through a pluggable
/// transport and maps failures onto [`api::ApiError`].
pub mod api;

/// Authentication methods and credential storage.
pub mod auth;

/// Client options and the configuration file.
pub mod config;

pub use api::{ApiError, HttpClient};
pub use config::{ClientConfig, Config};

/// Application name, used for the binary and configuration paths.
pub const APP_NAME: &str = "trello";

/// Library version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General, usage and configuration errors
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    use crate::api::ApiError;
    use reqwest::StatusCode;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including rejected values.
    pub const USAGE: i32 = 2;

    /// Unsupported configuration (e.g. an unimplemented auth method).
    pub const CONFIG_ERROR: i32 = 3;

    /// Authentication required or failed.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded.
    pub const RATE_LIMIT: i32 = 32;

    /// Maps an error to the exit code the CLI reports.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Validation(_)) => USAGE,
            Some(ApiError::Configuration(_)) => CONFIG_ERROR,
            Some(api_error) => match api_error.status_code() {
                Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => AUTH_ERROR,
                Some(StatusCode::NOT_FOUND) => NOT_FOUND,
                Some(StatusCode::TOO_MANY_REQUESTS) => RATE_LIMIT,
                _ => ERROR,
            },
            None => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_for_error() {
            let err = anyhow::Error::new(ApiError::Validation("bad".into()));
            assert_eq!(for_error(&err), USAGE);

            let err = anyhow::Error::new(ApiError::status(StatusCode::NOT_FOUND, "missing"));
            assert_eq!(for_error(&err), NOT_FOUND);

            let err = anyhow::Error::new(ApiError::status(StatusCode::UNAUTHORIZED, "invalid key"));
            assert_eq!(for_error(&err), AUTH_ERROR);

            let err = anyhow::anyhow!("something else");
            assert_eq!(for_error(&err), ERROR);
        }
    }
}
