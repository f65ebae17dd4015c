//
//  trello-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Trello authenticates API calls with an application key and a user token,
//! both passed as query parameters. This module models the supported ways of
//! attaching them to a request and stores them securely for the CLI.
//!
//! ## Supported Authentication Methods
//!
//! | Scheme | Query parameters added |
//! |--------|------------------------|
//! | `none` | nothing |
//! | `url_client_id` | `key=<credential>&token=<secret>` |
//! | `url_token` | `token=<credential>&key=<secret>` |
//! | `http_password` | not yet implemented |
//! | `http_token` | not yet implemented |
//!
//! The two URL schemes are not aliases: each binds the credential and the
//! secret to a fixed parameter name.
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secure credential storage using the system keyring
//!
//! ## Example
//!
//! ```rust
//! use trello_api::auth::{AuthMethod, AuthScheme};
//!
//! let method = AuthMethod::from_scheme(AuthScheme::UrlToken, "my-token", Some("my-key"));
//! assert_eq!(method.scheme(), AuthScheme::UrlToken);
//! ```

mod keyring;

pub use self::keyring::*;

use std::fmt;
use std::str::FromStr;

use crate::api::encoding::{append_query, encode_query};
use crate::api::{ApiError, PendingRequest};

/// The data needed to sign a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Primary credential (API key or token, depending on the scheme).
    pub credential: String,
    /// Optional secondary secret.
    pub secret: Option<String>,
}

impl Credentials {
    pub fn new(credential: impl Into<String>, secret: Option<&str>) -> Self {
        Self {
            credential: credential.into(),
            secret: secret.map(str::to_string),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("credential", &"<redacted>")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Names a way of authenticating, without the credentials themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthScheme {
    #[default]
    None,
    UrlClientId,
    UrlToken,
    HttpPassword,
    HttpToken,
}

impl AuthScheme {
    /// Every scheme, in documentation order.
    pub const ALL: [AuthScheme; 5] = [
        Self::None,
        Self::UrlClientId,
        Self::UrlToken,
        Self::HttpPassword,
        Self::HttpToken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::UrlClientId => "url_client_id",
            Self::UrlToken => "url_token",
            Self::HttpPassword => "http_password",
            Self::HttpToken => "http_token",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthScheme {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|scheme| scheme.as_str()).collect();
                ApiError::Validation(format!(
                    "Unknown authentication method '{}'. Valid methods: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// The active authentication method of a client, with its credentials.
///
/// # Variants
///
/// - `None`: requests are sent unsigned (the default).
/// - `UrlClientIdAndToken`: credential as `key`, secret as `token`.
/// - `UrlToken`: credential as `token`, secret as `key`.
/// - `HttpPassword` / `HttpToken`: recognized, but signing with them fails
///   with [`ApiError::Configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    None,
    UrlClientIdAndToken(Credentials),
    UrlToken(Credentials),
    HttpPassword(Credentials),
    HttpToken(Credentials),
}

impl AuthMethod {
    /// Pairs a scheme with its credentials.
    ///
    /// [`AuthScheme::None`] discards the credentials.
    pub fn from_scheme(scheme: AuthScheme, credential: &str, secret: Option<&str>) -> Self {
        let credentials = Credentials::new(credential, secret);
        match scheme {
            AuthScheme::None => Self::None,
            AuthScheme::UrlClientId => Self::UrlClientIdAndToken(credentials),
            AuthScheme::UrlToken => Self::UrlToken(credentials),
            AuthScheme::HttpPassword => Self::HttpPassword(credentials),
            AuthScheme::HttpToken => Self::HttpToken(credentials),
        }
    }

    pub fn scheme(&self) -> AuthScheme {
        match self {
            Self::None => AuthScheme::None,
            Self::UrlClientIdAndToken(_) => AuthScheme::UrlClientId,
            Self::UrlToken(_) => AuthScheme::UrlToken,
            Self::HttpPassword(_) => AuthScheme::HttpPassword,
            Self::HttpToken(_) => AuthScheme::HttpToken,
        }
    }

    /// Signs a request by appending credentials to its query string.
    ///
    /// A missing secret omits its parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for methods that are not
    /// implemented.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reqwest::header::HeaderMap;
    /// use trello_api::api::{HttpMethod, PendingRequest, RequestBody};
    /// use trello_api::auth::{AuthMethod, Credentials};
    ///
    /// let method = AuthMethod::UrlClientIdAndToken(Credentials::new("k1", Some("t1")));
    /// let request = PendingRequest::new(HttpMethod::Get, "1/members/me", RequestBody::Empty, HeaderMap::new());
    ///
    /// let signed = method.apply(request)?;
    /// assert_eq!(signed.path, "1/members/me?key=k1&token=t1");
    /// # Ok::<(), trello_api::api::ApiError>(())
    /// ```
    pub fn apply(&self, mut request: PendingRequest) -> Result<PendingRequest, ApiError> {
        let params = match self {
            Self::None => return Ok(request),
            Self::UrlClientIdAndToken(credentials) => query_params(credentials, "key", "token"),
            Self::UrlToken(credentials) => query_params(credentials, "token", "key"),
            Self::HttpPassword(_) | Self::HttpToken(_) => {
                return Err(ApiError::Configuration(self.scheme().to_string()));
            }
        };

        append_query(&mut request.path, &encode_query(&params));
        Ok(request)
    }
}

fn query_params<'a>(
    credentials: &'a Credentials,
    credential_name: &'static str,
    secret_name: &'static str,
) -> Vec<(&'static str, &'a str)> {
    let mut params = vec![(credential_name, credentials.credential.as_str())];
    if let Some(secret) = &credentials.secret {
        params.push((secret_name, secret.as_str()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpMethod, RequestBody};
    use reqwest::header::HeaderMap;

    fn pending(path: &str) -> PendingRequest {
        PendingRequest::new(HttpMethod::Get, path, RequestBody::Empty, HeaderMap::new())
    }

    #[test]
    fn test_none_leaves_request_unchanged() {
        let request = pending("1/boards/b1?fields=name");
        let signed = AuthMethod::None.apply(request.clone()).unwrap();
        assert_eq!(signed, request);
    }

    #[test]
    fn test_url_client_id_parameter_names() {
        let method = AuthMethod::from_scheme(AuthScheme::UrlClientId, "k1", Some("t1"));
        let signed = method.apply(pending("1/members/me")).unwrap();
        assert_eq!(signed.path, "1/members/me?key=k1&token=t1");
    }

    #[test]
    fn test_url_token_parameter_names() {
        let method = AuthMethod::from_scheme(AuthScheme::UrlToken, "tok", Some("key2"));
        let signed = method.apply(pending("1/members/me?fields=id")).unwrap();
        assert_eq!(signed.path, "1/members/me?fields=id&token=tok&key=key2");
    }

    #[test]
    fn test_missing_secret_is_omitted() {
        let method = AuthMethod::from_scheme(AuthScheme::UrlClientId, "k1", None);
        let signed = method.apply(pending("1/boards")).unwrap();
        assert_eq!(signed.path, "1/boards?key=k1");
    }

    #[test]
    fn test_credentials_are_encoded() {
        let method = AuthMethod::from_scheme(AuthScheme::UrlToken, "a b&c", Some("k"));
        let signed = method.apply(pending("1/boards")).unwrap();
        assert_eq!(signed.path, "1/boards?token=a+b%26c&key=k");
    }

    #[test]
    fn test_unimplemented_methods_fail() {
        for scheme in [AuthScheme::HttpPassword, AuthScheme::HttpToken] {
            let method = AuthMethod::from_scheme(scheme, "user", Some("pass"));
            let err = method.apply(pending("1/boards")).unwrap_err();
            match err {
                ApiError::Configuration(name) => assert_eq!(name, scheme.as_str()),
                other => panic!("expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("url_token".parse::<AuthScheme>().unwrap(), AuthScheme::UrlToken);
        assert!(matches!(
            "oauth".parse::<AuthScheme>(),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_none_scheme_discards_credentials() {
        let method = AuthMethod::from_scheme(AuthScheme::None, "k", Some("t"));
        assert_eq!(method, AuthMethod::None);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let credentials = Credentials::new("super-secret-key", Some("super-secret-token"));
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("super-secret"));
    }
}
