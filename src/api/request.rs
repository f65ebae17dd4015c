//
//  trello-api
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Construction
//!
//! A call on the client goes through two shapes:
//!
//! - [`PendingRequest`]: what the caller asked for (method, relative path,
//!   body, header overrides).
//! - [`FinalRequest`]: what the transport sends, after the API version
//!   prefix, GET query folding, header merging, authentication and URL
//!   resolution.
//!
//! [`RequestBuilder`] turns the first into the second without touching any
//! shared state.
//!
//! ## GET Query Folding
//!
//! A GET never carries a body. Form parameters given to a GET are encoded
//! into the query string instead:
//!
//! ```rust
//! use reqwest::header::HeaderMap;
//! use trello_api::api::{HttpMethod, PendingRequest, RequestBody, RequestBuilder, RequestOptions};
//! use trello_api::auth::AuthMethod;
//! use trello_api::config::ClientConfig;
//!
//! let config = ClientConfig::default();
//! let headers = HeaderMap::new();
//! let builder = RequestBuilder::new(&config, &headers, &AuthMethod::None);
//!
//! let pending = PendingRequest::new(
//!     HttpMethod::Get,
//!     "boards/abc",
//!     RequestBody::form([("fields", "name,url")]),
//!     HeaderMap::new(),
//! );
//! let request = builder.build(pending, &RequestOptions::default())?;
//!
//! assert_eq!(
//!     request.url.as_str(),
//!     "https://api.trello.com/1/boards/abc?fields=name%2Curl"
//! );
//! assert!(request.body.is_empty());
//! # Ok::<(), trello_api::api::ApiError>(())
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Url;

use super::encoding::{append_query, encode_query};
use super::ApiError;
use crate::auth::AuthMethod;
use crate::config::ClientConfig;

/// HTTP verbs supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// Returns `true` for verbs that send a form body by default.
    pub fn sends_form(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ApiError::Validation(format!(
                "Unsupported HTTP method: {}",
                s
            ))),
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Ordered form parameters.
    Form(Vec<(String, String)>),
    /// Pre-encoded bytes, sent as-is.
    Raw(Vec<u8>),
}

impl RequestBody {
    /// Builds a form body from key/value pairs.
    ///
    /// An empty set of pairs yields [`RequestBody::Empty`].
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        if pairs.is_empty() {
            Self::Empty
        } else {
            Self::Form(pairs)
        }
    }

    /// Builds a raw body. Empty input yields [`RequestBody::Empty`].
    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            Self::Empty
        } else {
            Self::Raw(bytes)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Form(pairs) => pairs.is_empty(),
            Self::Raw(bytes) => bytes.is_empty(),
        }
    }

    /// Returns the bytes that go on the wire, if any.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Empty => None,
            Self::Form(pairs) if pairs.is_empty() => None,
            Self::Form(pairs) => Some(encode_query(pairs).into_bytes()),
            Self::Raw(bytes) if bytes.is_empty() => None,
            Self::Raw(bytes) => Some(bytes.clone()),
        }
    }
}

/// Per-call overrides of the client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Overrides the configured timeout for this call only.
    pub timeout: Option<Duration>,
}

/// A request as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub method: HttpMethod,
    /// Relative target. After the version prefix it may also carry a query.
    pub path: String,
    pub body: RequestBody,
    pub headers: HeaderMap,
}

impl PendingRequest {
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            headers,
        }
    }
}

/// A fully-assembled request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Duration,
}

impl FinalRequest {
    /// Looks up a query parameter on the final URL.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Assembles [`FinalRequest`]s from the client's configuration.
pub struct RequestBuilder<'a> {
    config: &'a ClientConfig,
    default_headers: &'a HeaderMap,
    auth: &'a AuthMethod,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a ClientConfig, default_headers: &'a HeaderMap, auth: &'a AuthMethod) -> Self {
        Self {
            config,
            default_headers,
            auth,
        }
    }

    /// Builds the final request.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Protocol`] for a GET with a raw body, or a base URI or
    ///   target that does not form a valid URL
    /// - [`ApiError::Configuration`] from the active authentication method
    pub fn build(
        &self,
        pending: PendingRequest,
        options: &RequestOptions,
    ) -> Result<FinalRequest, ApiError> {
        let mut path = format!(
            "{}/{}",
            self.config.api_version(),
            pending.path.trim_start_matches('/')
        );
        let body = match (pending.method, pending.body) {
            (HttpMethod::Get, RequestBody::Form(pairs)) => {
                append_query(&mut path, &encode_query(&pairs));
                RequestBody::Empty
            }
            (HttpMethod::Get, RequestBody::Raw(bytes)) if !bytes.is_empty() => {
                return Err(ApiError::protocol("a GET request cannot carry a raw body"));
            }
            (HttpMethod::Get, _) => RequestBody::Empty,
            (_, body) => body,
        };

        let mut headers = self.default_headers.clone();
        merge_headers(&mut headers, &pending.headers);

        let signed = self.auth.apply(PendingRequest {
            method: pending.method,
            path,
            body,
            headers,
        })?;

        let url = self.resolve(&signed.path)?;

        Ok(FinalRequest {
            method: signed.method,
            url,
            headers: signed.headers,
            body: signed.body,
            timeout: options.timeout.unwrap_or_else(|| self.config.timeout()),
        })
    }

    fn resolve(&self, target: &str) -> Result<Url, ApiError> {
        let mut base_uri = self.config.base_uri().to_string();
        if !base_uri.ends_with('/') {
            base_uri.push('/');
        }

        let base = Url::parse(&base_uri)
            .map_err(|e| ApiError::protocol_with(format!("invalid base URI '{}'", base_uri), e))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::protocol(format!(
                "base URI '{}' cannot be used as a base",
                base_uri
            )));
        }

        base.join(target)
            .map_err(|e| ApiError::protocol_with("invalid request target", e))
    }
}

/// Overlays `overrides` onto `headers`.
///
/// Each overridden name replaces every existing value for that name and
/// keeps all of its own values.
pub(crate) fn merge_headers(headers: &mut HeaderMap, overrides: &HeaderMap) {
    for name in overrides.keys() {
        headers.remove(name);
        for value in overrides.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};

    fn build(
        config: &ClientConfig,
        auth: &AuthMethod,
        pending: PendingRequest,
    ) -> Result<FinalRequest, ApiError> {
        let headers = HeaderMap::new();
        RequestBuilder::new(config, &headers, auth).build(pending, &RequestOptions::default())
    }

    #[test]
    fn test_version_prefix() {
        let config = ClientConfig::default();
        let pending = PendingRequest::new(HttpMethod::Get, "/members/me", RequestBody::Empty, HeaderMap::new());
        let request = build(&config, &AuthMethod::None, pending).unwrap();
        assert_eq!(request.url.as_str(), "https://api.trello.com/1/members/me");
    }

    #[test]
    fn test_get_folds_body_into_query() {
        let config = ClientConfig::default();
        let pending = PendingRequest::new(
            HttpMethod::Get,
            "search",
            RequestBody::form([("query", "due soon"), ("modelTypes", "cards")]),
            HeaderMap::new(),
        );
        let request = build(&config, &AuthMethod::None, pending).unwrap();

        assert_eq!(request.url.query(), Some("query=due+soon&modelTypes=cards"));
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_get_appends_to_existing_query() {
        let config = ClientConfig::default();
        let pending = PendingRequest::new(
            HttpMethod::Get,
            "boards/b1/cards?filter=open",
            RequestBody::form([("fields", "name")]),
            HeaderMap::new(),
        );
        let request = build(&config, &AuthMethod::None, pending).unwrap();
        assert_eq!(request.url.query(), Some("filter=open&fields=name"));
    }

    #[test]
    fn test_get_rejects_raw_body() {
        let config = ClientConfig::default();
        let pending = PendingRequest::new(HttpMethod::Get, "boards", RequestBody::raw("x"), HeaderMap::new());
        let err = build(&config, &AuthMethod::None, pending).unwrap_err();
        assert!(matches!(err, ApiError::Protocol { .. }));
    }

    #[test]
    fn test_other_verbs_preserve_body() {
        let config = ClientConfig::default();
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch, HttpMethod::Delete] {
            let body = RequestBody::form([("value", "red")]);
            let pending = PendingRequest::new(method, "cards/c1/labels", body.clone(), HeaderMap::new());
            let request = build(&config, &AuthMethod::None, pending).unwrap();
            assert_eq!(request.body, body);
            assert_eq!(request.url.query(), None);
        }
    }

    #[test]
    fn test_caller_headers_win() {
        let config = ClientConfig::default();
        let mut defaults = HeaderMap::new();
        defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));
        defaults.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let mut overrides = HeaderMap::new();
        overrides.insert("content-type", HeaderValue::from_static("application/json"));

        let pending = PendingRequest::new(HttpMethod::Post, "cards", RequestBody::Empty, overrides);
        let request = RequestBuilder::new(&config, &defaults, &AuthMethod::None)
            .build(pending, &RequestOptions::default())
            .unwrap();

        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_multi_valued_caller_header_kept() {
        let config = ClientConfig::default();
        let mut defaults = HeaderMap::new();
        defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut overrides = HeaderMap::new();
        overrides.append(ACCEPT, HeaderValue::from_static("text/a"));
        overrides.append(ACCEPT, HeaderValue::from_static("text/b"));

        let pending = PendingRequest::new(HttpMethod::Get, "cards", RequestBody::Empty, overrides);
        let request = RequestBuilder::new(&config, &defaults, &AuthMethod::None)
            .build(pending, &RequestOptions::default())
            .unwrap();

        let accept: Vec<_> = request.headers.get_all(ACCEPT).iter().collect();
        assert_eq!(accept, ["text/a", "text/b"]);
    }

    #[test]
    fn test_auth_applied_after_query_folding() {
        let config = ClientConfig::default();
        let auth = AuthMethod::UrlClientIdAndToken(Credentials::new("k1", Some("t1")));
        let pending = PendingRequest::new(
            HttpMethod::Get,
            "members/me",
            RequestBody::form([("fields", "username")]),
            HeaderMap::new(),
        );
        let request = build(&config, &auth, pending).unwrap();
        assert_eq!(request.url.query(), Some("fields=username&key=k1&token=t1"));
    }

    #[test]
    fn test_base_uri_without_trailing_slash() {
        let config = ClientConfig::default().with_base_uri("http://localhost:9000/trello");
        let pending = PendingRequest::new(HttpMethod::Get, "boards/b1", RequestBody::Empty, HeaderMap::new());
        let request = build(&config, &AuthMethod::None, pending).unwrap();
        assert_eq!(request.url.as_str(), "http://localhost:9000/trello/1/boards/b1");
    }

    #[test]
    fn test_invalid_base_uri_is_protocol_error() {
        let config = ClientConfig::default().with_base_uri("::not a url::");
        let pending = PendingRequest::new(HttpMethod::Get, "boards", RequestBody::Empty, HeaderMap::new());
        let err = build(&config, &AuthMethod::None, pending).unwrap_err();
        assert!(matches!(err, ApiError::Protocol { .. }));
    }

    #[test]
    fn test_timeout_override() {
        let config = ClientConfig::default();
        let headers = HeaderMap::new();
        let options = RequestOptions {
            timeout: Some(Duration::from_millis(250)),
        };
        let pending = PendingRequest::new(HttpMethod::Get, "boards", RequestBody::Empty, HeaderMap::new());
        let request = RequestBuilder::new(&config, &headers, &AuthMethod::None)
            .build(pending, &options)
            .unwrap();
        assert_eq!(request.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }
}
