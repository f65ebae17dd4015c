//
//  trello-api
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport
//!
//! The [`Transport`] trait is the seam between the client and the network.
//! [`ReqwestTransport`] is the production implementation; tests plug in
//! their own.
//!
//! A transport reports failures as [`TransportFault`], which only
//! distinguishes the two shapes the client cares about:
//!
//! - **Logic** faults: the request could not be built or interpreted
//!   (invalid header, unusable URL).
//! - **I/O** faults: sending or receiving failed (connection refused, reset,
//!   timeout, truncated body).
//!
//! The client turns these into [`ApiError`](super::ApiError) values; a
//! transport's own error types never reach the caller.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::error::BoxError;
use super::request::FinalRequest;

/// A received HTTP response. The body is left undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// The failure shape reported by a [`Transport`].
#[derive(Debug)]
pub enum TransportFault {
    /// The request could not be built or interpreted.
    Logic(BoxError),
    /// Sending or receiving failed.
    Io {
        source: BoxError,
        timeout: bool,
    },
}

impl TransportFault {
    pub fn logic(source: impl Into<BoxError>) -> Self {
        Self::Logic(source.into())
    }

    pub fn io(source: impl Into<BoxError>) -> Self {
        Self::Io {
            source: source.into(),
            timeout: false,
        }
    }

    pub fn timeout(source: impl Into<BoxError>) -> Self {
        Self::Io {
            source: source.into(),
            timeout: true,
        }
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::logic(err)
        } else if err.is_timeout() {
            Self::timeout(err)
        } else {
            Self::io(err)
        }
    }
}

/// Sends a [`FinalRequest`] and returns the raw [`Response`].
///
/// Implementations must not retry and must not treat error statuses as
/// failures; status handling belongs to the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &FinalRequest) -> Result<Response, TransportFault>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's default settings.
    ///
    /// The user agent and timeout come from each request, not from here.
    /// A request whose timeout is zero is sent without one.
    pub fn new() -> Result<Self, TransportFault> {
        Ok(Self {
            http: Client::builder().build()?,
        })
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &FinalRequest) -> Result<Response, TransportFault> {
        let mut builder = self
            .http
            .request(request.method.to_reqwest(), request.url.clone())
            .headers(request.headers.clone());

        // A zero timeout means no timeout
        if !request.timeout.is_zero() {
            builder = builder.timeout(request.timeout);
        }

        if let Some(bytes) = request.body.to_bytes() {
            builder = builder.body(bytes);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Label {
        id: String,
        color: String,
    }

    #[test]
    fn test_response_json() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let response = Response::new(StatusCode::OK, headers, r#"{"id":"l1","color":"red"}"#);

        let label: Label = response.json().unwrap();
        assert_eq!(label.id, "l1");
        assert_eq!(label.color, "red");
        assert!(response.is_success());
    }

    #[test]
    fn test_response_text_is_lossy() {
        let response = Response::new(StatusCode::OK, HeaderMap::new(), vec![b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }

    #[test]
    fn test_fault_constructors() {
        let fault = TransportFault::timeout("deadline elapsed");
        assert!(matches!(fault, TransportFault::Io { timeout: true, .. }));

        let fault = TransportFault::logic("bad header");
        assert!(matches!(fault, TransportFault::Logic(_)));
    }
}
