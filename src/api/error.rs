//
//  trello-api
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error types for the Trello API client.
//!
//! Every failure leaving the client is an [`ApiError`]. The variants are
//! *kinds*, not wrappers around a particular HTTP library: errors raised by
//! the transport are translated at the client's single request entry point,
//! and the underlying error is only reachable through
//! [`std::error::Error::source`].
//!
//! | Variant | Raised | Retryable |
//! |---------|--------|-----------|
//! | `Validation` | Before any request is built | No, fix the input |
//! | `Configuration` | While signing a request | No, library or setup bug |
//! | `Protocol` | Building or interpreting a request | No, client-side bug |
//! | `Transport` | Sending or receiving | By the caller, if it chooses |
//!
//! # Example
//!
//! ```rust
//! use trello_api::api::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err {
//!         ApiError::Validation(_) => "fix your input",
//!         ApiError::Configuration(_) => "check the auth setup",
//!         ApiError::Protocol { .. } => "client bug",
//!         ApiError::Transport { .. } if err.is_timeout() => "timed out",
//!         ApiError::Transport { .. } => "network or server trouble",
//!     }
//! }
//!
//! let err = ApiError::Validation("Label \"chartreuse\" does not exist.".to_string());
//! assert_eq!(describe(&err), "fix your input");
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed, type-erased underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for all Trello API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A caller-supplied value is outside a known-valid set.
    ///
    /// Raised before any network I/O, e.g. for an unknown label colour or an
    /// unrecognized option name.
    #[error("{0}")]
    Validation(String),

    /// The selected authentication method is recognized but not implemented.
    #[error("{0} not yet implemented")]
    Configuration(String),

    /// A logic-level fault while constructing or interpreting a request.
    ///
    /// Malformed URLs, invalid header values and HTTP builder failures end up
    /// here.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Human-readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// An I/O-level fault while sending or receiving, or an error status.
    ///
    /// `status` is set when the server answered with a non-success status and
    /// the client is configured to treat that as an error.
    #[error("{}", transport_message(.message, .status))]
    Transport {
        /// Human-readable description.
        message: String,
        /// The HTTP status, when the server answered.
        status: Option<StatusCode>,
        /// Whether the failure was a timeout.
        timeout: bool,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },
}

fn transport_message(message: &str, status: &Option<StatusCode>) -> String {
    match status {
        Some(status) => format!("API error ({}): {}", status, message),
        None => format!("Transport error: {}", message),
    }
}

impl ApiError {
    /// Creates a [`ApiError::Protocol`] without an underlying cause.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a [`ApiError::Protocol`] wrapping an underlying cause.
    pub fn protocol_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Protocol {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a [`ApiError::Transport`] for an I/O failure.
    pub fn transport(message: impl Into<String>, timeout: bool, source: Option<BoxError>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            timeout,
            source,
        }
    }

    /// Creates a [`ApiError::Transport`] for a non-success status.
    ///
    /// The message is extracted from the response body, see
    /// [`format_api_error`].
    pub fn status(status: StatusCode, body: &str) -> Self {
        Self::Transport {
            message: format_api_error(body),
            status: Some(status),
            timeout: false,
            source: None,
        }
    }

    /// Returns the HTTP status code attached to this error, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timeout: true, .. })
    }

    /// Returns `true` if retrying the same request could succeed.
    ///
    /// Only transport failures qualify; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport {
                status: Some(status),
                ..
            } => status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS,
            _ => false,
        }
    }
}

/// Extracts a user-friendly message from a Trello error body.
///
/// Trello answers most errors with a plain-text body (`invalid id`,
/// `unauthorized permission requested`). Some endpoints return JSON of the
/// shape `{"message": "..."}` or `{"error": "..."}`. Falls back to the
/// trimmed body, or a placeholder for an empty one.
pub fn format_api_error(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }

        if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
            return error.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.to_string()
    }
}
