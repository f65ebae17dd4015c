//
//  trello-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module turns resource-oriented calls into authenticated HTTP requests
//! against the Trello REST API, and responses back into results or typed
//! errors.
//!
//! ## Architecture
//!
//! Leaf first:
//!
//! - [`transport`]: the [`Transport`] seam and its `reqwest` implementation
//! - [`request`]: request model and the [`RequestBuilder`]
//! - [`client`]: the [`HttpClient`] façade
//! - [`card`]: resource wrappers for cards (labels)
//!
//! Authentication lives in [`crate::auth`], client options in
//! [`crate::config`].
//!
//! ## Usage
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
//! let response = client.card_labels().set("5f1a2b3c", &["green"]).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - `Validation`: bad input, caught before any request
//! - `Configuration`: unimplemented authentication method
//! - `Protocol`: the request could not be built or interpreted
//! - `Transport`: network failure, timeout, or error status

pub mod card;
pub mod client;
pub mod encoding;
pub mod error;
pub mod request;
pub mod resource;
pub mod transport;

pub use client::{HttpClient, FORM_CONTENT_TYPE};
pub use error::ApiError;
pub use request::{
    FinalRequest, HttpMethod, PendingRequest, RequestBody, RequestBuilder, RequestOptions,
};
pub use transport::{ReqwestTransport, Response, Transport, TransportFault};
