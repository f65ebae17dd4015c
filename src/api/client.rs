//
//  trello-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Trello API
//!
//! [`HttpClient`] is the single entry point every API call goes through. It
//! owns the configuration, the default headers, the active authentication
//! method and the transport, and remembers the last request/response pair
//! for inspection.
//!
//! ## Features
//!
//! - API version prefixing and GET query folding
//! - Query-string authentication (`key`/`token`)
//! - Form-encoded bodies by default for POST, PUT and PATCH
//! - Translation of transport failures into [`ApiError`]
//!
//! ## Ownership
//!
//! Every call takes `&mut self`: a client serves one caller at a time, and
//! concurrent users each hold their own client. No locking is involved.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};

use super::request::{
    merge_headers, FinalRequest, HttpMethod, PendingRequest, RequestBody, RequestBuilder,
    RequestOptions,
};
use super::transport::{ReqwestTransport, Response, Transport, TransportFault};
use super::ApiError;
use crate::auth::{AuthMethod, AuthScheme};
use crate::config::{ClientConfig, ClientOption};

/// Content type used for form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The main HTTP client for interacting with the Trello API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use trello_api::api::HttpClient;
/// use trello_api::auth::AuthScheme;
/// use trello_api::config::ClientConfig;
///
/// let mut client = HttpClient::new(ClientConfig::default())?;
/// client.authenticate("your-api-key", Some("your-token"), AuthScheme::UrlClientId);
/// # Ok::<(), trello_api::api::ApiError>(())
/// ```
///
/// # Making Requests
///
/// ```rust,no_run
/// use reqwest::header::HeaderMap;
/// use trello_api::api::{HttpClient, RequestBody};
/// use trello_api::config::ClientConfig;
///
/// # async fn example() -> Result<(), trello_api::api::ApiError> {
/// let mut client = HttpClient::new(ClientConfig::default())?;
/// let response = client
///     .get("members/me/boards", RequestBody::form([("fields", "name")]), HeaderMap::new())
///     .await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
pub struct HttpClient {
    config: ClientConfig,
    headers: HeaderMap,
    auth: AuthMethod,
    transport: Box<dyn Transport>,
    last_request: Option<FinalRequest>,
    last_response: Option<Response>,
}

impl HttpClient {
    /// Creates a client that sends requests with `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] if the HTTP client cannot be created
    /// or the configured user agent is not a valid header value.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new().map_err(translate_fault)?;
        Self::with_transport(config, transport)
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, ApiError> {
        let mut client = Self {
            config,
            headers: HeaderMap::new(),
            auth: AuthMethod::None,
            transport: Box::new(transport),
            last_request: None,
            last_response: None,
        };
        client.clear_headers()?;
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Overrides one configuration option.
    ///
    /// Overriding the user agent also refreshes the `User-Agent` default
    /// header.
    pub fn set_option(&mut self, option: ClientOption) -> Result<(), ApiError> {
        if let ClientOption::UserAgent(user_agent) = &option {
            let value = header_value(user_agent)?;
            self.headers.insert(USER_AGENT, value);
        }
        self.config = self.config.clone().with_option(option);
        Ok(())
    }

    /// Returns the default headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Merges headers into the defaults.
    ///
    /// A name present in `headers` replaces the default for that name and
    /// keeps every value given for it.
    pub fn set_headers(&mut self, headers: HeaderMap) {
        merge_headers(&mut self.headers, &headers);
    }

    /// Resets the default headers to `Accept` and `User-Agent`.
    pub fn clear_headers(&mut self) -> Result<(), ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(self.config.user_agent())?);
        self.headers = headers;
        Ok(())
    }

    /// Selects the authentication method used for every following request.
    ///
    /// Passing [`AuthScheme::None`] turns authentication off.
    pub fn authenticate(&mut self, credential: &str, secret: Option<&str>, scheme: AuthScheme) {
        self.auth = AuthMethod::from_scheme(scheme, credential, secret);
    }

    pub fn auth_method(&self) -> &AuthMethod {
        &self.auth
    }

    /// The last request that completed successfully.
    pub fn last_request(&self) -> Option<&FinalRequest> {
        self.last_request.as_ref()
    }

    /// The response to [`last_request`](Self::last_request).
    pub fn last_response(&self) -> Option<&Response> {
        self.last_response.as_ref()
    }

    /// Sends a GET request. A form body becomes the query string.
    pub async fn get(
        &mut self,
        path: &str,
        parameters: RequestBody,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.request(path, parameters, HttpMethod::Get, headers, &RequestOptions::default())
            .await
    }

    /// Sends a POST request, form-encoded unless `Content-Type` is given.
    pub async fn post(
        &mut self,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.request(path, body, HttpMethod::Post, with_form_content_type(headers), &RequestOptions::default())
            .await
    }

    /// Sends a PUT request, form-encoded unless `Content-Type` is given.
    pub async fn put(
        &mut self,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.request(path, body, HttpMethod::Put, with_form_content_type(headers), &RequestOptions::default())
            .await
    }

    /// Sends a PATCH request, form-encoded unless `Content-Type` is given.
    pub async fn patch(
        &mut self,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.request(path, body, HttpMethod::Patch, with_form_content_type(headers), &RequestOptions::default())
            .await
    }

    /// Sends a DELETE request.
    pub async fn delete(
        &mut self,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.request(path, body, HttpMethod::Delete, headers, &RequestOptions::default())
            .await
    }

    /// Builds, signs and sends a request.
    ///
    /// On success the request and response become the last pair. On failure
    /// the previous pair is kept as it was.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Protocol`] if the request cannot be built, or the
    ///   transport reports a logic fault
    /// - [`ApiError::Configuration`] if the active auth method is not
    ///   implemented
    /// - [`ApiError::Transport`] on I/O failure, or on a non-2xx status when
    ///   `http_errors` is enabled
    pub async fn request(
        &mut self,
        path: &str,
        body: RequestBody,
        method: HttpMethod,
        headers: HeaderMap,
        options: &RequestOptions,
    ) -> Result<Response, ApiError> {
        let pending = PendingRequest::new(method, path, body, headers);
        let request = RequestBuilder::new(&self.config, &self.headers, &self.auth)
            .build(pending, options)?;

        tracing::debug!("{} {}", method, path);

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(fault) => {
                let err = translate_fault(fault);
                tracing::warn!("{} {} failed: {}", method, path, err);
                return Err(err);
            }
        };

        tracing::debug!("{} {} returned {}", method, path, response.status);

        if self.config.http_errors() && !response.is_success() {
            return Err(ApiError::status(response.status, &response.text()));
        }

        self.last_request = Some(request);
        self.last_response = Some(response.clone());

        Ok(response)
    }
}

/// Translates a transport's failure into the client's error kinds.
fn translate_fault(fault: TransportFault) -> ApiError {
    match fault {
        TransportFault::Logic(source) => ApiError::Protocol {
            message: source.to_string(),
            source: Some(source),
        },
        TransportFault::Io { source, timeout } => {
            let message = if timeout {
                format!("request timed out: {}", source)
            } else {
                source.to_string()
            };
            ApiError::transport(message, timeout, Some(source))
        }
    }
}

fn with_form_content_type(mut headers: HeaderMap) -> HeaderMap {
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    }
    headers
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::protocol_with(format!("invalid header value '{}'", value), e))
}
