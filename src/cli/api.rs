//
//  trello-api
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! This command sends a request through the same client the resource
//! commands use, so it is versioned and signed with the stored credentials.
//! It's useful for endpoints that have no dedicated command, or for
//! debugging.
//!
//! ## Examples
//!
//! ```bash
//! # Fetch a card
//! trello api cards/5f1a2b3c
//!
//! # Rename a card
//! trello api -X PUT cards/5f1a2b3c -F name="New name"
//!
//! # Search with query parameters
//! trello api search -F query=release -F modelTypes=cards
//! ```

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use crate::api::{HttpMethod, RequestBody, RequestOptions, FORM_CONTENT_TYPE};

use super::{build_client, GlobalOptions};

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path, relative to the versioned base (e.g. cards/{id})
    pub path: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request headers (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Form fields as key=value; sent as the query string for GET
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Include response status and headers in output
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Suppress output (only fail on errors)
    #[arg(long)]
    pub silent: bool,

    /// Request timeout in seconds, 0 for none (defaults to the configured timeout)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        // Parse everything before touching the keyring
        let method: HttpMethod = self.method.parse()?;
        let body = self.build_body()?;
        let headers = self.build_headers(method)?;

        let options = RequestOptions {
            timeout: self.timeout.map(Duration::from_secs),
        };

        let mut client = build_client(global)?;
        let response = client
            .request(&self.path, body, method, headers, &options)
            .await?;

        // Print headers if requested
        if self.include {
            println!("{} {}", style("HTTP").dim(), response.status);
            for (name, value) in response.headers.iter() {
                println!("{}: {}", name, value.to_str().unwrap_or(""));
            }
            println!();
        }

        if self.silent {
            return Ok(());
        }

        // Try to parse as JSON and pretty-print
        match response.json::<Value>() {
            Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
            Err(_) => println!("{}", response.text()),
        }

        Ok(())
    }

    fn build_body(&self) -> Result<RequestBody> {
        if self.field.is_empty() {
            return Ok(RequestBody::Empty);
        }

        let pairs = self
            .field
            .iter()
            .map(|field| parse_field(field))
            .collect::<Result<Vec<_>>>()?;
        Ok(RequestBody::form(pairs))
    }

    /// Parses `-H` values. Methods that send a form default the content
    /// type the same way the client's verb methods do.
    fn build_headers(&self, method: HttpMethod) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for header in &self.header {
            let Some((name, value)) = header.split_once(':') else {
                bail!("Invalid header format: {}. Expected 'Name: Value'", header);
            };

            let name = HeaderName::from_bytes(name.trim().as_bytes())?;
            let value = HeaderValue::from_str(value.trim())?;
            headers.append(name, value);
        }

        if method.sends_form() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }

        Ok(headers)
    }
}

fn parse_field(field: &str) -> Result<(String, String)> {
    match field.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("Invalid field format: {}. Expected key=value", field),
    }
}
