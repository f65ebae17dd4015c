//
//  trello-api
//  api/card/labels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Card labels API.
//!
//! Trello cards carry coloured labels. Colours come from a fixed palette,
//! so they are checked locally before anything is sent.
//!
//! # Label Colours
//!
//! `all`, `green`, `yellow`, `orange`, `red`, `purple`, `blue`, `sky`,
//! `lime`, `pink`, `black`
//!
//! # Example
//!
//! ```rust,no_run
//! use trello_api::api::HttpClient;
//! use trello_api::auth::AuthScheme;
//! use trello_api::config::ClientConfig;
//!
//! # async fn example() -> Result<(), trello_api::api::ApiError> {
//! let mut client = HttpClient::new(ClientConfig::default())?;
//! client.authenticate("key", Some("token"), AuthScheme::UrlClientId);
//!
//! client.card_labels().set("5f1a2b3c", &["red", "blue"]).await?;
//! client.card_labels().remove("5f1a2b3c", "60aa01ff").await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderMap;

use crate::api::resource::{expand_path, path_segment};
use crate::api::{ApiError, HttpClient, RequestBody, Response};

/// Path template for a card's labels.
const PATH: &str = "cards/#id#/labels";

/// A label colour accepted by Trello.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelColor {
    All,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Blue,
    Sky,
    Lime,
    Pink,
    Black,
}

impl LabelColor {
    /// The full palette.
    pub const ALL: [LabelColor; 11] = [
        Self::All,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Red,
        Self::Purple,
        Self::Blue,
        Self::Sky,
        Self::Lime,
        Self::Pink,
        Self::Black,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Sky => "sky",
            Self::Lime => "lime",
            Self::Pink => "pink",
            Self::Black => "black",
        }
    }

    /// Parses every label, failing on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(labels: &[S]) -> Result<Vec<LabelColor>, ApiError> {
        labels.iter().map(|label| label.as_ref().parse()).collect()
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelColor {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| ApiError::Validation(format!("Label \"{}\" does not exist.", s)))
    }
}

/// Card labels resource, borrowed from an [`HttpClient`].
pub struct Labels<'a> {
    client: &'a mut HttpClient,
}

impl<'a> Labels<'a> {
    pub fn new(client: &'a mut HttpClient) -> Self {
        Self { client }
    }

    /// Adds labels to a card, one request per label.
    ///
    /// Every label is validated before the first request, so an unknown
    /// colour means nothing is sent.
    ///
    /// # Parameters
    ///
    /// * `id` - The card's id or short link
    /// * `labels` - Colour names
    ///
    /// # Returns
    ///
    /// The response to the last request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty list, an unknown
    /// colour or an unusable card id, otherwise whatever the client returns.
    pub async fn set<S: AsRef<str>>(&mut self, id: &str, labels: &[S]) -> Result<Response, ApiError> {
        let colors = LabelColor::parse_all(labels)?;
        let (last, rest) = colors
            .split_last()
            .ok_or_else(|| ApiError::Validation("At least one label is required.".to_string()))?;

        let path = expand_path(PATH, id)?;
        for color in rest {
            self.add(&path, *color).await?;
        }
        self.add(&path, *last).await
    }

    /// Removes a label from a card.
    ///
    /// # Parameters
    ///
    /// * `id` - The card's id or short link
    /// * `label_id` - The label to remove
    ///
    /// An empty id or a `.`/`..` id fails with [`ApiError::Validation`]
    /// before anything is sent.
    pub async fn remove(&mut self, id: &str, label_id: &str) -> Result<Response, ApiError> {
        let path = format!(
            "{}/idLabels/{}",
            expand_path(PATH, id)?,
            path_segment(label_id)?
        );
        self.client
            .delete(&path, RequestBody::Empty, HeaderMap::new())
            .await
    }

    async fn add(&mut self, path: &str, color: LabelColor) -> Result<Response, ApiError> {
        self.client
            .post(path, RequestBody::form([("value", color.as_str())]), HeaderMap::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use crate::api::{FinalRequest, HttpMethod, Transport, TransportFault};
    use crate::config::ClientConfig;

    /// Records every request it is asked to send.
    #[derive(Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<FinalRequest>>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: &FinalRequest) -> Result<Response, TransportFault> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(Response::new(StatusCode::OK, HeaderMap::new(), "[]"))
        }
    }

    fn client() -> (HttpClient, Arc<Mutex<Vec<FinalRequest>>>) {
        let transport = RecordingTransport::default();
        let sent = transport.sent.clone();
        let client = HttpClient::with_transport(ClientConfig::default(), transport).unwrap();
        (client, sent)
    }

    #[tokio::test]
    async fn test_unknown_color_sends_nothing() {
        let (mut client, sent) = client();

        let err = client
            .card_labels()
            .set("c1", &["red", "chartreuse"])
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(message) => {
                assert_eq!(message, "Label \"chartreuse\" does not exist.")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(sent.lock().unwrap().is_empty());
        assert!(client.last_request().is_none());
    }

    #[tokio::test]
    async fn test_set_posts_one_request_per_label() {
        let (mut client, sent) = client();

        client.card_labels().set("c1", &["red", "sky"]).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        for (request, color) in sent.iter().zip(["red", "sky"]) {
            assert_eq!(request.method, HttpMethod::Post);
            assert_eq!(request.url.path(), "/1/cards/c1/labels");
            assert_eq!(request.body, RequestBody::form([("value", color)]));
        }
    }

    #[tokio::test]
    async fn test_set_requires_a_label() {
        let (mut client, sent) = client();
        let none: [&str; 0] = [];
        let err = client.card_labels().set("c1", &none).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_encodes_label_id() {
        let (mut client, sent) = client();

        client.card_labels().remove("c1", "label one").await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent[0].method, HttpMethod::Delete);
        assert_eq!(sent[0].url.path(), "/1/cards/c1/labels/idLabels/label%20one");
        assert!(sent[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_remove_rejects_dot_segments() {
        let (mut client, sent) = client();

        for (card, label) in [("c1", ".."), ("c1", "."), ("c1", ""), ("..", "l1")] {
            let err = client.card_labels().remove(card, label).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{card}/{label}");
        }
        assert!(sent.lock().unwrap().is_empty());
        assert!(client.last_request().is_none());
    }

    #[tokio::test]
    async fn test_set_rejects_dot_card_id() {
        let (mut client, sent) = client();

        let err = client.card_labels().set("..", &["red"]).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("lime".parse::<LabelColor>().unwrap(), LabelColor::Lime);
        assert!("Red".parse::<LabelColor>().is_err());
        assert_eq!(LabelColor::ALL.len(), 11);
    }
}
