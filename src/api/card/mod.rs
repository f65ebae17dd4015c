//
//  trello-api
//  api/card/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Card resources.
//!
//! - [`labels`] - Setting and removing a card's coloured labels

pub mod labels;

pub use labels::{LabelColor, Labels};

use crate::api::HttpClient;

impl HttpClient {
    /// Returns the card labels API bound to this client.
    pub fn card_labels(&mut self) -> Labels<'_> {
        Labels::new(self)
    }
}
