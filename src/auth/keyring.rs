//
//  trello-api
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Credential Storage Module
//!
//! Stores the Trello API key and token in the system's native keyring so the
//! CLI never writes them to its configuration file.
//!
//! ## Platform Support
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `trello-api`
//! - **Entry name**: [`API_KEY_ENTRY`] or [`API_TOKEN_ENTRY`]
//! - **Password/Value**: the secret itself
//!
//! ## Example
//!
//! ```rust,no_run
//! use trello_api::auth::{KeyringStore, API_TOKEN_ENTRY};
//!
//! fn manage_credentials() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!
//!     store.store(API_TOKEN_ENTRY, "0123456789abcdef")?;
//!
//!     if let Some(token) = store.get(API_TOKEN_ENTRY)? {
//!         println!("Found stored token ({} chars)", token.len());
//!     }
//!
//!     store.delete(API_TOKEN_ENTRY)?;
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "trello-api";

/// Entry holding the application's API key.
pub const API_KEY_ENTRY: &str = "api_key";

/// Entry holding the user's API token.
pub const API_TOKEN_ENTRY: &str = "api_token";

/// Secure credential storage using the system's native keyring service.
///
/// # Notes
///
/// - The keyring may require user interaction on first access.
/// - On Linux, a secret service daemon must be running.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store for the `trello-api` service.
    ///
    /// No keyring access occurs during construction.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Creates or overwrites an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyring service is unavailable or access is
    /// denied.
    pub fn store(&self, name: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(&self.service, name)?;
        entry.set_password(secret)?;
        Ok(())
    }

    /// Reads an entry, returning `Ok(None)` when it does not exist.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, name)?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes an entry. Deleting a missing entry succeeds.
    pub fn delete(&self, name: &str) -> Result<()> {
        let entry = Entry::new(&self.service, name)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the stored key and token.
    pub fn credentials(&self) -> Result<(Option<String>, Option<String>)> {
        Ok((self.get(API_KEY_ENTRY)?, self.get(API_TOKEN_ENTRY)?))
    }
}
