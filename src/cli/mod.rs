//
//  trello-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod completion;
mod config;
mod label;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use label::LabelCommand;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::HttpClient;
use crate::auth::{AuthScheme, KeyringStore};
use crate::config::{ClientOption, Config};

/// Trello CLI - Work with the Trello API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "trello",
    version,
    about = "Work with the Trello API from the command line",
    long_about = "trello is a small CLI over the trello-api client.\n\n\
                  It manages credentials, card labels, and raw API calls.",
    propagate_version = true,
    after_help = "Use 'trello <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the API base URI
    #[arg(long, global = true, env = "TRELLO_BASE_URI")]
    pub base_uri: Option<String>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage Trello credentials
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage card labels
    Label(LabelCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Builds an authenticated client from the configuration file, the global
/// options and the keyring.
pub(crate) fn build_client(global: &GlobalOptions) -> Result<HttpClient> {
    let config = Config::load()?;
    let mut client_config = config.client_config();
    if let Some(base_uri) = &global.base_uri {
        client_config = client_config.with_option(ClientOption::parse("base_uri", base_uri)?);
    }

    let scheme = config.auth_scheme()?;
    let mut client = HttpClient::new(client_config)?;
    if scheme == AuthScheme::None {
        return Ok(client);
    }

    let (key, token) = KeyringStore::new()
        .credentials()
        .context("Failed to read credentials from the keyring")?;

    // url_token signs with the token first; every other scheme leads with the key.
    let (credential, secret) = match scheme {
        AuthScheme::UrlToken => (token, key),
        _ => (key, token),
    };
    let credential = credential
        .ok_or_else(|| anyhow::anyhow!("Not authenticated. Run 'trello auth login' first."))?;

    client.authenticate(&credential, secret.as_deref(), scheme);
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "trello",
            "--json",
            "--base-uri",
            "http://localhost:3000/",
            "version",
        ])
        .unwrap();

        assert!(cli.global.json);
        assert_eq!(cli.global.base_uri.as_deref(), Some("http://localhost:3000/"));
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_label_set() {
        let cli = Cli::try_parse_from(["trello", "label", "set", "card-1", "red", "blue"]).unwrap();
        assert!(matches!(cli.command, Commands::Label(_)));
    }
}
