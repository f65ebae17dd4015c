//
//  trello-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands for the Trello CLI.
//!
//! Trello signs requests with an application key and a user token. Both are
//! kept in the system keyring; the configuration file only records which
//! scheme to sign with.

use std::io::{self, BufRead};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use dialoguer::{Input, Password};

use crate::auth::{KeyringStore, API_KEY_ENTRY, API_TOKEN_ENTRY};
use crate::config::Config;

use super::GlobalOptions;

/// Manage Trello credentials.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store an API key and token
    Login(LoginArgs),

    /// Remove stored credentials
    Logout,

    /// View authentication status
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// API key (prompted for when omitted)
    #[arg(long, short = 'k')]
    pub key: Option<String>,

    /// Read token from standard input
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the stored credentials (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args),
            AuthSubcommand::Logout => logout(),
            AuthSubcommand::Status(args) => status(args, global),
        }
    }
}

/// Stores the key and token, prompting for whatever was not supplied.
fn login(args: &LoginArgs) -> Result<()> {
    let key = match &args.key {
        Some(key) => key.trim().to_string(),
        None => Input::<String>::new()
            .with_prompt("API key")
            .interact_text()?
            .trim()
            .to_string(),
    };

    let token = if args.with_token {
        read_token_from_stdin()?
    } else {
        Password::new().with_prompt("API token").interact()?
    };

    if !validate_token(&key) {
        bail!("Invalid API key format");
    }
    if !validate_token(&token) {
        bail!("Invalid token format");
    }

    let keyring = KeyringStore::new();
    keyring.store(API_KEY_ENTRY, &key)?;
    keyring.store(API_TOKEN_ENTRY, &token)?;

    println!("{} Credentials stored in the system keyring", style("✓").green());
    Ok(())
}

fn logout() -> Result<()> {
    let keyring = KeyringStore::new();
    keyring.delete(API_KEY_ENTRY)?;
    keyring.delete(API_TOKEN_ENTRY)?;

    println!("{} Logged out", style("✓").green());
    Ok(())
}

fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let scheme = config.auth_scheme()?;
    let (key, token) = KeyringStore::new().credentials()?;

    let shown = |value: &Option<String>| -> Option<String> {
        value.as_ref().map(|v| {
            if args.show_token {
                mask_token(v)
            } else {
                "stored".to_string()
            }
        })
    };

    if global.json {
        let result = serde_json::json!({
            "scheme": scheme.as_str(),
            "api_key": shown(&key),
            "api_token": shown(&token),
            "authenticated": key.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if key.is_none() && token.is_none() {
        println!("Not logged in");
        println!();
        println!("Run 'trello auth login' to authenticate");
        return Ok(());
    }

    println!("{}", style("api.trello.com").bold());
    println!("  Scheme: {}", scheme);
    println!(
        "  API key: {}",
        shown(&key).unwrap_or_else(|| style("missing").red().to_string())
    );
    println!(
        "  Token: {}",
        shown(&token).unwrap_or_else(|| style("missing").red().to_string())
    );

    Ok(())
}

fn read_token_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Keys and tokens are opaque, but never empty and never contain whitespace.
fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
