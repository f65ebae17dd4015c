//
//  trello-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Get, set and list the client options stored in the configuration file.
//! Values are validated the same way the client validates them, so a bad
//! timeout or an unknown auth scheme never reaches the file.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::Config;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(UnsetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        ensure_known_key(&args.key)?;
        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        config.set(&args.key, &args.value)?;
        config.save()?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": config.get(&args.key),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                args.value
            );
        }

        Ok(())
    }

    /// Unset a configuration value
    fn unset(&self, args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        config.unset(&args.key)?;
        config.save()?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    /// List all configuration values
    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let entries = config.entries();

        if global.json {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(key, value)| (key, serde_json::Value::String(value)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        println!();
        println!("{}", style("Configuration").bold());
        println!("{}", "-".repeat(50));
        for (key, value) in &entries {
            let marker = if config.get(key).is_some() {
                String::new()
            } else {
                style(" (default)").dim().to_string()
            };
            println!("  {}: {}{}", style(key).cyan(), value, marker);
        }
        println!();

        Ok(())
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }

        Ok(())
    }
}

fn ensure_known_key(key: &str) -> Result<()> {
    let keys = Config::keys();
    if !keys.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            keys.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_known_key() {
        assert!(ensure_known_key("timeout").is_ok());
        assert!(ensure_known_key("auth_scheme").is_ok());
        assert!(ensure_known_key("editor").is_err());
    }
}
