//
//  trello-api
//  cli/label.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Card label commands
//!
//! ## Examples
//!
//! ```bash
//! # Add the red and blue labels to a card
//! trello label set 5f1a2b3c red blue
//!
//! # Remove a label by id
//! trello label remove 5f1a2b3c 60d5c1e2f3
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use crate::api::card::LabelColor;
use crate::api::Response;

use super::{build_client, GlobalOptions};

/// Manage card labels
#[derive(Args, Debug)]
pub struct LabelCommand {
    #[command(subcommand)]
    pub command: LabelSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LabelSubcommand {
    /// Add colour labels to a card
    Set(SetArgs),

    /// Remove a label from a card
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Card id
    pub card: String,

    /// Label colours (all, green, yellow, orange, red, purple, blue, sky, lime, pink, black)
    #[arg(required = true)]
    pub colors: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Card id
    pub card: String,

    /// Label id
    pub label_id: String,
}

impl LabelCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            LabelSubcommand::Set(args) => set(args, global).await,
            LabelSubcommand::Remove(args) => remove(args, global).await,
        }
    }
}

async fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    // Reject unknown colours before reading credentials
    let colors = LabelColor::parse_all(&args.colors)?;

    let mut client = build_client(global)?;
    let response = client.card_labels().set(&args.card, &args.colors).await?;

    if global.json {
        print_json(&response)?;
    } else {
        let names: Vec<&str> = colors.iter().map(|color| color.as_str()).collect();
        println!(
            "{} Added {} to card {}",
            style("✓").green(),
            style(names.join(", ")).cyan(),
            args.card
        );
    }

    Ok(())
}

async fn remove(args: &RemoveArgs, global: &GlobalOptions) -> Result<()> {
    let mut client = build_client(global)?;
    let response = client
        .card_labels()
        .remove(&args.card, &args.label_id)
        .await?;

    if global.json {
        print_json(&response)?;
    } else {
        println!(
            "{} Removed label {} from card {}",
            style("✓").green(),
            style(&args.label_id).cyan(),
            args.card
        );
    }

    Ok(())
}

fn print_json(response: &Response) -> Result<()> {
    match response.json::<Value>() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", response.text()),
    }
    Ok(())
}
