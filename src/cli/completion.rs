//
//  trello-api
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion commands

use anyhow::Result;
use clap::{Args, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    #[command(subcommand)]
    pub command: CompletionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CompletionSubcommand {
    /// Generate Bash completions
    Bash,

    /// Generate Zsh completions
    Zsh,

    /// Generate Fish completions
    Fish,

    /// Generate PowerShell completions
    Powershell,
}

impl CompletionSubcommand {
    fn shell(&self) -> Shell {
        match self {
            Self::Bash => Shell::Bash,
            Self::Zsh => Shell::Zsh,
            Self::Fish => Shell::Fish,
            Self::Powershell => Shell::PowerShell,
        }
    }
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let mut cmd = Cli::command();
        generate(
            self.command.shell(),
            &mut cmd,
            crate::APP_NAME,
            &mut std::io::stdout(),
        );
        Ok(())
    }
}
