//! Command-line interface wiring for news-patterns.

use anyhow::Result;
use clap::{Parser, Subcommand};

use news_patterns::config::Settings;

pub mod assemble;
pub mod extract;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Syntactic pattern mining for news corpora", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Assemble(args) => assemble::run(args, settings).await,
            Commands::Extract(args) => extract::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Combine per-category article and summary files into one corpus CSV.
    Assemble(assemble::Args),
    /// Mine syntactic patterns from a corpus CSV.
    Extract(extract::Args),
}
