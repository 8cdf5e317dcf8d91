//! CLI entry-point for corpus assembly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use news_patterns::{
    config::Settings,
    data::corpus::{self, DEFAULT_CATEGORIES},
};

/// Args for the `assemble` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Folder holding one sub-folder of article `.txt` files per category.
    #[arg(long)]
    pub articles: Option<PathBuf>,
    /// Folder holding one sub-folder of summary `.txt` files per category.
    #[arg(long)]
    pub summaries: Option<PathBuf>,
    /// Comma separated categories to include.
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
    /// Destination CSV (defaults to `<DATA_DIR>/news_articles_dataset.csv`).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let articles = args
        .articles
        .unwrap_or_else(|| settings.join_data("News Articles"));
    let summaries = args
        .summaries
        .unwrap_or_else(|| settings.join_data("Summaries"));
    let categories = if args.categories.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        args.categories
    };
    let output = args
        .output
        .unwrap_or_else(|| settings.join_data("news_articles_dataset.csv"));

    let records = tokio::task::spawn_blocking(move || {
        corpus::assemble(&articles, &summaries, &categories)
    })
    .await
    .context("assemble task")??;
    corpus::write_corpus(&records, &output)?;
    info!(rows = records.len(), path = %output.display(), "corpus ready");
    Ok(())
}
