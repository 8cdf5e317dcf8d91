//! CLI entry-point for pattern extraction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use news_patterns::{
    config::Settings,
    data::export::OutputFormat,
    patterns::PatternKind,
    pipeline::{self, ExtractRequest},
};

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Corpus CSV (defaults to `<DATA_DIR>/news_articles_dataset.csv`).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Column holding the text to mine.
    #[arg(long, default_value = "ARTICLES")]
    pub text_column: String,
    /// Column holding the category label.
    #[arg(long, default_value = "CATEGORIES")]
    pub category_column: String,
    /// Rules to run; defaults to the PATTERNS setting.
    #[arg(long, value_delimiter = ',', value_enum)]
    pub patterns: Vec<PatternKind>,
    /// Per-category sampling fraction; defaults to the SAMPLE_FRAC setting.
    #[arg(long)]
    pub sample_frac: Option<f64>,
    /// Sampling seed; defaults to the SAMPLE_SEED setting.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Pass texts to the parser unchanged.
    #[arg(long)]
    pub raw: bool,
    /// Read parses from a CoNLL-U store instead of the HTTP service.
    #[arg(long)]
    pub conllu: Option<PathBuf>,
    /// Format of the segregated tables.
    #[arg(long, default_value = "csv", value_enum)]
    pub format: OutputFormat,
    /// Abort on the first text that cannot be parsed.
    #[arg(long)]
    pub fail_fast: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let request = ExtractRequest {
        input: args
            .input
            .unwrap_or_else(|| settings.join_data("news_articles_dataset.csv")),
        text_column: args.text_column,
        category_column: args.category_column,
        kinds: if args.patterns.is_empty() {
            settings.patterns.clone()
        } else {
            args.patterns
        },
        sample_frac: args.sample_frac.unwrap_or(settings.sample_frac),
        seed: args.seed.unwrap_or(settings.sample_seed),
        preprocess: !args.raw,
        conllu: args.conllu,
        format: args.format,
        fail_fast: args.fail_fast,
    };

    let summaries =
        tokio::task::spawn_blocking(move || pipeline::run_extraction(&settings, &request))
            .await
            .context("extraction task")??;
    for summary in &summaries {
        info!(
            rule = %summary.kind,
            matches = summary.matches,
            records = summary.records,
            skipped = summary.skipped,
            failed_rows = summary.failed_rows,
            "rule summary"
        );
        println!(
            "{}\tmatches={}\trecords={}\tskipped={}\tfailed_rows={}",
            summary.kind, summary.matches, summary.records, summary.skipped, summary.failed_rows
        );
    }
    Ok(())
}
