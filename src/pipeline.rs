//! End-to-end extraction: load, sample, clean, annotate, segregate, export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    config::Settings,
    data::{
        corpus::{self, CorpusRow},
        export::{self, OutputFormat},
        preprocess,
    },
    nlp::{self, DependencyParser},
    patterns::{segregate, FinderOptions, PatternFinder, PatternKind},
};

/// Inputs for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub input: PathBuf,
    pub text_column: String,
    pub category_column: String,
    pub kinds: Vec<PatternKind>,
    pub sample_frac: f64,
    pub seed: u64,
    pub preprocess: bool,
    pub conllu: Option<PathBuf>,
    pub format: OutputFormat,
    pub fail_fast: bool,
}

/// Per-rule counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    pub kind: PatternKind,
    pub matches: usize,
    pub records: usize,
    pub skipped: usize,
    pub failed_rows: usize,
}

/// Load the corpus and run the extraction with the configured parse provider.
pub fn run_extraction(settings: &Settings, request: &ExtractRequest) -> Result<Vec<RuleSummary>> {
    let parser = nlp::load_parser(settings, request.conllu.as_deref())?;
    let rows = corpus::load_rows(
        &request.input,
        &request.text_column,
        &request.category_column,
    )?;
    extract_rows(settings, request, &rows, parser)
}

/// Run the extraction over already loaded rows and write every output table.
pub fn extract_rows<P: DependencyParser>(
    settings: &Settings,
    request: &ExtractRequest,
    rows: &[CorpusRow],
    parser: P,
) -> Result<Vec<RuleSummary>> {
    let mut rows = corpus::stratified_sample(rows, request.sample_frac, request.seed);
    if request.preprocess {
        for row in &mut rows {
            row.text = preprocess::preprocess_text(&row.text);
        }
        info!(rows = rows.len(), "preprocessed texts");
    }

    let finder = PatternFinder::new(parser, request.kinds.iter().copied()).with_options(
        FinderOptions {
            fail_fast: request.fail_fast,
        },
    );
    let annotated = finder.process(&rows).context("pattern extraction")?;
    export::write_annotated(
        &annotated,
        finder.kinds(),
        &settings.join_output("annotated.csv"),
    )?;
    let failed = export::write_failures(&annotated, &settings.join_output("failures.csv"))?;
    if failed > 0 {
        warn!(failed, "some rows could not be parsed, see failures.csv");
    }

    let mut summaries = Vec::new();
    for &kind in finder.kinds() {
        let seg = segregate(&annotated, kind);
        if !seg.skipped.is_empty() {
            warn!(rule = %kind, skipped = seg.skipped.len(), "some matches could not be segregated");
        }
        let table = settings.join_output(format!(
            "{}_segregated.{}",
            kind.name(),
            request.format.extension()
        ));
        export::write_segregated(&seg, &table, request.format)?;
        export::write_frequencies(
            &seg,
            &settings.join_output(format!("{}_frequencies.csv", kind.name())),
        )?;
        summaries.push(RuleSummary {
            kind,
            matches: seg.total_matches,
            records: seg.records.len(),
            skipped: seg.skipped.len(),
            failed_rows: annotated
                .iter()
                .filter(|row| row.failures.iter().any(|(k, _)| *k == kind))
                .count(),
        });
    }
    Ok(summaries)
}
