//! Corpus assembly from per-category text files, plus loading and sampling.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Categories of the BBC-style news summary dataset.
pub const DEFAULT_CATEGORIES: &[&str] = &["business", "entertainment", "politics", "sport", "tech"];

/// One article with its reference summary, as written to the corpus CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub articles: String,
    pub summaries: String,
    pub categories: String,
}

/// A unit of text to mine, with its category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRow {
    pub text: String,
    pub category: String,
}

/// Pair `articles/<category>/*.txt` with `summaries/<category>/*.txt` by file-name order.
///
/// Files are decoded as ISO-8859-1. A category whose article and summary
/// counts differ is rejected.
pub fn assemble(
    articles_root: &Path,
    summaries_root: &Path,
    categories: &[String],
) -> Result<Vec<ArticleRecord>> {
    let mut records = Vec::new();
    for category in categories {
        let article_paths = list_text_files(&articles_root.join(category))?;
        let summary_paths = list_text_files(&summaries_root.join(category))?;
        info!(
            %category,
            articles = article_paths.len(),
            summaries = summary_paths.len(),
            "found category files"
        );
        if article_paths.len() != summary_paths.len() {
            bail!(
                "category {category}: {} article files but {} summary files",
                article_paths.len(),
                summary_paths.len()
            );
        }
        for (article, summary) in article_paths.iter().zip(&summary_paths) {
            records.push(ArticleRecord {
                articles: read_latin1(article)?,
                summaries: read_latin1(summary)?,
                categories: category.clone(),
            });
        }
    }
    info!(total = records.len(), "assembled corpus");
    Ok(records)
}

fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("txt")
        {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn read_latin1(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Write assembled records with `articles,summaries,categories` headers.
pub fn write_corpus(records: &[ArticleRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "wrote corpus csv");
    Ok(())
}

/// Load rows from a corpus CSV, picking the text and category columns case-insensitively.
pub fn load_rows(path: &Path, text_column: &str, category_column: &str) -> Result<Vec<CorpusRow>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("{} has no column {name:?}", path.display()))
    };
    let text_idx = find(text_column)?;
    let category_idx = find(category_column)?;

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("read row {line}"))?;
        let (Some(text), Some(category)) = (record.get(text_idx), record.get(category_idx)) else {
            warn!(row = line, "short record; skipping");
            continue;
        };
        rows.push(CorpusRow {
            text: text.to_string(),
            category: category.to_string(),
        });
    }
    info!(path = %path.display(), rows = rows.len(), "loaded corpus rows");
    Ok(rows)
}

/// Per-category random sample of `frac * n` rows rounded half to even, deterministic for `seed`.
///
/// Categories appear in first-seen order; rows keep their corpus order.
pub fn stratified_sample(rows: &[CorpusRow], frac: f64, seed: u64) -> Vec<CorpusRow> {
    if frac >= 1.0 {
        return rows.to_vec();
    }
    let frac = frac.max(0.0);
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, row) in rows.iter().enumerate() {
        groups.entry(row.category.as_str()).or_default().push(idx);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sampled = Vec::new();
    for (category, members) in &groups {
        let take = ((members.len() as f64) * frac).round_ties_even() as usize;
        let mut picked = rand::seq::index::sample(&mut rng, members.len(), take).into_vec();
        picked.sort_unstable();
        info!(%category, total = members.len(), sampled = take, "sampled category");
        sampled.extend(picked.into_iter().map(|i| rows[members[i]].clone()));
    }
    sampled
}
