//! Writers for annotated corpora, segregated tables and frequency counts.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use polars::prelude::{DataFrame, NamedFrom, ParquetWriter, Series};
use tracing::info;

use crate::patterns::{AnnotatedRow, PatternKind, Segregation, Slots};

/// Table format for segregated output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write TEXT, CATEGORY and one JSON-encoded match column per rule.
pub fn write_annotated(rows: &[AnnotatedRow], kinds: &[PatternKind], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    let mut header = vec!["TEXT", "CATEGORY"];
    header.extend(kinds.iter().map(|k| k.column()));
    writer.write_record(&header)?;
    for row in rows {
        let mut record = vec![row.text.clone(), row.category.clone()];
        for &kind in kinds {
            record.push(serde_json::to_string(row.matches(kind))?);
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote annotated corpus");
    Ok(())
}

/// Write one ROW, TEXT, CATEGORY, RULE, ERROR line per failed (row, rule) cell.
///
/// Failed cells hold `[]` in the annotated corpus; this table tells them apart
/// from rows that parsed but matched nothing.
pub fn write_failures(rows: &[AnnotatedRow], path: &Path) -> Result<usize> {
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["ROW", "TEXT", "CATEGORY", "RULE", "ERROR"])?;
    let mut written = 0;
    for (idx, row) in rows.iter().enumerate() {
        for (kind, err) in &row.failures {
            writer.write_record([
                idx.to_string().as_str(),
                row.text.as_str(),
                row.category.as_str(),
                kind.name(),
                err.to_string().as_str(),
            ])?;
            written += 1;
        }
    }
    writer.flush()?;
    if written > 0 {
        info!(path = %path.display(), failures = written, "wrote parse failures");
    }
    Ok(written)
}

/// Column names and string cells for a segregated table.
pub fn segregated_table(seg: &Segregation) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let header = match seg.kind {
        PatternKind::Nvn | PatternKind::NvnMod => {
            vec!["ROW", "TEXT", "CATEGORY", "PHRASE", "NOUN1", "VERB", "NOUN2"]
        }
        PatternKind::An => vec!["ROW", "TEXT", "CATEGORY", "PHRASE", "ADJECTIVES", "NOUN"],
        PatternKind::Npn => {
            vec!["ROW", "TEXT", "CATEGORY", "PHRASE", "NOUN1", "PREPOSITION", "NOUN2"]
        }
    };
    let rows = seg
        .records
        .iter()
        .map(|rec| {
            let mut cells = vec![
                rec.row.to_string(),
                rec.text.clone(),
                rec.category.clone(),
                rec.phrase.clone(),
            ];
            match &rec.slots {
                Slots::Nvn { noun1, verb, noun2 } => {
                    cells.extend([noun1.clone(), verb.clone(), noun2.clone()])
                }
                Slots::An { adjectives, noun } => cells.extend([adjectives.clone(), noun.clone()]),
                Slots::Npn {
                    noun1,
                    preposition,
                    noun2,
                } => cells.extend([
                    noun1.clone(),
                    preposition.clone(),
                    serde_json::to_string(noun2).unwrap_or_default(),
                ]),
            }
            cells
        })
        .collect();
    (header, rows)
}

/// Write a segregated table as CSV or Parquet.
pub fn write_segregated(seg: &Segregation, path: &Path, format: OutputFormat) -> Result<()> {
    ensure_parent(path)?;
    let (header, rows) = segregated_table(seg);
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("create {}", path.display()))?;
            writer.write_record(&header)?;
            for row in &rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Parquet => {
            let columns = header
                .iter()
                .enumerate()
                .map(|(col, name)| {
                    Series::new(
                        (*name).into(),
                        rows.iter().map(|r| r[col].clone()).collect::<Vec<_>>(),
                    )
                })
                .collect::<Vec<_>>();
            let mut df = DataFrame::new(columns)?;
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
    }
    info!(
        rule = %seg.kind,
        path = %path.display(),
        records = seg.records.len(),
        skipped = seg.skipped.len(),
        "wrote segregated phrases"
    );
    Ok(())
}

/// Write frequency counts, most frequent first.
pub fn write_frequencies(seg: &Segregation, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    let key = match seg.kind {
        PatternKind::Nvn | PatternKind::NvnMod => "VERB",
        PatternKind::An => "NOUN",
        PatternKind::Npn => "PREPOSITION",
    };
    writer.write_record([key, "COUNT"])?;
    for (term, count) in seg.ranked_frequencies() {
        writer.write_record([term, count.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
