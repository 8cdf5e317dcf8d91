//! Runtime configuration utilities for news-patterns.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::patterns::{parse_kinds, PatternKind};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Endpoint of the spaCy-compatible parse service.
    pub parser_url: String,
    /// Model name sent with each parse request.
    pub spacy_model: String,
    /// Rules run when the CLI does not name any.
    pub patterns: Vec<PatternKind>,
    /// Per-category sampling fraction applied before extraction.
    pub sample_frac: f64,
    /// Seed for the stratified sample.
    pub sample_seed: u64,
    /// Root folder for input corpora.
    pub data_dir: PathBuf,
    /// Root folder for extraction outputs.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let parser_url =
            env::var("PARSER_URL").unwrap_or_else(|_| "http://127.0.0.1:8080/parse".to_string());
        let spacy_model = env::var("SPACY_MODEL").unwrap_or_else(|_| "en_core_web_lg".to_string());
        let patterns = match env::var("PATTERNS") {
            Ok(raw) => parse_kinds(&raw).map_err(|e| anyhow!(e)).context("PATTERNS")?,
            Err(_) => PatternKind::ALL.to_vec(),
        };
        let sample_frac = env::var("SAMPLE_FRAC")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1.0);
        let sample_seed = env::var("SAMPLE_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(42);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            parser_url,
            spacy_model,
            patterns,
            sample_frac,
            sample_seed,
            data_dir,
            outputs_dir,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
