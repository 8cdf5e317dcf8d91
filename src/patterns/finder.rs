//! Applies the enabled rules to every row of a corpus.

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::{
    data::corpus::CorpusRow,
    error::ParseError,
    nlp::DependencyParser,
};

use super::{Match, PatternKind};

/// Behaviour switches for [`PatternFinder::process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FinderOptions {
    /// Abort the whole batch on the first parse failure instead of failing the row.
    pub fail_fast: bool,
}

/// A corpus row with one match list per enabled rule.
#[derive(Debug)]
pub struct AnnotatedRow {
    pub text: String,
    pub category: String,
    pub phrases: IndexMap<PatternKind, Vec<Match>>,
    /// Rules that could not run on this row because the text failed to parse.
    pub failures: Vec<(PatternKind, ParseError)>,
}

impl AnnotatedRow {
    fn new(row: &CorpusRow) -> Self {
        Self {
            text: row.text.clone(),
            category: row.category.clone(),
            phrases: IndexMap::new(),
            failures: Vec::new(),
        }
    }

    /// Matches for `kind`; empty when the rule was not run or failed.
    pub fn matches(&self, kind: PatternKind) -> &[Match] {
        self.phrases.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Runs a configured subset of the pattern rules over corpus rows.
pub struct PatternFinder<P> {
    parser: P,
    kinds: Vec<PatternKind>,
    options: FinderOptions,
}

impl<P: DependencyParser> PatternFinder<P> {
    pub fn new(parser: P, kinds: impl IntoIterator<Item = PatternKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self {
            parser,
            kinds: unique,
            options: FinderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FinderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kinds(&self) -> &[PatternKind] {
        &self.kinds
    }

    /// Parse `text` and run a single rule over it.
    pub fn find(&self, kind: PatternKind, text: &str) -> Result<Vec<Match>, ParseError> {
        let doc = self.parser.parse(text)?;
        Ok(kind.extract(&doc))
    }

    /// Annotate every row with one match list per enabled rule, preserving row order.
    ///
    /// Each (row, rule) pair parses the text afresh. A parse failure is
    /// recorded on the row unless `fail_fast` is set.
    pub fn process(&self, rows: &[CorpusRow]) -> Result<Vec<AnnotatedRow>, ParseError> {
        let mut annotated: Vec<AnnotatedRow> = rows.iter().map(AnnotatedRow::new).collect();
        for &kind in &self.kinds {
            info!(rule = %kind, rows = rows.len(), "extracting phrases");
            let mut found = 0usize;
            let mut failed = 0usize;
            for (idx, (row, out)) in rows.iter().zip(annotated.iter_mut()).enumerate() {
                match self.find(kind, &row.text) {
                    Ok(matches) => {
                        found += matches.len();
                        out.phrases.insert(kind, matches);
                    }
                    Err(err) if self.options.fail_fast => return Err(err),
                    Err(err) => {
                        warn!(rule = %kind, row = idx, %err, "parse failed; row skipped for rule");
                        failed += 1;
                        out.phrases.insert(kind, Vec::new());
                        out.failures.push((kind, err));
                    }
                }
            }
            info!(rule = %kind, matches = found, failed, column = kind.column(), "rule complete");
        }
        Ok(annotated)
    }
}
