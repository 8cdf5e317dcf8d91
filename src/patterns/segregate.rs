//! Flattens one rule's matches into per-match records with semantic slots.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::{finder::AnnotatedRow, Anchor, Match, PatternKind};

/// Phrase split into the parts a rule is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Slots {
    /// Subject, verb lemma, object (NVN and NVN_MOD).
    Nvn {
        noun1: String,
        verb: String,
        noun2: String,
    },
    /// Modifier text and head noun.
    An { adjectives: String, noun: String },
    /// Head noun, preposition, and the governed nouns.
    Npn {
        noun1: String,
        preposition: String,
        noun2: Vec<String>,
    },
}

/// Why a match could not be split for its rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("match is anchored on {found:?}, rule expects a {expected}")]
    AnchorMismatch { expected: &'static str, found: Anchor },
    #[error("empty {0} anchor")]
    EmptyAnchor(&'static str),
    #[error("verb {verb:?} splits the phrase into {parts} parts, expected 2")]
    VerbOccurrences { verb: String, parts: usize },
    #[error("noun {0:?} does not end the phrase")]
    NounMissing(String),
    #[error("no modifier text left once the noun is removed")]
    NoModifiers,
    #[error("phrase has {0} tokens, expected at least a noun and a preposition")]
    TooFewTokens(usize),
}

/// One match, denormalised with the row it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegregatedRecord {
    pub row: usize,
    pub text: String,
    pub category: String,
    pub phrase: String,
    pub slots: Slots,
}

/// A match dropped during segregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMatch {
    pub row: usize,
    pub phrase: String,
    pub reason: SkipReason,
}

/// Output of one [`segregate`] call.
#[derive(Debug, Clone)]
pub struct Segregation {
    pub kind: PatternKind,
    pub records: Vec<SegregatedRecord>,
    /// Counts keyed by verb lemma, noun or preposition, in first-seen order.
    pub frequencies: IndexMap<String, usize>,
    pub skipped: Vec<SkippedMatch>,
    /// Matches seen across all rows, recorded or skipped.
    pub total_matches: usize,
}

impl Segregation {
    fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            frequencies: IndexMap::new(),
            skipped: Vec::new(),
            total_matches: 0,
        }
    }

    /// Frequencies sorted by descending count, ties in first-seen order.
    pub fn ranked_frequencies(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .frequencies
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Flatten `kind`'s match lists into one record per match.
///
/// Rows with no matches contribute nothing. Matches whose phrase does not fit
/// the rule's shape are collected in `skipped` instead of aborting the run.
pub fn segregate(rows: &[AnnotatedRow], kind: PatternKind) -> Segregation {
    let mut out = Segregation::new(kind);
    for (row_idx, row) in rows.iter().enumerate() {
        let matches = row.matches(kind);
        if matches.is_empty() {
            continue;
        }
        out.total_matches += matches.len();
        for m in matches {
            match split(kind, m) {
                Ok((key, slots)) => {
                    *out.frequencies.entry(key).or_insert(0) += 1;
                    out.records.push(SegregatedRecord {
                        row: row_idx,
                        text: row.text.clone(),
                        category: row.category.clone(),
                        phrase: m.phrase.clone(),
                        slots,
                    });
                }
                Err(reason) => {
                    debug!(rule = %kind, row = row_idx, phrase = %m.phrase, %reason, "skipping match");
                    out.skipped.push(SkippedMatch {
                        row: row_idx,
                        phrase: m.phrase.clone(),
                        reason,
                    });
                }
            }
        }
    }
    info!(
        rule = %kind,
        records = out.records.len(),
        skipped = out.skipped.len(),
        matches = out.total_matches,
        "segregated phrases"
    );
    out
}

/// Split one match, returning the frequency key and its slots.
fn split(kind: PatternKind, m: &Match) -> Result<(String, Slots), SkipReason> {
    match kind {
        PatternKind::Nvn | PatternKind::NvnMod => split_nvn(m),
        PatternKind::An => split_an(m),
        PatternKind::Npn => split_npn(m),
    }
}

// Splits on the verb lemma as a plain substring, so a lemma that also occurs
// inside the subject or object text yields more than two parts and is skipped.
fn split_nvn(m: &Match) -> Result<(String, Slots), SkipReason> {
    let Anchor::Verb(verb) = &m.anchor else {
        return Err(SkipReason::AnchorMismatch {
            expected: "verb",
            found: m.anchor.clone(),
        });
    };
    if verb.is_empty() {
        return Err(SkipReason::EmptyAnchor("verb"));
    }
    let parts: Vec<&str> = m.phrase.split(verb.as_str()).collect();
    let [before, after] = parts.as_slice() else {
        return Err(SkipReason::VerbOccurrences {
            verb: verb.clone(),
            parts: parts.len(),
        });
    };
    Ok((
        verb.clone(),
        Slots::Nvn {
            noun1: before.trim().to_string(),
            verb: verb.clone(),
            noun2: after.trim().to_string(),
        },
    ))
}

fn split_an(m: &Match) -> Result<(String, Slots), SkipReason> {
    let Anchor::Noun(noun) = &m.anchor else {
        return Err(SkipReason::AnchorMismatch {
            expected: "noun",
            found: m.anchor.clone(),
        });
    };
    if noun.is_empty() {
        return Err(SkipReason::EmptyAnchor("noun"));
    }
    // the noun closes the phrase as a whole word; modifiers may contain its text
    let rest = m
        .phrase
        .trim_end()
        .strip_suffix(noun.as_str())
        .filter(|rest| rest.is_empty() || rest.ends_with(char::is_whitespace))
        .ok_or_else(|| SkipReason::NounMissing(noun.clone()))?;
    let adjectives = rest.trim().to_string();
    if adjectives.is_empty() {
        return Err(SkipReason::NoModifiers);
    }
    Ok((
        noun.clone(),
        Slots::An {
            adjectives,
            noun: noun.clone(),
        },
    ))
}

fn split_npn(m: &Match) -> Result<(String, Slots), SkipReason> {
    let Anchor::Preposition(preposition) = &m.anchor else {
        return Err(SkipReason::AnchorMismatch {
            expected: "preposition",
            found: m.anchor.clone(),
        });
    };
    let tokens: Vec<&str> = m.phrase.split_whitespace().collect();
    let [noun1, prep, rest @ ..] = tokens.as_slice() else {
        return Err(SkipReason::TooFewTokens(tokens.len()));
    };
    Ok((
        preposition.clone(),
        Slots::Npn {
            noun1: noun1.to_string(),
            preposition: prep.to_string(),
            noun2: rest.iter().map(|s| s.to_string()).collect(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nvn_split_trims_both_sides() {
        let m = Match::verb("retailers endure Christmas".into(), "endure");
        let (key, slots) = split_nvn(&m).unwrap();
        assert_eq!(key, "endure");
        assert_eq!(
            slots,
            Slots::Nvn {
                noun1: "retailers".into(),
                verb: "endure".into(),
                noun2: "Christmas".into(),
            }
        );
    }

    #[test]
    fn nvn_recurring_lemma_is_an_anomaly() {
        let m = Match::verb("report report figures".into(), "report");
        assert_eq!(
            split_nvn(&m).unwrap_err(),
            SkipReason::VerbOccurrences {
                verb: "report".into(),
                parts: 3
            }
        );
    }

    #[test]
    fn an_removes_noun_from_phrase() {
        let m = Match::noun("poor December figures".into(), "figures");
        let (_, slots) = split_an(&m).unwrap();
        assert_eq!(
            slots,
            Slots::An {
                adjectives: "poor December".into(),
                noun: "figures".into(),
            }
        );
    }

    #[test]
    fn an_keeps_modifiers_that_contain_the_noun() {
        let m = Match::noun("corporate rate".into(), "rate");
        let (key, slots) = split_an(&m).unwrap();
        assert_eq!(key, "rate");
        assert_eq!(
            slots,
            Slots::An {
                adjectives: "corporate".into(),
                noun: "rate".into(),
            }
        );

        let repeated = Match::noun("rate rate".into(), "rate");
        let (_, slots) = split_an(&repeated).unwrap();
        assert!(matches!(slots, Slots::An { adjectives, .. } if adjectives == "rate"));
    }

    #[test]
    fn an_noun_must_close_the_phrase() {
        let inside = Match::noun("rate cut".into(), "rate");
        assert_eq!(
            split_an(&inside).unwrap_err(),
            SkipReason::NounMissing("rate".into())
        );
        let glued = Match::noun("corporate".into(), "rate");
        assert_eq!(
            split_an(&glued).unwrap_err(),
            SkipReason::NounMissing("rate".into())
        );
        let bare = Match::noun("rate".into(), "rate");
        assert_eq!(split_an(&bare).unwrap_err(), SkipReason::NoModifiers);
    }

    #[test]
    fn npn_keeps_trailing_nouns_as_list() {
        let m = Match::preposition("caution from Bank England".into(), "from");
        let (_, slots) = split_npn(&m).unwrap();
        assert_eq!(
            slots,
            Slots::Npn {
                noun1: "caution".into(),
                preposition: "from".into(),
                noun2: vec!["Bank".into(), "England".into()],
            }
        );
        let short = Match::preposition("of".into(), "of");
        assert_eq!(split_npn(&short).unwrap_err(), SkipReason::TooFewTokens(1));
    }
}
