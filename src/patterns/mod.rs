//! Shallow syntactic pattern mining over dependency parses.

pub mod finder;
pub mod rules;
pub mod segregate;

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::nlp::ParsedDoc;

pub use finder::{AnnotatedRow, FinderOptions, PatternFinder};
pub use segregate::{segregate, Segregation, SegregatedRecord, SkipReason, SkippedMatch, Slots};

/// The four pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Subject, verb lemma, direct object.
    Nvn,
    /// Adjective or compound modifiers followed by a noun.
    An,
    /// Noun, preposition, prepositional nouns.
    Npn,
    /// Subject-verb-object with adjectival modifiers on both nouns.
    #[value(name = "nvn_mod")]
    NvnMod,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [Self::Nvn, Self::An, Self::Npn, Self::NvnMod];

    /// Short name used in configuration and file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nvn => "nvn",
            Self::An => "an",
            Self::Npn => "npn",
            Self::NvnMod => "nvn_mod",
        }
    }

    /// Column name the orchestrator stores results under.
    pub fn column(self) -> &'static str {
        match self {
            Self::Nvn => "NVN_PHRASES",
            Self::An => "AN_PHRASES",
            Self::Npn => "NPN_PHRASES",
            Self::NvnMod => "NVN_MOD_PHRASES",
        }
    }

    /// Run this rule over a parsed document.
    pub fn extract(self, doc: &ParsedDoc) -> Vec<Match> {
        match self {
            Self::Nvn => rules::rule_nvn(doc),
            Self::An => rules::rule_an(doc),
            Self::Npn => rules::rule_npn(doc),
            Self::NvnMod => rules::rule_nvn_mod(doc),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == key)
            .ok_or_else(|| format!("unknown pattern {s:?}, expected one of nvn, an, npn, nvn_mod"))
    }
}

/// Parse a comma separated rule list such as `nvn,an`.
pub fn parse_kinds(raw: &str) -> Result<Vec<PatternKind>, String> {
    let mut kinds = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let kind: PatternKind = part.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// The token a match is anchored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Verb lemma, for the subject-verb-object rules.
    Verb(String),
    /// Head noun surface text, for the adjective-noun rule.
    Noun(String),
    /// Preposition surface text, for the noun-preposition-noun rule.
    Preposition(String),
}

/// One matched phrase. Serialises as `{"phrase": ..., "verb": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub phrase: String,
    #[serde(flatten)]
    pub anchor: Anchor,
}

impl Match {
    pub fn verb(phrase: String, lemma: &str) -> Self {
        Self {
            phrase,
            anchor: Anchor::Verb(lemma.to_string()),
        }
    }

    pub fn noun(phrase: String, noun: &str) -> Self {
        Self {
            phrase,
            anchor: Anchor::Noun(noun.to_string()),
        }
    }

    pub fn preposition(phrase: String, preposition: &str) -> Self {
        Self {
            phrase,
            anchor: Anchor::Preposition(preposition.to_string()),
        }
    }
}
