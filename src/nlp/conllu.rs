//! Offline parse store backed by CoNLL-U files.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    error::ParseError,
    nlp::{
        parser::DependencyParser,
        token::{ParsedDoc, TokenData},
    },
};

/// Pre-parsed documents looked up by their exact (trimmed) text.
///
/// Each blank-line separated block is one sentence. Its text is the
/// `# text = ...` comment when present, otherwise the forms joined with
/// spaces (honouring `SpaceAfter=No`). A `# newdoc` comment opens a document
/// that absorbs the following sentences until the next `# newdoc`; its key is
/// the sentence texts joined with single spaces. Outside a `# newdoc` group
/// every sentence is its own document. Two documents with the same key are
/// rejected.
#[derive(Debug, Default, Clone)]
pub struct ConlluParser {
    docs: HashMap<String, ParsedDoc>,
}

impl ConlluParser {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read conllu store {}", path.display()))?;
        let parser = Self::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        info!(path = %path.display(), docs = parser.len(), "loaded conllu store");
        Ok(parser)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(raw: &str) -> Result<Self, ParseError> {
        let mut store = Self::default();
        let mut group: Option<Sentence> = None;
        let mut block: Vec<&str> = Vec::new();
        for line in raw.lines().chain(std::iter::once("")) {
            if !line.trim().is_empty() {
                block.push(line);
                continue;
            }
            if block.is_empty() {
                continue;
            }
            let sentence = parse_block(&block)?;
            block.clear();
            if sentence.newdoc {
                if let Some(done) = group.take() {
                    store.insert(done)?;
                }
                group = Some(sentence);
            } else if let Some(open) = group.as_mut() {
                open.append(sentence);
            } else {
                store.insert(sentence)?;
            }
        }
        if let Some(done) = group {
            store.insert(done)?;
        }
        Ok(store)
    }

    fn insert(&mut self, sentence: Sentence) -> Result<(), ParseError> {
        if self.docs.contains_key(&sentence.text) {
            return Err(ParseError::Malformed(format!(
                "duplicate document text {:?}",
                sentence.text
            )));
        }
        let doc = ParsedDoc::new(sentence.tokens)?;
        debug!(text = %sentence.text, tokens = doc.len(), "indexed conllu document");
        self.docs.insert(sentence.text, doc);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DependencyParser for ConlluParser {
    fn parse(&self, text: &str) -> Result<ParsedDoc, ParseError> {
        self.docs
            .get(text.trim())
            .cloned()
            .ok_or_else(|| ParseError::UnknownText(text.to_string()))
    }
}

/// One block, with heads indexed from the start of its (possibly merged) document.
#[derive(Debug)]
struct Sentence {
    text: String,
    tokens: Vec<TokenData>,
    newdoc: bool,
}

impl Sentence {
    fn append(&mut self, next: Sentence) {
        let offset = self.tokens.len();
        self.tokens.extend(next.tokens.into_iter().map(|mut token| {
            token.head += offset;
            token
        }));
        self.text.push(' ');
        self.text.push_str(&next.text);
    }
}

fn parse_block(lines: &[&str]) -> Result<Sentence, ParseError> {
    let mut text = None;
    let mut newdoc = false;
    let mut tokens = Vec::new();
    let mut rebuilt = String::new();

    for line in lines {
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if comment == "newdoc" || comment.starts_with("newdoc ") {
                newdoc = true;
            } else if let Some((key, value)) = comment.split_once('=') {
                if key.trim() == "text" {
                    text = Some(value.trim().to_string());
                }
            }
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 10 {
            return Err(ParseError::Malformed(format!(
                "expected 10 columns, found {}: {line:?}",
                cols.len()
            )));
        }
        // multiword ranges and empty nodes carry no tree position
        if cols[0].contains('-') || cols[0].contains('.') {
            continue;
        }
        let id: usize = cols[0]
            .parse()
            .map_err(|_| ParseError::Malformed(format!("bad token id {:?}", cols[0])))?;
        let head: usize = cols[6]
            .parse()
            .map_err(|_| ParseError::Malformed(format!("bad head {:?}", cols[6])))?;
        if id != tokens.len() + 1 {
            return Err(ParseError::Malformed(format!(
                "token ids must be consecutive, found {id} after {}",
                tokens.len()
            )));
        }
        let index = id - 1;
        tokens.push(TokenData {
            text: cols[1].to_string(),
            lemma: cols[2].to_string(),
            pos: cols[3].to_string(),
            dep: cols[7].to_string(),
            head: if head == 0 { index } else { head - 1 },
        });
        rebuilt.push_str(cols[1]);
        if !cols[9].split('|').any(|misc| misc == "SpaceAfter=No") {
            rebuilt.push(' ');
        }
    }

    // heads must stay inside the sentence before documents are merged
    if let Some(bad) = tokens.iter().find(|t| t.head >= tokens.len()) {
        return Err(ParseError::Malformed(format!(
            "token {:?} has head {} outside its sentence of {} tokens",
            bad.text,
            bad.head + 1,
            tokens.len()
        )));
    }

    Ok(Sentence {
        text: text.unwrap_or_else(|| rebuilt.trim().to_string()),
        tokens,
        newdoc,
    })
}
