//! Read-only dependency parse: an arena of tokens with index-based relations.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Raw token data as emitted by a parse provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub text: String,
    pub lemma: String,
    /// Coarse part-of-speech tag (NOUN, VERB, ADJ, ...).
    pub pos: String,
    /// Dependency label (nsubj, dobj, pobj, compound, ...).
    pub dep: String,
    /// Index of the governing token. The root points at itself.
    pub head: usize,
}

/// A parsed text. Tokens are stored once; relations are indices into the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    tokens: Vec<TokenData>,
    children: Vec<Vec<usize>>,
}

impl ParsedDoc {
    /// Build a document, validating heads and indexing children by position.
    pub fn new(tokens: Vec<TokenData>) -> Result<Self, ParseError> {
        let len = tokens.len();
        let mut children = vec![Vec::new(); len];
        for (idx, token) in tokens.iter().enumerate() {
            if token.head >= len {
                return Err(ParseError::Malformed(format!(
                    "token {idx} ({:?}) has head {} outside 0..{len}",
                    token.text, token.head
                )));
            }
            if token.head != idx {
                children[token.head].push(idx);
            }
        }
        Ok(Self { tokens, children })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> Option<Token<'_>> {
        (index < self.tokens.len()).then_some(Token { doc: self, index })
    }

    /// Tokens in source order.
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        (0..self.tokens.len()).map(move |index| Token { doc: self, index })
    }
}

/// Borrowed view of one token inside a [`ParsedDoc`].
#[derive(Clone, Copy)]
pub struct Token<'a> {
    doc: &'a ParsedDoc,
    index: usize,
}

impl<'a> Token<'a> {
    fn data(&self) -> &'a TokenData {
        &self.doc.tokens[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    pub fn lemma(&self) -> &'a str {
        &self.data().lemma
    }

    pub fn pos(&self) -> &'a str {
        &self.data().pos
    }

    pub fn dep(&self) -> &'a str {
        &self.data().dep
    }

    pub fn head(&self) -> Token<'a> {
        Token {
            doc: self.doc,
            index: self.data().head,
        }
    }

    pub fn is_root(&self) -> bool {
        self.data().head == self.index
    }

    /// True when the coarse tag is one of `tags`.
    pub fn pos_in(&self, tags: &[&str]) -> bool {
        tags.contains(&self.pos())
    }

    /// True when the dependency label is one of `labels`.
    pub fn dep_in(&self, labels: &[&str]) -> bool {
        labels.contains(&self.dep())
    }

    /// Immediate dependents in position order.
    pub fn children(&self) -> impl Iterator<Item = Token<'a>> + 'a {
        let doc = self.doc;
        doc.children[self.index]
            .iter()
            .map(move |&index| Token { doc, index })
    }

    /// Dependents positioned before this token.
    pub fn lefts(&self) -> impl Iterator<Item = Token<'a>> + 'a {
        let pivot = self.index;
        self.children().filter(move |child| child.index < pivot)
    }

    /// Dependents positioned after this token.
    pub fn rights(&self) -> impl Iterator<Item = Token<'a>> + 'a {
        let pivot = self.index;
        self.children().filter(move |child| child.index > pivot)
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("index", &self.index)
            .field("text", &self.text())
            .field("pos", &self.pos())
            .field("dep", &self.dep())
            .field("head", &self.data().head)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, pos: &str, dep: &str, head: usize) -> TokenData {
        TokenData {
            text: text.into(),
            lemma: text.to_lowercase(),
            pos: pos.into(),
            dep: dep.into(),
            head,
        }
    }

    #[test]
    fn children_are_split_by_position() {
        let doc = ParsedDoc::new(vec![
            tok("Retailers", "NOUN", "nsubj", 1),
            tok("report", "VERB", "ROOT", 1),
            tok("figures", "NOUN", "dobj", 1),
        ])
        .unwrap();
        let verb = doc.token(1).unwrap();
        assert!(verb.is_root());
        let lefts: Vec<_> = verb.lefts().map(|t| t.text()).collect();
        let rights: Vec<_> = verb.rights().map(|t| t.text()).collect();
        assert_eq!(lefts, vec!["Retailers"]);
        assert_eq!(rights, vec!["figures"]);
        assert_eq!(doc.token(0).unwrap().head().text(), "report");
    }

    #[test]
    fn out_of_range_head_is_rejected() {
        let err = ParsedDoc::new(vec![tok("alone", "NOUN", "ROOT", 3)]).unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }
}
