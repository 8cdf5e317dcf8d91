//! The four pattern rules. Each is a pure walk over one parsed document.

use crate::nlp::{ParsedDoc, Token};

use super::Match;

const SUBJECT_DEPS: &[&str] = &["nsubj", "nsubjpass"];
const SUBJECT_POS: &[&str] = &["NOUN", "PROPN", "PRON"];
const OBJECT_DEPS: &[&str] = &["dobj"];
const OBJECT_POS: &[&str] = &["NOUN", "PROPN"];
const NOUN_ROLE_DEPS: &[&str] = &["dobj", "pobj", "nsubj", "nsubjpass"];
const PREP_OBJECT_POS: &[&str] = &["NOUN", "PROPN"];

fn subjects<'a>(verb: Token<'a>) -> impl Iterator<Item = Token<'a>> + 'a {
    verb.lefts()
        .filter(|t| t.dep_in(SUBJECT_DEPS) && t.pos_in(SUBJECT_POS))
}

fn objects<'a>(verb: Token<'a>) -> impl Iterator<Item = Token<'a>> + 'a {
    verb.rights()
        .filter(|t| t.dep_in(OBJECT_DEPS) && t.pos_in(OBJECT_POS))
}

/// Noun/proper noun/pronoun subject, verb lemma, noun/proper noun object.
///
/// One match per subject and object pair of each verb, e.g.
/// `{"phrase": "ONS revise rate", "verb": "revise"}`.
pub fn rule_nvn(doc: &ParsedDoc) -> Vec<Match> {
    let mut out = Vec::new();
    for verb in doc.tokens().filter(|t| t.pos() == "VERB") {
        for subject in subjects(verb) {
            for object in objects(verb) {
                let phrase = format!("{} {} {}", subject.text(), verb.lemma(), object.text());
                out.push(Match::verb(phrase, verb.lemma()));
            }
        }
    }
    out
}

/// Adjective or compound modifiers of a subject/object noun, e.g. `poor December figures`.
pub fn rule_an(doc: &ParsedDoc) -> Vec<Match> {
    let mut out = Vec::new();
    for noun in doc
        .tokens()
        .filter(|t| t.pos() == "NOUN" && t.dep_in(NOUN_ROLE_DEPS))
    {
        let modifiers: Vec<&str> = noun
            .children()
            .filter(|child| child.pos() == "ADJ" || child.dep() == "compound")
            .map(|child| child.text())
            .collect();
        if modifiers.is_empty() {
            continue;
        }
        let phrase = format!("{} {}", modifiers.join(" "), noun.text());
        out.push(Match::noun(phrase, noun.text()));
    }
    out
}

/// Noun head, preposition, and the nouns the preposition governs on its right.
pub fn rule_npn(doc: &ParsedDoc) -> Vec<Match> {
    let mut out = Vec::new();
    for prep in doc.tokens().filter(|t| t.pos() == "ADP") {
        let head = prep.head();
        if head.index() == prep.index() || head.pos() != "NOUN" {
            continue;
        }
        let mut phrase = format!("{} {}", head.text(), prep.text());
        for right in prep.rights().filter(|t| t.pos_in(PREP_OBJECT_POS)) {
            phrase.push(' ');
            phrase.push_str(right.text());
        }
        if phrase.chars().count() > 2 {
            out.push(Match::preposition(phrase, prep.text()));
        }
    }
    out
}

/// `" " + adj` for every adjectival child, in position order.
fn adjective_prefix(noun: Token<'_>) -> String {
    noun.children()
        .filter(|child| child.pos() == "ADJ")
        .fold(String::new(), |mut acc, child| {
            acc.push(' ');
            acc.push_str(child.text());
            acc
        })
}

/// Subject-verb-object with adjectival modifiers prefixed to both nouns.
///
/// Phrases keep the leading space produced by the prefixing step:
/// `" ONS revise annual rate"`.
pub fn rule_nvn_mod(doc: &ParsedDoc) -> Vec<Match> {
    let mut out = Vec::new();
    for verb in doc.tokens().filter(|t| t.pos() == "VERB") {
        for subject in subjects(verb) {
            let subject_part = format!("{} {}", adjective_prefix(subject), subject.text());
            for object in objects(verb) {
                let phrase = format!(
                    "{subject_part} {}{} {}",
                    verb.lemma(),
                    adjective_prefix(object),
                    object.text()
                );
                out.push(Match::verb(phrase, verb.lemma()));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::TokenData;

    fn tok(text: &str, lemma: &str, pos: &str, dep: &str, head: usize) -> TokenData {
        TokenData {
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            dep: dep.into(),
            head,
        }
    }

    #[test]
    fn adjective_prefix_joins_in_position_order() {
        let doc = ParsedDoc::new(vec![
            tok("tough", "tough", "ADJ", "amod", 2),
            tok("long", "long", "ADJ", "amod", 2),
            tok("winter", "winter", "NOUN", "ROOT", 2),
        ])
        .unwrap();
        assert_eq!(adjective_prefix(doc.token(2).unwrap()), " tough long");
    }
}
