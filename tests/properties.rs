mod common;

use common::FixedParser;
use news_patterns::{
    data::corpus::CorpusRow,
    nlp::{ParsedDoc, TokenData},
    patterns::{
        rules::{rule_an, rule_npn, rule_nvn, rule_nvn_mod},
        PatternFinder, PatternKind,
    },
};
use proptest::prelude::*;

const ALL_POS: &[&str] = &["NOUN", "PROPN", "PRON", "VERB", "ADJ", "ADP", "DET"];
const NO_VERB_POS: &[&str] = &["NOUN", "PROPN", "PRON", "ADJ", "ADP", "DET"];
const DEPS: &[&str] = &[
    "nsubj", "nsubjpass", "dobj", "pobj", "compound", "amod", "prep", "ROOT",
];

fn arb_doc(pos_tags: &'static [&'static str]) -> impl Strategy<Value = ParsedDoc> {
    (1usize..9)
        .prop_flat_map(move |n| {
            proptest::collection::vec(
                (
                    prop::sample::select(pos_tags),
                    prop::sample::select(DEPS),
                    0..n,
                    "[a-z]{1,6}",
                ),
                n,
            )
        })
        .prop_map(|specs| {
            let tokens = specs
                .into_iter()
                .map(|(pos, dep, head, text)| TokenData {
                    lemma: text.clone(),
                    text,
                    pos: pos.to_string(),
                    dep: dep.to_string(),
                    head,
                })
                .collect();
            ParsedDoc::new(tokens).unwrap()
        })
}

proptest! {
    #[test]
    fn verbless_text_yields_no_nvn(doc in arb_doc(NO_VERB_POS)) {
        prop_assert!(rule_nvn(&doc).is_empty());
        prop_assert!(rule_nvn_mod(&doc).is_empty());
    }

    #[test]
    fn an_only_matches_modified_argument_nouns(doc in arb_doc(ALL_POS)) {
        let expected = doc
            .tokens()
            .filter(|t| t.pos() == "NOUN" && t.dep_in(&["dobj", "pobj", "nsubj", "nsubjpass"]))
            .filter(|t| t.children().any(|c| c.pos() == "ADJ" || c.dep() == "compound"))
            .count();
        prop_assert_eq!(rule_an(&doc).len(), expected);
    }

    #[test]
    fn npn_only_matches_noun_headed_prepositions(doc in arb_doc(ALL_POS)) {
        let expected = doc
            .tokens()
            .filter(|t| t.pos() == "ADP" && !t.is_root() && t.head().pos() == "NOUN")
            .count();
        prop_assert_eq!(rule_npn(&doc).len(), expected);
    }

    #[test]
    fn orchestration_is_idempotent(doc in arb_doc(ALL_POS)) {
        let rows = vec![
            CorpusRow { text: "first".into(), category: "tech".into() },
            CorpusRow { text: "second".into(), category: "sport".into() },
        ];
        let finder = PatternFinder::new(FixedParser(doc), PatternKind::ALL);
        let first = finder.process(&rows).unwrap();
        let second = finder.process(&rows).unwrap();
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(&a.phrases, &b.phrases);
        }
    }
}
