use news_patterns::data::preprocess::{expand_contractions, preprocess_text};

#[test]
fn cleans_urls_mentions_and_punctuation() {
    let raw = "Shares rose 5% (see https://example.com/x) says @analyst #markets!  Don't panic.";
    assert_eq!(
        preprocess_text(raw),
        "Shares rose 5% see says Do not panic."
    );
}

#[test]
fn expands_irregular_contractions_first() {
    assert_eq!(expand_contractions("We won't stop"), "We will not stop");
    assert_eq!(expand_contractions("they\u{2019}re here"), "they are here");
}
