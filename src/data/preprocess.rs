//! Text clean-up applied to articles before parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("valid regex"));
static MENTION_HASHTAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@#]\w+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const CONTRACTIONS: &[(&str, &str)] = &[
    ("won't", "will not"),
    ("can't", "cannot"),
    ("shan't", "shall not"),
    ("ain't", "is not"),
    ("let's", "let us"),
    ("n't", " not"),
    ("'re", " are"),
    ("'ll", " will"),
    ("'ve", " have"),
    ("'d", " would"),
    ("'m", " am"),
];

/// Punctuation kept in the text: hyphens, percent signs and full stops.
const KEPT_PUNCTUATION: &[char] = &['-', '%', '.'];

pub fn remove_urls(text: &str) -> String {
    URL.replace_all(text, " ").into_owned()
}

pub fn remove_mentions_hashtags(text: &str) -> String {
    MENTION_HASHTAG.replace_all(text, " ").into_owned()
}

/// Expand common English contractions. Matching is case-insensitive; the
/// expansion is lower case.
pub fn expand_contractions(text: &str) -> String {
    let mut out = text.replace(['\u{2019}', '\u{2018}'], "'");
    for (short, long) in CONTRACTIONS {
        out = replace_ignore_case(&out, short, long);
    }
    out
}

fn replace_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (pos, _) in lower.match_indices(needle) {
        out.push_str(&text[last..pos]);
        out.push_str(replacement);
        last = pos + needle.len();
    }
    out.push_str(&text[last..]);
    out
}

/// Drop ASCII punctuation other than [`KEPT_PUNCTUATION`].
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_punctuation() || KEPT_PUNCTUATION.contains(c))
        .collect()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Full clean-up chain run on each article before pattern extraction.
pub fn preprocess_text(text: &str) -> String {
    let result = remove_urls(text);
    let result = remove_mentions_hashtags(&result);
    let result = expand_contractions(&result);
    let result = strip_punctuation(&result);
    collapse_whitespace(&result)
}
