//! Error types shared by the parse providers and the pattern pipeline.

use thiserror::Error;

/// Failure to obtain a dependency parse for a piece of text.
///
/// A rule cannot run without a parse, so these are always surfaced to the
/// caller rather than swallowed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The provider could not be reached or returned an error status.
    #[error("dependency parse unavailable: {0}")]
    Unavailable(String),
    /// An offline store has no parse for the requested text.
    #[error("no parse stored for text {0:?}")]
    UnknownText(String),
    /// The provider returned a token table that does not form a valid tree.
    #[error("malformed parse: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ParseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}
