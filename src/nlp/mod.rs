//! Dependency-parse layer: the token arena and the providers that fill it.

pub mod conllu;
pub mod parser;
pub mod token;

pub use conllu::ConlluParser;
pub use parser::{load_parser, DependencyParser, SpacyHttpParser};
pub use token::{ParsedDoc, Token, TokenData};
