//! Corpus ingestion, text clean-up and result export.

pub mod corpus;
pub mod export;
pub mod preprocess;
