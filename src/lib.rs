//! Syntactic pattern mining over labeled news corpora.

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod patterns;
pub mod pipeline;
