//! Dependency-parse providers. Swap the HTTP client for a CoNLL-U store offline.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Result;
use reqwest::{blocking::Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::Settings,
    error::ParseError,
    nlp::{
        conllu::ConlluParser,
        token::{ParsedDoc, TokenData},
    },
};

/// Trait for dependency-parse providers. Treated as a pure function of text.
pub trait DependencyParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<ParsedDoc, ParseError>;
}

impl<P: DependencyParser + ?Sized> DependencyParser for Arc<P> {
    fn parse(&self, text: &str) -> Result<ParsedDoc, ParseError> {
        (**self).parse(text)
    }
}

impl<P: DependencyParser + ?Sized> DependencyParser for &P {
    fn parse(&self, text: &str) -> Result<ParsedDoc, ParseError> {
        (**self).parse(text)
    }
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    tokens: Vec<TokenData>,
}

/// Blocking client for a spaCy-compatible parse service.
pub struct SpacyHttpParser {
    client: Client,
    url: String,
    model: String,
}

impl SpacyHttpParser {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Result<Self, ParseError> {
        let client = Client::builder()
            .user_agent("news-patterns/0.1")
            .gzip(true)
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            model: model.into(),
        })
    }
}

impl DependencyParser for SpacyHttpParser {
    fn parse(&self, text: &str) -> Result<ParsedDoc, ParseError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&ParseRequest {
                text,
                model: &self.model,
            })
            .send()?;
        check_status(&self.url, resp.status())?;
        decode(&resp.text()?)
    }
}

fn check_status(url: &str, status: StatusCode) -> Result<(), ParseError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ParseError::Unavailable(format!("{url} returned {status}")))
    }
}

/// Decode a `{"tokens": [...]}` body into a validated document.
fn decode(body: &str) -> Result<ParsedDoc, ParseError> {
    let payload: ParseResponse = serde_json::from_str(body)
        .map_err(|err| ParseError::Malformed(format!("parse response: {err}")))?;
    debug!(tokens = payload.tokens.len(), "received parse");
    ParsedDoc::new(payload.tokens)
}

/// Load the configured provider: a CoNLL-U store when given, else the HTTP service.
pub fn load_parser(settings: &Settings, conllu: Option<&Path>) -> Result<Arc<dyn DependencyParser>> {
    if let Some(path) = conllu {
        return Ok(Arc::new(ConlluParser::from_path(path)?) as Arc<dyn DependencyParser>);
    }
    info!(url = %settings.parser_url, model = %settings.spacy_model, "using http parse service");
    let parser = SpacyHttpParser::new(settings.parser_url.clone(), settings.spacy_model.clone())?;
    Ok(Arc::new(parser) as Arc<dyn DependencyParser>)
}
