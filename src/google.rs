use crate::errors::TranslationError;
use crate::placeholders::{self, Masked};
use crate::translator::Translator;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google web translation endpoint.
#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    source_language: String,
}

impl GoogleTranslator {
    pub fn new(
        endpoint: Option<String>,
        source_language: String,
        timeout: Option<Duration>,
    ) -> Result<Self, TranslationError> {
        let mut builder =
            Client::builder().user_agent(concat!("fillang/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            source_language,
        })
    }
}

impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError> {
        let masked = placeholders::mask(text);
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", language),
                ("dt", "t"),
                ("dj", "1"),
                ("source", "input"),
                ("q", masked.text.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(TranslationError::Status { status: status.as_u16(), body });
        }
        decode(text, &masked, &body)
    }
}

fn decode(reference: &str, masked: &Masked, body: &str) -> Result<String, TranslationError> {
    let translated = parse_response(body)?;
    placeholders::verify(reference, &masked.unmask(&translated))
}

#[derive(Deserialize)]
struct GtxResponse {
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Deserialize)]
struct Sentence {
    trans: Option<String>,
}

// Long inputs come back split into several sentences
fn parse_response(body: &str) -> Result<String, TranslationError> {
    let data: GtxResponse =
        serde_json::from_str(body).map_err(|e| TranslationError::Malformed(e.to_string()))?;
    let joined: String = data.sentences.into_iter().filter_map(|s| s.trans).collect();
    if joined.trim().is_empty() {
        return Err(TranslationError::Empty);
    }
    Ok(joined)
}
