//! Client for the public Google translate endpoint.
//!
//! Source language is auto-detected; the target is one of the languages in
//! [`TargetLanguage`]. Transient failures are retried according to
//! [`RetryConfig`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

mod retry;

pub use retry::{is_retryable, with_retry, RetryConfig};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("unsupported target language: {0}")]
    UnsupportedLanguage(String),

    #[error("text must be at least {min} characters, got {len}")]
    TextTooShort { len: usize, min: usize },

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Languages the service translates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLanguage {
    German,
    Japanese,
    Thai,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 3] = [
        TargetLanguage::German,
        TargetLanguage::Japanese,
        TargetLanguage::Thai,
    ];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::German => "de",
            TargetLanguage::Japanese => "ja",
            TargetLanguage::Thai => "th",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::German => "German",
            TargetLanguage::Japanese => "Japanese",
            TargetLanguage::Thai => "Thai",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetLanguage {
    type Err = TranslateError;

    /// Accepts a display name or a code, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TargetLanguage::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(wanted) || lang.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| TranslateError::UnsupportedLanguage(wanted.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Shortest accepted input, in characters after trimming
    pub min_text_len: usize,
    pub retry: RetryConfig,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            min_text_len: 3,
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleTranslator {
    client: Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Translate `text` into `target`, auto-detecting the source language.
    pub async fn translate(&self, text: &str, target: TargetLanguage) -> Result<String> {
        let len = text.trim().chars().count();
        if len < self.config.min_text_len {
            return Err(TranslateError::TextTooShort {
                len,
                min: self.config.min_text_len,
            });
        }

        debug!(target_lang = target.code(), chars = len, "translating text");
        let translated = with_retry(&self.config.retry, move || self.request(text, target)).await?;
        info!(
            target_lang = target.code(),
            chars = translated.chars().count(),
            "translation complete"
        );
        Ok(translated)
    }

    async fn request(&self, text: &str, target: TargetLanguage) -> Result<String> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Upstream {
                status,
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

/// Concatenate the translated piece of every segment in a response body
/// shaped like `[[["Hallo", "Hello", ...], ...], ...]`.
pub fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::MalformedResponse("missing segment list".into()))?;

    let mut translated = String::new();
    for segment in segments {
        let piece = segment
            .get(0)
            .and_then(Value::as_str)
            .ok_or_else(|| TranslateError::MalformedResponse("segment without text".into()))?;
        translated.push_str(piece);
    }
    Ok(translated)
}
