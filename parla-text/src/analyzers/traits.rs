//! Analyzer Traits
//!
//! Common interfaces for all text analyzers.

use serde::{Deserialize, Serialize};

/// A surface token paired with its dictionary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLemma {
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Lemma")]
    pub lemma: String,
}

impl TokenLemma {
    pub fn new(token: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            lemma: lemma.into(),
        }
    }
}

/// Configuration for text analyzers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Lowercase surface tokens (lemmas are always lowercase)
    pub lowercase_tokens: bool,
    /// Minimum token length, in characters
    pub min_token_length: usize,
    /// Maximum token length, in characters
    pub max_token_length: usize,
    /// Emit punctuation characters as tokens of their own
    pub keep_punctuation: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lowercase_tokens: false,
            min_token_length: 1,
            max_token_length: 100,
            keep_punctuation: true,
        }
    }
}

impl AnalyzerConfig {
    /// Config that keeps only word tokens, lowercased.
    pub fn words_only() -> Self {
        Self {
            lowercase_tokens: true,
            keep_punctuation: false,
            ..Self::default()
        }
    }
}

/// Common trait for all text analyzers.
pub trait Analyzer: Send + Sync {
    /// Tokenize text into individual tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Map a single token to its dictionary form.
    fn lemmatize(&self, token: &str) -> String;

    /// Get the analyzer configuration.
    fn config(&self) -> &AnalyzerConfig;

    /// Process text: tokenize, then pair every token with its lemma.
    fn analyze(&self, text: &str) -> Vec<TokenLemma> {
        self.tokenize(text)
            .into_iter()
            .map(|token| {
                let lemma = self.lemmatize(&token);
                TokenLemma { token, lemma }
            })
            .collect()
    }
}
