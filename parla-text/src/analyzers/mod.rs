//! Text Analyzers Module
//!
//! Tokenization, lemmatization and stop word lists for English text.

mod english;
mod stop_words;
mod traits;

pub use english::EnglishAnalyzer;
pub use stop_words::{StopWords, DEFAULT_ENGLISH_STOP_WORDS};
pub use traits::{Analyzer, AnalyzerConfig, TokenLemma};
