//! Text analysis primitives: keyword summaries, tokenization and
//! lemmatization, stop words, statistics, word clouds and sentiment.

use std::path::PathBuf;

pub mod analysis;
pub mod analyzers;
pub mod cleanup;
pub mod keywords;
pub mod sentiment;
pub mod stats;
pub mod wordcloud;

pub use analysis::{TextAnalysis, TextAnalyzer};
pub use analyzers::{Analyzer, AnalyzerConfig, EnglishAnalyzer, StopWords, TokenLemma};
pub use keywords::{extract_keywords, normalize, FrequencyTable, DEFAULT_KEYWORD_COUNT};
pub use sentiment::{Sentiment, SentimentAnalyzer};
pub use stats::{word_stats, WordStats};
pub use wordcloud::{PlacedWord, WeightedWord, WordCloud, MAX_CANVAS_SIDE};

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("failed to read stop words from {path:?}: {source}")]
    StopWordsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no built-in stop words for language {0:?}")]
    UnsupportedLanguage(String),

    #[error("invalid word cloud configuration: {0}")]
    InvalidWordCloud(String),
}
