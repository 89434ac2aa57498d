//! The full text-analysis report: statistics, stop words, cleaned text,
//! word cloud weights, token/lemma pairs and the keyword summary.

use serde::{Deserialize, Serialize};

use crate::analyzers::{Analyzer, AnalyzerConfig, EnglishAnalyzer, StopWords, TokenLemma};
use crate::cleanup::{clean_for_lemmas, extract_stopwords, remove_stopwords};
use crate::keywords::extract_keywords;
use crate::stats::{word_stats, WordStats};
use crate::wordcloud::{WeightedWord, WordCloud};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub stats: WordStats,
    pub stopwords: Vec<String>,
    /// Input with stop words removed
    pub processed_text: String,
    pub word_cloud: Vec<WeightedWord>,
    pub tokens: Vec<TokenLemma>,
    pub summary: String,
}

/// Runs every text-analysis step with a shared stop list.
pub struct TextAnalyzer {
    stop_words: StopWords,
    analyzer: EnglishAnalyzer,
    word_cloud: WordCloud,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl TextAnalyzer {
    pub fn new(stop_words: StopWords) -> Self {
        let word_cloud = WordCloud::default().with_stop_words(stop_words.clone());
        Self {
            stop_words,
            analyzer: EnglishAnalyzer::new(AnalyzerConfig::default()),
            word_cloud,
        }
    }

    /// Replace the word cloud settings; the stop list stays the analyzer's own.
    pub fn with_word_cloud(mut self, word_cloud: WordCloud) -> Self {
        self.word_cloud = word_cloud.with_stop_words(self.stop_words.clone());
        self
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn word_cloud(&self) -> &WordCloud {
        &self.word_cloud
    }

    /// Token/lemma pairs of the text after stop word, punctuation and special
    /// character removal.
    pub fn tokens_and_lemmas(&self, text: &str) -> Vec<TokenLemma> {
        self.analyzer.analyze(&clean_for_lemmas(text, &self.stop_words))
    }

    pub fn analyze(&self, text: &str, keywords: usize) -> TextAnalysis {
        let processed_text = remove_stopwords(text, &self.stop_words);
        TextAnalysis {
            stats: word_stats(text, &self.stop_words),
            stopwords: extract_stopwords(text, &self.stop_words),
            word_cloud: self.word_cloud.weights(&processed_text),
            tokens: self.tokens_and_lemmas(text),
            summary: extract_keywords(text, keywords),
            processed_text,
        }
    }
}
