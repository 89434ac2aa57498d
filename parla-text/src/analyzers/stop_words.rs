//! Configurable Stop Words
//!
//! Provides stop word lists loaded from the built-in English list, files or custom slices.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::TextError;

/// Default English stop words.
pub static DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing",
    "down", "during", "each", "else", "every", "few", "for", "from", "further", "had",
    "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "may", "me", "might", "more", "most", "must", "my", "myself", "no",
    "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "our", "ours", "ourselves", "out", "over", "own", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Configurable stop words collection.
///
/// Words keep the casing they were given; lookups fold case unless
/// [`StopWords::case_insensitive`] is switched off.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
    /// Lowercased view of `words`
    folded: HashSet<String>,
    case_insensitive: bool,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    /// Create an empty stop words collection.
    pub fn new() -> Self {
        Self {
            words: HashSet::new(),
            folded: HashSet::new(),
            case_insensitive: true,
        }
    }

    /// Create from a slice of words.
    pub fn from_slice(words: &[&str]) -> Self {
        let mut stop_words = Self::new();
        stop_words.add_words(words);
        stop_words
    }

    /// Create with default English stop words.
    pub fn english() -> Self {
        Self::from_slice(DEFAULT_ENGLISH_STOP_WORDS)
    }

    /// Built-in list for a language code or name.
    pub fn for_language(language: &str) -> Result<Self, TextError> {
        match language.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::english()),
            other => Err(TextError::UnsupportedLanguage(other.to_string())),
        }
    }

    /// Load stop words from a file (one word per line, `#` starts a comment line).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TextError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TextError::StopWordsIo {
            path: path.to_path_buf(),
            source,
        })?;

        let mut stop_words = Self::new();
        for line in content.lines().map(str::trim) {
            if !line.is_empty() && !line.starts_with('#') {
                stop_words.add(line);
            }
        }
        Ok(stop_words)
    }

    /// Set case sensitivity. Applies to every word, including those loaded earlier.
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    /// Add a word to the stop words list.
    pub fn add(&mut self, word: impl Into<String>) {
        let word = word.into();
        self.folded.insert(word.to_lowercase());
        self.words.insert(word);
    }

    /// Add multiple words.
    pub fn add_words(&mut self, words: &[&str]) {
        for word in words {
            self.add(*word);
        }
    }

    /// Remove a word from the stop words list. Case-insensitive lists drop
    /// every casing of the word.
    pub fn remove(&mut self, word: &str) {
        let key = word.to_lowercase();
        if self.case_insensitive {
            self.words.retain(|w| w.to_lowercase() != key);
            self.folded.remove(&key);
        } else {
            self.words.remove(word);
            if !self.words.iter().any(|w| w.to_lowercase() == key) {
                self.folded.remove(&key);
            }
        }
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        if self.case_insensitive {
            self.folded.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    /// Number of distinct stop words under the current case rule.
    pub fn len(&self) -> usize {
        if self.case_insensitive {
            self.folded.len()
        } else {
            self.words.len()
        }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get an iterator over the stop words, in their original casing.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }

    /// Merge with another stop words collection.
    pub fn merge(&mut self, other: &StopWords) {
        for word in &other.words {
            self.add(word.clone());
        }
    }
}
