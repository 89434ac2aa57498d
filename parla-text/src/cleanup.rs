//! Stop word, punctuation and special character removal.
//!
//! Word-level operations split on whitespace and compare whole words, so a
//! word with punctuation attached ("the,") is not a stop word.

use crate::analyzers::StopWords;

/// Stop words in order of appearance, lowercased, duplicates kept.
pub fn extract_stopwords(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| stop_words.contains(word))
        .map(str::to_lowercase)
        .collect()
}

/// Words that are not stop words, joined with single spaces.
pub fn remove_stopwords(text: &str, stop_words: &StopWords) -> String {
    text.split_whitespace()
        .filter(|word| !stop_words.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop ASCII punctuation.
pub fn remove_puncts(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Keep only alphanumerics and whitespace.
pub fn remove_special_characters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Stop words, punctuation and special characters removed, in that order.
pub fn clean_for_lemmas(text: &str, stop_words: &StopWords) -> String {
    let without_stopwords = remove_stopwords(text, stop_words);
    let without_puncts = remove_puncts(&without_stopwords);
    remove_special_characters(&without_puncts)
}
