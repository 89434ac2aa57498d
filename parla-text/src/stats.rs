//! Basic character and word statistics.

use serde::{Deserialize, Serialize};

use crate::analyzers::StopWords;

const VOWELS: &[u8] = b"aeiou";

/// Summary counts for a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    /// Length of the text in characters
    pub length: usize,
    /// ASCII vowels, either case
    pub vowels: usize,
    /// ASCII consonants, either case
    pub consonants: usize,
    /// Whitespace-separated words found in the stop list
    pub stopwords: usize,
}

pub fn word_stats(text: &str, stop_words: &StopWords) -> WordStats {
    let mut vowels = 0;
    let mut consonants = 0;
    for b in text.bytes().filter(u8::is_ascii_alphabetic) {
        if VOWELS.contains(&b.to_ascii_lowercase()) {
            vowels += 1;
        } else {
            consonants += 1;
        }
    }

    WordStats {
        length: text.chars().count(),
        vowels,
        consonants,
        stopwords: text
            .split_whitespace()
            .filter(|word| stop_words.contains(word))
            .count(),
    }
}
