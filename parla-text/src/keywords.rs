//! Frequency-based keyword summary.
//!
//! A text is reduced to lowercase ASCII words, counted, and the `k` most
//! frequent words are joined with single spaces. Words with equal counts keep
//! the order in which they first appeared in the text, so the output is fully
//! determined by `(text, k)`.
//!
//! Only `[a-zA-Z]` survives normalization. Accented and non-Latin letters are
//! treated as separators, so multilingual input loses those words entirely.

use std::collections::HashMap;

/// Number of keywords returned when the caller does not ask for a count.
pub const DEFAULT_KEYWORD_COUNT: usize = 3;

/// Replace every character outside `[a-zA-Z]` with a space and lowercase the rest.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}

/// Occurrence counts of distinct words, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Count the normalized words of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(normalize(text).split_whitespace())
    }

    /// Count pre-tokenized words as given.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for token in tokens {
            table.record(token.as_ref());
        }
        table
    }

    fn record(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        match self.positions.get(token) {
            Some(&idx) => self.entries[idx].1 += 1,
            None => {
                self.positions.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrences of `token`, zero when absent.
    pub fn count(&self, token: &str) -> usize {
        self.positions
            .get(token)
            .map(|&idx| self.entries[idx].1)
            .unwrap_or(0)
    }

    /// Highest count in the table, zero when empty.
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    /// Words with their counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    /// Up to `k` entries ranked by descending count, ties in first-seen order.
    pub fn ranked(&self, k: usize) -> Vec<(&str, usize)> {
        if k == 0 {
            return Vec::new();
        }
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        // stable: equal counts stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// Up to `k` words ranked by descending count, ties in first-seen order.
    pub fn top(&self, k: usize) -> Vec<&str> {
        self.ranked(k).into_iter().map(|(token, _)| token).collect()
    }
}

/// The `k` most frequent normalized words of `text`, space-joined.
///
/// Never fails: empty text, text without ASCII letters, and `k == 0` all
/// produce an empty string.
pub fn extract_keywords(text: &str, k: usize) -> String {
    if k == 0 {
        return String::new();
    }
    FrequencyTable::from_text(text).top(k).join(" ")
}
