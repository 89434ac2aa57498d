//! English Text Analyzer
//!
//! Rule-based English tokenizer and lemmatizer. Irregular forms come from a
//! lookup table; everything else goes through suffix rules.

use super::traits::{Analyzer, AnalyzerConfig};
use std::collections::HashMap;

/// Irregular inflections and contraction tails mapped to their lemma.
static IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
    ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
    ("doing", "do"), ("goes", "go"), ("went", "go"), ("gone", "go"),
    ("saw", "see"), ("seen", "see"), ("made", "make"), ("said", "say"),
    ("took", "take"), ("taken", "take"), ("came", "come"), ("got", "get"),
    ("gotten", "get"), ("knew", "know"), ("known", "know"), ("thought", "think"),
    ("told", "tell"), ("found", "find"), ("gave", "give"), ("given", "give"),
    ("ran", "run"), ("wrote", "write"), ("written", "write"), ("ate", "eat"),
    ("eaten", "eat"), ("sat", "sit"), ("stood", "stand"), ("began", "begin"),
    ("begun", "begin"), ("brought", "bring"), ("bought", "buy"), ("felt", "feel"),
    ("kept", "keep"), ("left", "leave"), ("meant", "mean"), ("met", "meet"),
    ("paid", "pay"), ("sent", "send"), ("spoke", "speak"), ("spent", "spend"),
    ("won", "win"), ("built", "build"), ("lost", "lose"), ("held", "hold"),
    ("caught", "catch"), ("taught", "teach"), ("fell", "fall"), ("led", "lead"),
    ("used", "use"), ("using", "use"), ("children", "child"), ("men", "man"),
    ("women", "woman"), ("people", "person"), ("mice", "mouse"), ("feet", "foot"),
    ("teeth", "tooth"), ("geese", "goose"), ("better", "good"), ("best", "good"),
    ("worse", "bad"), ("worst", "bad"), ("n't", "not"), ("'re", "be"), ("'m", "be"),
    ("'ll", "will"), ("'ve", "have"), ("'d", "would"), ("wo", "will"), ("ca", "can"),
];

/// Clitics split off the end of a word, the way "they're" becomes "they" + "'re".
static CONTRACTION_TAILS: &[&str] = &["'s", "'re", "'ll", "'ve", "'d", "'m"];

/// English text analyzer.
pub struct EnglishAnalyzer {
    config: AnalyzerConfig,
    irregular: HashMap<&'static str, &'static str>,
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl EnglishAnalyzer {
    /// Create a new English analyzer.
    pub fn new(config: AnalyzerConfig) -> Self {
        let irregular = IRREGULAR_FORMS.iter().copied().collect();
        Self { config, irregular }
    }

    fn flush_word(&self, current: &mut String, tokens: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let word = std::mem::take(current);
        match split_contraction(&word) {
            Some((head, tail)) => {
                self.push_token(head.to_string(), tokens);
                self.push_token(tail.to_string(), tokens);
            }
            None => self.push_token(word, tokens),
        }
    }

    fn push_token(&self, token: String, tokens: &mut Vec<String>) {
        let token = if self.config.lowercase_tokens {
            token.to_lowercase()
        } else {
            token
        };

        let len = token.chars().count();
        if len < self.config.min_token_length || len > self.config.max_token_length {
            return;
        }
        tokens.push(token);
    }
}

impl Analyzer for EnglishAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_alphanumeric() {
                current.push(ch);
            } else if is_apostrophe(ch)
                && !current.is_empty()
                && chars.peek().is_some_and(|next| next.is_alphanumeric())
            {
                current.push('\'');
            } else {
                self.flush_word(&mut current, &mut tokens);
                if !ch.is_whitespace() && self.config.keep_punctuation {
                    self.push_token(ch.to_string(), &mut tokens);
                }
            }
        }
        self.flush_word(&mut current, &mut tokens);

        tokens
    }

    fn lemmatize(&self, token: &str) -> String {
        let lower = token.to_lowercase();
        if let Some(lemma) = self.irregular.get(lower.as_str()) {
            return (*lemma).to_string();
        }
        if lower.len() <= 3 || !lower.bytes().all(|b| b.is_ascii_alphabetic()) {
            return lower;
        }
        strip_inflection(&lower)
    }

    fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

fn is_apostrophe(ch: char) -> bool {
    ch == '\'' || ch == '\u{2019}'
}

fn split_contraction(word: &str) -> Option<(&str, &str)> {
    let len = word.len();
    if len > 3 && word.is_char_boundary(len - 3) && word[len - 3..].eq_ignore_ascii_case("n't") {
        return Some((&word[..len - 3], &word[len - 3..]));
    }

    let pos = word.rfind('\'')?;
    let tail = &word[pos..];
    if pos > 0 && CONTRACTION_TAILS.contains(&tail.to_ascii_lowercase().as_str()) {
        Some((&word[..pos], tail))
    } else {
        None
    }
}

/// Suffix rules for a lowercase ASCII word longer than three letters.
fn strip_inflection(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("iest").or_else(|| word.strip_suffix("ier")) {
        if stem.len() >= 3 {
            return format!("{stem}y");
        }
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    for sibilant in ["xes", "ches", "shes", "zzes"] {
        if word.ends_with(sibilant) {
            return word[..word.len() - 2].to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if stem.ends_with(['s', 'u', 'i']) {
            return word.to_string();
        }
        return stem.to_string();
    }
    if let Some(stem) = word.strip_suffix("ied") {
        return format!("{stem}y");
    }
    if word.ends_with("eed") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if has_vowel(stem) {
            return restore_stem(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() >= 2 && has_vowel(stem) {
            return restore_stem(stem);
        }
    }
    word.to_string()
}

/// Undo consonant doubling or restore a dropped silent `e`.
fn restore_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();

    if n >= 4
        && bytes[n - 1] == bytes[n - 2]
        && is_consonant(bytes[n - 1])
        && !matches!(bytes[n - 1], b'l' | b's' | b'z' | b'f')
    {
        return stem[..n - 1].to_string();
    }
    if stem.ends_with("bl") || stem.ends_with("iz") || (stem.ends_with("at") && vowel_groups(stem) >= 2) {
        return format!("{stem}e");
    }
    if n >= 3 && ends_cvc(bytes) && vowel_groups(stem) == 1 {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn is_consonant(b: u8) -> bool {
    b.is_ascii_alphabetic() && !matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn has_vowel(stem: &str) -> bool {
    stem.bytes().any(|b| !is_consonant(b))
}

fn vowel_groups(stem: &str) -> usize {
    let mut groups = 0;
    let mut in_vowel = false;
    for b in stem.bytes() {
        let vowel = !is_consonant(b);
        if vowel && !in_vowel {
            groups += 1;
        }
        in_vowel = vowel;
    }
    groups
}

fn ends_cvc(bytes: &[u8]) -> bool {
    let n = bytes.len();
    n >= 3
        && is_consonant(bytes[n - 3])
        && !is_consonant(bytes[n - 2])
        && is_consonant(bytes[n - 1])
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}
