//! Lexicon-based sentiment scoring.
//!
//! Each opinion word carries a polarity in `[-1, 1]` and a subjectivity in
//! `[0, 1]`. A preceding intensifier scales both scores, a preceding negation
//! flips and halves the polarity. The text score is the mean over every
//! opinion word found.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analyzers::{Analyzer, AnalyzerConfig, EnglishAnalyzer};

/// Polarities closer to zero than this are reported as neutral.
pub const NEUTRAL_BAND: f64 = 0.05;

const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
static OPINION_LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6), ("great", 0.8, 0.75), ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9), ("awesome", 1.0, 1.0), ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9), ("perfect", 1.0, 1.0), ("nice", 0.6, 1.0),
    ("beautiful", 0.85, 1.0), ("lovely", 0.5, 0.75), ("love", 0.5, 0.6),
    ("like", 0.2, 0.4), ("enjoy", 0.4, 0.5), ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0), ("pleasant", 0.73, 0.97), ("fun", 0.3, 0.2),
    ("interesting", 0.5, 0.5), ("helpful", 0.6, 0.7), ("easy", 0.43, 0.83),
    ("fast", 0.2, 0.6), ("clean", 0.37, 0.69), ("clear", 0.1, 0.38),
    ("positive", 0.23, 0.55), ("useful", 0.3, 0.0), ("recommend", 0.3, 0.4),
    ("bad", -0.7, 0.67), ("terrible", -1.0, 1.0), ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0), ("poor", -0.4, 0.6), ("worst", -1.0, 1.0),
    ("hate", -0.8, 0.9), ("dislike", -0.3, 0.5), ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0), ("ugly", -0.7, 1.0), ("boring", -1.0, 1.0),
    ("annoying", -0.8, 0.9), ("slow", -0.3, 0.39), ("broken", -0.4, 0.4),
    ("wrong", -0.5, 0.9), ("difficult", -0.5, 1.0), ("hard", -0.29, 0.54),
    ("disappointing", -0.6, 0.7), ("useless", -0.5, 0.0), ("negative", -0.3, 0.4),
    ("stupid", -0.8, 1.0), ("painful", -0.7, 0.9), ("dirty", -0.6, 0.8),
    ("expensive", -0.5, 0.7), ("cheap", 0.4, 0.7), ("fine", 0.42, 0.5),
];

/// (word, factor)
static INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("incredibly", 1.5),
    ("so", 1.3), ("too", 1.2), ("quite", 1.1), ("pretty", 1.1),
    ("slightly", 0.5), ("somewhat", 0.7), ("barely", 0.4),
];

static NEGATIONS: &[&str] = &["not", "n't", "no", "never", "neither", "nor", "without"];

/// Polarity and subjectivity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    pub fn label(&self) -> &'static str {
        if self.polarity > NEUTRAL_BAND {
            "positive"
        } else if self.polarity < -NEUTRAL_BAND {
            "negative"
        } else {
            "neutral"
        }
    }
}

/// Sentiment scorer backed by the built-in opinion lexicon.
pub struct SentimentAnalyzer {
    analyzer: EnglishAnalyzer,
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: EnglishAnalyzer::new(AnalyzerConfig {
                lowercase_tokens: true,
                ..AnalyzerConfig::default()
            }),
            lexicon: OPINION_LEXICON
                .iter()
                .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn lookup(&self, token: &str) -> Option<(f64, f64)> {
        self.lexicon
            .get(token)
            .or_else(|| self.lexicon.get(self.analyzer.lemmatize(token).as_str()))
            .copied()
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let mut scored: Vec<(f64, f64)> = Vec::new();
        let mut negated = false;
        let mut intensity: Option<f64> = None;

        for token in self.analyzer.tokenize(text) {
            if NEGATIONS.contains(&token.as_str()) {
                negated = true;
                continue;
            }
            if let Some(&factor) = self.intensifiers.get(token.as_str()) {
                intensity = Some(intensity.unwrap_or(1.0) * factor);
                continue;
            }
            if !token.chars().any(char::is_alphanumeric) {
                // punctuation closes the modifier scope
                negated = false;
                intensity = None;
                continue;
            }

            if let Some((mut polarity, mut subjectivity)) = self.lookup(&token) {
                if let Some(factor) = intensity.take() {
                    polarity *= factor;
                    subjectivity *= factor;
                }
                if negated {
                    polarity *= NEGATION_FACTOR;
                    negated = false;
                }
                scored.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
            }
        }

        if scored.is_empty() {
            return Sentiment::NEUTRAL;
        }
        let n = scored.len() as f64;
        Sentiment {
            polarity: scored.iter().map(|(p, _)| p).sum::<f64>() / n,
            subjectivity: scored.iter().map(|(_, s)| s).sum::<f64>() / n,
        }
    }
}
