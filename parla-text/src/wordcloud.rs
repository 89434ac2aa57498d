//! Word cloud weighting and SVG rendering.
//!
//! Words are weighted by frequency relative to the most frequent word and laid
//! out in rows, largest first. Words that do not fit the canvas are dropped.

use serde::{Deserialize, Serialize};

use crate::analyzers::StopWords;
use crate::keywords::FrequencyTable;
use crate::TextError;

const MARGIN: f32 = 4.0;
const WORD_GAP: f32 = 6.0;
/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.2;
/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 8192;
const PALETTE: &[&str] = &[
    "#fde725", "#b5de2b", "#6ece58", "#35b779", "#1f9e89", "#26828e", "#31688e", "#3e4989",
];

/// A word with its occurrence count and weight relative to the most frequent word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedWord {
    pub word: String,
    pub count: usize,
    pub weight: f32,
}

/// A word positioned on the canvas; `y` is the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
}

/// Word cloud generator.
#[derive(Debug, Clone)]
pub struct WordCloud {
    max_words: usize,
    width: u32,
    height: u32,
    min_font_size: u32,
    max_font_size: Option<u32>,
    stop_words: StopWords,
}

impl Default for WordCloud {
    fn default() -> Self {
        Self {
            max_words: 200,
            width: 400,
            height: 200,
            min_font_size: 4,
            max_font_size: None,
            stop_words: StopWords::english(),
        }
    }
}

impl WordCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of words considered.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Set the canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the font size range; `None` derives the maximum from the canvas height.
    pub fn with_font_range(mut self, min: u32, max: Option<u32>) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn max_font(&self) -> u32 {
        self.max_font_size.unwrap_or_else(|| {
            let derived = u64::from(self.height) * 2 / 5;
            u32::try_from(derived)
                .unwrap_or(u32::MAX)
                .max(self.min_font_size)
        })
    }

    /// Reject configurations that cannot produce a canvas.
    pub fn validate(&self) -> Result<(), TextError> {
        if self.width == 0 || self.height == 0 {
            return Err(TextError::InvalidWordCloud(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(TextError::InvalidWordCloud(format!(
                "canvas sides are limited to {MAX_CANVAS_SIDE}px, got {}x{}",
                self.width, self.height
            )));
        }
        if self.min_font_size == 0 {
            return Err(TextError::InvalidWordCloud(
                "min_font_size must be positive".into(),
            ));
        }
        if self.max_font() < self.min_font_size {
            return Err(TextError::InvalidWordCloud(format!(
                "max_font_size {} is below min_font_size {}",
                self.max_font(),
                self.min_font_size
            )));
        }
        Ok(())
    }

    /// Lowercased words of two or more characters that are not stop words.
    fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|word| word.trim_matches('\'').to_lowercase())
            .filter(move |word| word.chars().count() >= 2 && !self.stop_words.contains(word))
    }

    /// Up to `max_words` words by descending count, ties in first-seen order.
    pub fn weights(&self, text: &str) -> Vec<WeightedWord> {
        let table = FrequencyTable::from_tokens(self.words(text));
        let max_count = table.max_count().max(1) as f32;
        table
            .ranked(self.max_words)
            .into_iter()
            .map(|(word, count)| WeightedWord {
                word: word.to_string(),
                count,
                weight: count as f32 / max_count,
            })
            .collect()
    }

    /// Place weighted words in rows, largest first.
    pub fn layout(&self, text: &str) -> Result<Vec<PlacedWord>, TextError> {
        self.validate()?;

        let width = self.width as f32;
        let height = self.height as f32;
        let min_font = self.min_font_size as f32;
        let max_font = self.max_font() as f32;

        let mut placed = Vec::new();
        let mut cursor_x = MARGIN;
        let mut row_top = MARGIN;
        let mut row_height = 0.0_f32;

        for weighted in self.weights(text) {
            let font_size = (min_font + (max_font - min_font) * weighted.weight).round();
            let word_width = weighted.word.chars().count() as f32 * font_size * GLYPH_WIDTH;
            let word_height = font_size * LINE_HEIGHT;
            if word_width > width - 2.0 * MARGIN {
                continue;
            }

            let new_row = cursor_x + word_width > width - MARGIN;
            let (x, top, line) = if new_row {
                (MARGIN, row_top + row_height, word_height)
            } else {
                (cursor_x, row_top, row_height.max(word_height))
            };
            if top + line > height - MARGIN {
                continue;
            }

            row_top = top;
            row_height = line;
            cursor_x = x + word_width + WORD_GAP;
            placed.push(PlacedWord {
                word: weighted.word,
                font_size,
                x,
                y: top + font_size,
            });
        }

        Ok(placed)
    }

    /// Render the cloud as a standalone SVG document.
    pub fn render_svg(&self, text: &str) -> Result<String, TextError> {
        let placed = self.layout(text)?;
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n<rect width=\"100%\" height=\"100%\" fill=\"#000000\"/>\n",
            w = self.width,
            h = self.height
        );
        for (idx, word) in placed.iter().enumerate() {
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{:.0}\" font-family=\"sans-serif\" fill=\"{}\">{}</text>\n",
                word.x,
                word.y,
                word.font_size,
                PALETTE[idx % PALETTE.len()],
                escape_xml(&word.word)
            ));
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
