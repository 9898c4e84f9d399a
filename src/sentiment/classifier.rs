//! # Sentiment Classifier
//!
//! Turns raw text into a labeled [`ScoreResult`]: light cleanup, polarity
//! scoring, thresholding and glyph lookup.

use super::vader::{PolarityScorer, VaderAnalyzer};
use crate::models::{PolarityScores, ScoreResult, SentimentLabel, Thresholds};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").unwrap());
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());

/// Remove URLs and @mentions, then trim
pub fn clean_text(text: &str) -> String {
    let no_urls = URL_REGEX.replace_all(text, "");
    let no_mentions = MENTION_REGEX.replace_all(&no_urls, "");
    no_mentions.trim().to_string()
}

/// Stateless classifier over an injected polarity scorer
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
    thresholds: Thresholds,
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>, thresholds: Thresholds) -> Self {
        Self { scorer, thresholds }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Full polarity breakdown of the cleaned text
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        self.scorer.polarity_scores(&clean_text(text))
    }

    /// Classify a text into (label, compound score, glyph)
    pub fn classify(&self, text: &str) -> ScoreResult {
        let compound = self.polarity_scores(text).compound;
        let label = SentimentLabel::from_score(compound, &self.thresholds);
        ScoreResult::new(label, compound)
    }

    /// Classify several texts, preserving order
    pub fn classify_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<ScoreResult> {
        texts.iter().map(|t| self.classify(t.as_ref())).collect()
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(VaderAnalyzer), Thresholds::default())
    }
}

impl fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}
