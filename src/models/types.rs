//! Core data types: records, labels, scores and batches

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph shown when a label has no entry in the lookup table
pub const FALLBACK_GLYPH: &str = "❓";

/// Map a label name to its display glyph.
///
/// Unknown labels map to [`FALLBACK_GLYPH`].
pub fn glyph_for(label: &str) -> &'static str {
    match label {
        "POSITIVE" => "😄",
        "NEUTRAL" => "😐",
        "NEGATIVE" => "😞",
        _ => FALLBACK_GLYPH,
    }
}

/// One unit of input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Raw text as submitted
    pub text: String,
    /// Optional timestamp used for time-series aggregation
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl TextRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(text: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            text: text.into(),
            timestamp: Some(timestamp),
        }
    }
}

/// Classification boundaries on the compound score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Scores at or above this value are positive
    pub positive: f64,
    /// Scores at or below this value are negative
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: crate::defaults::POSITIVE_THRESHOLD,
            negative: crate::defaults::NEGATIVE_THRESHOLD,
        }
    }
}

/// Sentiment label assigned from the compound score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in display order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Classify a compound score.
    ///
    /// `score >= positive` is positive, `score <= negative` is negative,
    /// everything in between (and NaN) is neutral.
    pub fn from_score(score: f64, thresholds: &Thresholds) -> Self {
        if score >= thresholds.positive {
            SentimentLabel::Positive
        } else if score <= thresholds.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }

    pub fn glyph(&self) -> &'static str {
        glyph_for(self.as_str())
    }

    /// Bar color used by the label-count chart
    pub fn color(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "blue",
            SentimentLabel::Neutral => "gray",
            SentimentLabel::Negative => "red",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw scorer output, in the shape of the standard VADER result
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized aggregate polarity in [-1, 1]
    pub compound: f64,
}

/// Classification of a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub label: SentimentLabel,
    pub compound_score: f64,
    pub glyph: String,
}

impl ScoreResult {
    pub fn new(label: SentimentLabel, compound_score: f64) -> Self {
        Self {
            label,
            compound_score,
            glyph: label.glyph().to_string(),
        }
    }
}

/// A text record together with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub text: String,
    pub timestamp: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub result: ScoreResult,
}

/// Ordered records paired 1:1 with their scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub records: Vec<ScoredRecord>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredRecord> {
        self.records.iter()
    }

    pub fn push(&mut self, record: ScoredRecord) {
        self.records.push(record);
    }

    /// Count records per label
    pub fn label_counts(&self) -> LabelCounts {
        let mut counts = LabelCounts::default();
        for record in &self.records {
            counts.increment(record.result.label);
        }
        counts
    }
}

/// Number of records per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl LabelCounts {
    pub fn increment(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Labels with a non-zero count, most frequent first
    pub fn ranked(&self) -> Vec<(SentimentLabel, usize)> {
        let mut ranked: Vec<_> = SentimentLabel::ALL
            .iter()
            .map(|&label| (label, self.get(label)))
            .filter(|(_, count)| *count > 0)
            .collect();
        // Stable sort keeps display order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_partition_scores() {
        let thresholds = Thresholds::default();

        assert_eq!(SentimentLabel::from_score(0.05, &thresholds), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.0499, &thresholds), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.05, &thresholds), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.0499, &thresholds), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(1.0, &thresholds), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-1.0, &thresholds), SentimentLabel::Negative);
    }

    #[test]
    fn test_every_score_gets_exactly_one_label() {
        let thresholds = Thresholds::default();
        for step in -1000..=1000 {
            let score = step as f64 / 1000.0;
            let label = SentimentLabel::from_score(score, &thresholds);
            let expected = if score >= 0.05 {
                SentimentLabel::Positive
            } else if score <= -0.05 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            };
            assert_eq!(label, expected, "score {}", score);
        }
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(SentimentLabel::Positive.glyph(), "😄");
        assert_eq!(SentimentLabel::Neutral.glyph(), "😐");
        assert_eq!(SentimentLabel::Negative.glyph(), "😞");
        assert_eq!(glyph_for("MIXED"), FALLBACK_GLYPH);
    }

    #[test]
    fn test_label_serializes_upper_case() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"NEGATIVE\"");
    }

    #[test]
    fn test_ranked_counts() {
        let counts = LabelCounts {
            positive: 2,
            neutral: 5,
            negative: 0,
        };
        assert_eq!(
            counts.ranked(),
            vec![(SentimentLabel::Neutral, 5), (SentimentLabel::Positive, 2)]
        );
        assert_eq!(counts.total(), 7);
    }
}
