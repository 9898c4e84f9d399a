//! # Dashboard Module
//!
//! Reductions of a scored batch into chart-ready data:
//! - Label counts and colored bars
//! - Mean sentiment and tweet volume per day
//! - Top hashtags and top words
//! - Word cloud weights

mod aggregator;
mod wordcloud;

pub use aggregator::{
    daily_mean_scores, daily_volume, label_bars, top_hashtags, top_words, DailyScore,
    DailyVolume, LabelBar, TermCount,
};
pub use wordcloud::{word_cloud, WordCloudEntry};

use crate::models::{Batch, LabelCounts, ScoredRecord};
use crate::nlp::StopWords;
use serde::{Deserialize, Serialize};

/// Caps and filters applied by the dashboard reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationLimits {
    pub top_hashtags: usize,
    pub top_words: usize,
    /// Words must be strictly longer than this to rank
    pub min_word_length: usize,
    pub word_cloud_max_words: usize,
}

impl Default for AggregationLimits {
    fn default() -> Self {
        Self {
            top_hashtags: crate::defaults::TOP_HASHTAGS,
            top_words: crate::defaults::TOP_WORDS,
            min_word_length: crate::defaults::MIN_WORD_LENGTH,
            word_cloud_max_words: crate::defaults::WORD_CLOUD_MAX_WORDS,
        }
    }
}

/// Classified records with their label summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<ScoredRecord>,
    pub label_counts: LabelCounts,
    pub label_bars: Vec<LabelBar>,
}

impl BatchReport {
    pub fn from_batch(batch: Batch) -> Self {
        let label_counts = batch.label_counts();
        Self {
            label_bars: label_bars(&label_counts),
            label_counts,
            records: batch.records,
        }
    }
}

/// Everything the dashboard tab shows for one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_records: usize,
    pub label_counts: LabelCounts,
    pub label_bars: Vec<LabelBar>,
    pub sentiment_over_time: Vec<DailyScore>,
    pub volume_over_time: Vec<DailyVolume>,
    pub top_hashtags: Vec<TermCount>,
    pub top_words: Vec<TermCount>,
    pub word_cloud: Vec<WordCloudEntry>,
    /// Records left out of the daily series for lack of a timestamp
    pub untimed_records: usize,
}

impl DashboardReport {
    /// Run every reduction over the batch.
    ///
    /// Term rankings and the word cloud read the raw record text.
    pub fn build(batch: &Batch, stopwords: &StopWords, limits: &AggregationLimits) -> Self {
        let texts = || batch.iter().map(|r| r.text.as_str());
        let label_counts = batch.label_counts();

        Self {
            total_records: batch.len(),
            label_bars: label_bars(&label_counts),
            label_counts,
            sentiment_over_time: daily_mean_scores(batch),
            volume_over_time: daily_volume(batch),
            top_hashtags: top_hashtags(texts(), limits.top_hashtags),
            top_words: top_words(texts(), stopwords, limits.min_word_length, limits.top_words),
            word_cloud: word_cloud(texts(), stopwords, limits.word_cloud_max_words),
            untimed_records: batch.iter().filter(|r| r.timestamp.is_none()).count(),
        }
    }

    /// Whether there is anything to draw on the time series charts
    pub fn has_time_series(&self) -> bool {
        !self.sentiment_over_time.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScoreResult, SentimentLabel};
    use chrono::NaiveDate;

    fn record(text: &str, score: f64, day: Option<u32>) -> ScoredRecord {
        ScoredRecord {
            text: text.to_string(),
            timestamp: day.and_then(|d| {
                NaiveDate::from_ymd_opt(2024, 7, d).and_then(|date| date.and_hms_opt(12, 0, 0))
            }),
            result: ScoreResult::new(SentimentLabel::from_score(score, &Default::default()), score),
        }
    }

    #[test]
    fn test_report_counts_sum_to_total() {
        let batch = Batch {
            records: vec![
                record("Loved #Paris2024 opening", 0.6, Some(26)),
                record("Terrible queues #paris2024", -0.5, Some(27)),
                record("Okay day", 0.0, None),
            ],
        };
        let report = DashboardReport::build(&batch, &StopWords::english(), &AggregationLimits::default());

        assert_eq!(report.total_records, 3);
        assert_eq!(report.label_counts.total(), 3);
        assert_eq!(report.untimed_records, 1);
        assert_eq!(report.sentiment_over_time.len(), 2);
        assert_eq!(report.top_hashtags[0].term, "#paris2024");
        assert_eq!(report.top_hashtags[0].count, 2);
        assert!(report.has_time_series());
    }

    #[test]
    fn test_empty_batch() {
        let report = DashboardReport::build(&Batch::default(), &StopWords::english(), &AggregationLimits::default());
        assert_eq!(report.total_records, 0);
        assert!(report.label_bars.is_empty());
        assert!(report.word_cloud.is_empty());
        assert!(!report.has_time_series());
    }

    #[test]
    fn test_batch_report() {
        let batch = Batch {
            records: vec![record("good", 0.4, None), record("bad", -0.4, None)],
        };
        let report = BatchReport::from_batch(batch);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.label_counts.positive, 1);
        assert_eq!(report.label_bars.len(), 2);
    }
}
