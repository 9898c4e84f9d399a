//! # Sentiment Service
//!
//! One entry point per user action. Every shared resource (lexicon,
//! stopwords, lemmatizer, limits) is built once and only read afterwards, so
//! the service can be shared across request handlers behind an `Arc`.

use crate::dashboard::{AggregationLimits, BatchReport, DashboardReport};
use crate::error::{DashboardError, Result};
use crate::models::{Batch, ScoreResult, ScoredRecord, TextRecord};
use crate::nlp::{Lemmatizer, Preprocessor, StopWords};
use crate::sentiment::{
    Lexicon, PolarityScorer, SentimentClassifier, SentimentLexicon, VaderAnalyzer, VaderScorer,
};
use crate::utils::AppConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Classifier, preprocessor and aggregation limits bundled together
#[derive(Debug, Clone)]
pub struct SentimentService {
    classifier: SentimentClassifier,
    preprocessor: Preprocessor,
    limits: AggregationLimits,
}

impl SentimentService {
    pub fn new(
        classifier: SentimentClassifier,
        preprocessor: Preprocessor,
        limits: AggregationLimits,
    ) -> Self {
        Self {
            classifier,
            preprocessor,
            limits,
        }
    }

    /// Build every resource named by the configuration.
    ///
    /// Without `scoring.lexicon_path` the full VADER lexicon is used.
    /// Unreadable or malformed lexicon and stopword files are errors.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let scorer: Arc<dyn PolarityScorer> = match &config.scoring.lexicon_path {
            Some(path) => {
                let lexicon = Lexicon::load(path)?;
                info!(path = %path.display(), words = lexicon.len(), "loaded lexicon");
                Arc::new(VaderScorer::new(lexicon))
            }
            None => Arc::new(VaderAnalyzer),
        };

        let stopwords = match &config.text.stopwords_path {
            Some(path) => {
                let stopwords = StopWords::load(path)?;
                info!(path = %path.display(), words = stopwords.len(), "loaded stopwords");
                stopwords
            }
            None => StopWords::english(),
        };

        let classifier = SentimentClassifier::new(scorer, config.scoring.thresholds());
        let preprocessor = Preprocessor::new(Arc::new(stopwords), Arc::new(Lemmatizer::new()));

        Ok(Self::new(classifier, preprocessor, config.aggregation.limits()))
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn limits(&self) -> &AggregationLimits {
        &self.limits
    }

    /// Classify one manually entered text
    pub fn analyze_text(&self, text: &str) -> Result<ScoreResult> {
        if text.trim().is_empty() {
            return Err(DashboardError::EmptyInput);
        }
        Ok(self.classifier.classify(text))
    }

    /// Classify each record as written
    pub fn analyze_records(&self, records: &[TextRecord]) -> Result<BatchReport> {
        if records.is_empty() {
            return Err(DashboardError::EmptyInput);
        }
        let batch = self.score(records, |text| self.classifier.classify(text));
        debug!(records = batch.len(), "analyzed batch");
        Ok(BatchReport::from_batch(batch))
    }

    /// Preprocess and classify each record, then reduce the batch into
    /// dashboard charts
    pub fn build_dashboard(&self, records: &[TextRecord]) -> Result<DashboardReport> {
        if records.is_empty() {
            return Err(DashboardError::EmptyInput);
        }
        let batch = self.score(records, |text| {
            self.classifier.classify(&self.preprocessor.preprocess(text))
        });
        let report = DashboardReport::build(&batch, self.preprocessor.stopwords(), &self.limits);
        info!(
            records = report.total_records,
            untimed = report.untimed_records,
            "built dashboard"
        );
        Ok(report)
    }

    fn score<F>(&self, records: &[TextRecord], classify: F) -> Batch
    where
        F: Fn(&str) -> ScoreResult,
    {
        Batch {
            records: records
                .iter()
                .map(|record| ScoredRecord {
                    text: record.text.clone(),
                    timestamp: record.timestamp,
                    result: classify(&record.text),
                })
                .collect(),
        }
    }
}

impl Default for SentimentService {
    fn default() -> Self {
        Self::new(
            SentimentClassifier::default(),
            Preprocessor::default(),
            AggregationLimits::default(),
        )
    }
}
