//! # Sentiment Dashboard
//!
//! Lexicon-based sentiment analysis of short social media texts with a
//! browser dashboard on top.
//!
//! ## Modules
//!
//! - `sentiment` - VADER polarity scoring and three-way labels
//! - `nlp` - Text preprocessing (stopwords, emoji names, lemmatization)
//! - `data` - CSV/TXT uploads and timestamp parsing
//! - `dashboard` - Batch aggregates for the charts
//! - `service` - One entry point per user action
//! - `web` - HTTP adapter serving the tabs
//! - `utils` - Configuration and logging
//!
//! ## Example
//!
//! ```rust
//! use sentiment_dashboard::{SentimentLabel, SentimentService};
//!
//! let service = SentimentService::default();
//! let result = service.analyze_text("I love the Olympics! This is amazing!").unwrap();
//! assert_eq!(result.label, SentimentLabel::Positive);
//! ```

pub mod dashboard;
pub mod data;
pub mod error;
pub mod models;
pub mod nlp;
pub mod sentiment;
pub mod service;
pub mod utils;
pub mod web;

pub use dashboard::{AggregationLimits, BatchReport, DashboardReport};
pub use error::{DashboardError, Result};
pub use models::{Batch, LabelCounts, ScoreResult, ScoredRecord, SentimentLabel, TextRecord, Thresholds};
pub use nlp::Preprocessor;
pub use sentiment::{PolarityScorer, SentimentClassifier, VaderAnalyzer, VaderScorer};
pub use service::SentimentService;
pub use utils::{load_config, AppConfig};

/// Default configuration values
pub mod defaults {
    /// Compound score at or above which a text is positive
    pub const POSITIVE_THRESHOLD: f64 = 0.05;

    /// Compound score at or below which a text is negative
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    /// Hashtags shown in the top-hashtag chart
    pub const TOP_HASHTAGS: usize = 10;

    /// Words shown in the top-word chart
    pub const TOP_WORDS: usize = 20;

    /// Words must be longer than this to be ranked
    pub const MIN_WORD_LENGTH: usize = 3;

    /// Words drawn in the word cloud
    pub const WORD_CLOUD_MAX_WORDS: usize = 200;

    /// Crate version reported by the health endpoint
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
