//! # NLP Module
//!
//! Text normalization used by the dashboard aggregates:
//! - Stopword filtering
//! - Emoji to text conversion
//! - Lemmatization
//! - The full preprocessing pipeline

mod emoji;
mod lemmatizer;
mod preprocessor;
mod stopwords;

pub use emoji::demojize;
pub use lemmatizer::Lemmatizer;
pub use preprocessor::Preprocessor;
pub use stopwords::StopWords;
