//! # Sentiment Module
//!
//! VADER polarity scoring and three-way classification.

mod classifier;
mod lexicon;
mod vader;

pub use classifier::{clean_text, SentimentClassifier};
pub use lexicon::{Lexicon, SentimentLexicon};
pub use vader::{PolarityScorer, VaderAnalyzer, VaderScorer};
