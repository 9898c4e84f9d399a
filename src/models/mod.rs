//! Data models for sentiment analysis

mod types;

pub use types::*;
