//! Word cloud data
//!
//! The browser draws the cloud; this module only decides which words appear
//! and how large they are relative to each other.

use super::aggregator::rank_terms;
use crate::nlp::StopWords;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w[\w']+").unwrap());

/// One word of the cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub word: String,
    pub count: usize,
    /// Count relative to the most frequent word, in (0, 1]
    pub weight: f64,
}

/// Build word cloud entries from the concatenated raw texts
pub fn word_cloud<'a, I>(texts: I, stopwords: &StopWords, max_words: usize) -> Vec<WordCloudEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words = Vec::new();
    for text in texts {
        let lower = text.to_lowercase();
        words.extend(
            WORD_REGEX
                .find_iter(&lower)
                .map(|m| m.as_str().trim_end_matches("'s").to_string())
                .filter(|w| !stopwords.contains(w)),
        );
    }

    let ranked = rank_terms(words, max_words);
    let Some(max) = ranked.first().map(|t| t.count) else {
        return Vec::new();
    };

    ranked
        .into_iter()
        .map(|t| WordCloudEntry {
            weight: t.count as f64 / max as f64,
            word: t.term,
            count: t.count,
        })
        .collect()
}
