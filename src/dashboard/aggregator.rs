//! # Batch Aggregates
//!
//! Read-only reductions of a scored batch: daily series, label bars and
//! term frequency rankings.

use crate::models::{Batch, LabelCounts, SentimentLabel};
use crate::nlp::StopWords;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static HASHTAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());

/// Mean compound score of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub mean_score: f64,
}

/// Number of records on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub count: usize,
}

/// One bar of the label-count chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelBar {
    pub label: SentimentLabel,
    pub count: usize,
    pub color: String,
}

/// A ranked term and its frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Mean score per date, oldest first; untimed records are skipped
pub fn daily_mean_scores(batch: &Batch) -> Vec<DailyScore> {
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in batch.iter() {
        if let Some(ts) = record.timestamp {
            let entry = by_date.entry(ts.date()).or_insert((0.0, 0));
            entry.0 += record.result.compound_score;
            entry.1 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (sum, count))| DailyScore {
            date,
            mean_score: sum / count as f64,
        })
        .collect()
}

/// Record count per date, oldest first; untimed records are skipped
pub fn daily_volume(batch: &Batch) -> Vec<DailyVolume> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for ts in batch.iter().filter_map(|r| r.timestamp) {
        *by_date.entry(ts.date()).or_insert(0) += 1;
    }

    by_date
        .into_iter()
        .map(|(date, count)| DailyVolume { date, count })
        .collect()
}

/// Label bars ordered by count, with their chart colors
pub fn label_bars(counts: &LabelCounts) -> Vec<LabelBar> {
    counts
        .ranked()
        .into_iter()
        .map(|(label, count)| LabelBar {
            label,
            count,
            color: label.color().to_string(),
        })
        .collect()
}

/// Most frequent hashtags (lowercased, `#` kept)
pub fn top_hashtags<'a, I>(texts: I, limit: usize) -> Vec<TermCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags = Vec::new();
    for text in texts {
        let lower = text.to_lowercase();
        tags.extend(HASHTAG_REGEX.find_iter(&lower).map(|m| m.as_str().to_string()));
    }
    rank_terms(tags, limit)
}

/// Most frequent whitespace tokens longer than `min_length` that are not
/// stopwords
///
/// Surrounding punctuation is trimmed so "medal!" and "medal" count together.
pub fn top_words<'a, I>(
    texts: I,
    stopwords: &StopWords,
    min_length: usize,
    limit: usize,
) -> Vec<TermCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words = Vec::new();
    for text in texts {
        let lower = text.to_lowercase();
        for token in lower.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '#');
            if word.chars().count() > min_length && !stopwords.contains(word) {
                words.push(word.to_string());
            }
        }
    }
    rank_terms(words, limit)
}

/// Count terms and keep the `limit` most frequent.
///
/// Equal counts keep the order in which terms first appeared.
pub(crate) fn rank_terms<I>(terms: I, limit: usize) -> Vec<TermCount>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, term) in terms.into_iter().enumerate() {
        counts.entry(term).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(term, count, _)| TermCount { term, count })
        .collect()
}
