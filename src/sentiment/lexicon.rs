//! # Valence Lexicon
//!
//! Word-to-valence table for scoring with a custom lexicon file. Valences are
//! on the VADER scale of roughly -4.0 to 4.0.

use crate::error::{DashboardError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Trait for a word-level sentiment lexicon
pub trait SentimentLexicon {
    /// Valence of a (lowercase) word, if the lexicon knows it
    fn valence(&self, word: &str) -> Option<f64>;

    /// Check whether the word is in the lexicon
    fn contains(&self, word: &str) -> bool {
        self.valence(word).is_some()
    }

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Word-to-valence lexicon
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon file in the VADER format
    ///
    /// Each line is `token<TAB>mean<TAB>std<TAB>[ratings]`; only the first two
    /// fields are used. Blank lines are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a VADER-format lexicon from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = Self::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let mean = fields.next().ok_or_else(|| DashboardError::Lexicon {
                line: line_no,
                message: "missing valence column".to_string(),
            })?;
            let valence: f64 = mean.trim().parse().map_err(|_| DashboardError::Lexicon {
                line: line_no,
                message: format!("invalid valence '{}'", mean.trim()),
            })?;

            if token.is_empty() {
                return Err(DashboardError::Lexicon {
                    line: line_no,
                    message: "empty token".to_string(),
                });
            }
            lexicon.insert(token, valence);
        }

        Ok(lexicon)
    }

    /// Add or replace a word
    pub fn insert(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }
}

impl SentimentLexicon for Lexicon {
    fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    fn len(&self) -> usize {
        self.valences.len()
    }
}
