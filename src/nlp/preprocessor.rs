//! # Text Preprocessor
//!
//! Normalizes tweets for aggregate analysis.
//!
//! Steps:
//! 1. Lowercase
//! 2. Remove URLs
//! 3. Remove @mentions and `#` markers
//! 4. Replace emoji with their names
//! 5. Remove non-word characters
//! 6. Tokenize on whitespace
//! 7. Drop stopwords
//! 8. Lemmatize
//! 9. Rejoin with single spaces

use super::emoji::demojize;
use super::lemmatizer::Lemmatizer;
use super::stopwords::StopWords;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").unwrap());
static MENTION_OR_HASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+|#").unwrap());
static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Stateless preprocessor over shared stopword and lemmatizer resources
#[derive(Debug, Clone)]
pub struct Preprocessor {
    stopwords: Arc<StopWords>,
    lemmatizer: Arc<Lemmatizer>,
}

impl Preprocessor {
    pub fn new(stopwords: Arc<StopWords>, lemmatizer: Arc<Lemmatizer>) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// Clean a raw text into space-separated lemmas
    pub fn preprocess(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Same pipeline as [`Preprocessor::preprocess`], returning the tokens
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let no_urls = URL_REGEX.replace_all(&lower, "");
        let no_mentions = MENTION_OR_HASH_REGEX.replace_all(&no_urls, "");
        let demojized = demojize(&no_mentions);
        let words_only = NON_WORD_REGEX.replace_all(&demojized, "");
        // Punctuation removal can glue a new URL-like token together
        let words_only = URL_REGEX.replace_all(&words_only, "");

        words_only
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.lemmatizer.lemmatize(token))
            .filter(|lemma| !self.stopwords.contains(lemma))
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(Arc::new(StopWords::english()), Arc::new(Lemmatizer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let preprocessor = Preprocessor::default();
        let text = "The Athletes were AMAZING at #Paris2024 🏅 @olympics https://t.co/xyz";
        assert_eq!(
            preprocessor.preprocess(text),
            "athlete amazing paris2024 sports_medal"
        );
    }

    #[test]
    fn test_punctuation_removed() {
        let preprocessor = Preprocessor::default();
        assert_eq!(preprocessor.preprocess("Wow!!! Great, games..."), "wow great game");
    }

    #[test]
    fn test_only_stopwords() {
        let preprocessor = Preprocessor::default();
        assert_eq!(preprocessor.preprocess("it is what it is"), "");
    }

    #[test]
    fn test_idempotent() {
        let preprocessor = Preprocessor::default();
        let samples = [
            "The Athletes were AMAZING at #Paris2024 🏅 @olympics https://t.co/xyz",
            "Swimmers broke records!!! So many medals, ceremonies & parties 🎉🎉",
            "ht.tpfoo is glued after punctuation removal",
            "Wills and ways: the women's relay",
            "   ",
            "Ñandú corrió rápido; ¡qué emoción!",
        ];
        for sample in samples {
            let once = preprocessor.preprocess(sample);
            let twice = preprocessor.preprocess(&once);
            assert_eq!(once, twice, "sample {:?}", sample);
        }
    }
}
