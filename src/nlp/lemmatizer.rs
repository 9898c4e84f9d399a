//! Noun lemmatizer
//!
//! Reduces plural nouns to their dictionary form with an exception table for
//! irregular plurals and a small set of suffix rules. Rules are applied until
//! the word stops changing, so `lemmatize` is idempotent.

use std::collections::HashMap;

/// Irregular plurals and words that only look plural
const EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("echoes", "echo"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("heroes", "hero"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("news", "news"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("potatoes", "potato"),
    ("series", "series"),
    ("shelves", "shelf"),
    ("species", "species"),
    ("sportsmen", "sportsman"),
    ("sportswomen", "sportswoman"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// (suffix, replacement) pairs, checked in order
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("ies", "y"),
];

/// Endings that never lose a trailing "s"
const KEEP_S: &[&str] = &["ss", "us", "is"];

/// Words this short are left untouched
const MIN_LENGTH: usize = 3;

/// Rule-based lemmatizer, built once and shared read-only
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            exceptions: EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Dictionary form of a lowercase word
    pub fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();
        while let Some(next) = self.reduce(&current) {
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// One reduction step; `None` when no rule applies
    fn reduce(&self, word: &str) -> Option<String> {
        if let Some(base) = self.exceptions.get(word) {
            return Some(base.to_string());
        }
        if word.chars().count() <= MIN_LENGTH {
            return None;
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return Some(format!("{}{}", stem, replacement));
                }
            }
        }

        if word.ends_with('s') && !KEEP_S.iter().any(|ending| word.ends_with(ending)) {
            return Some(word[..word.len() - 1].to_string());
        }

        None
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("games"), "game");
        assert_eq!(lemmatizer.lemmatize("athletes"), "athlete");
        assert_eq!(lemmatizer.lemmatize("medals"), "medal");
        assert_eq!(lemmatizer.lemmatize("ceremonies"), "ceremony");
        assert_eq!(lemmatizer.lemmatize("matches"), "match");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("classes"), "class");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
        assert_eq!(lemmatizer.lemmatize("people"), "person");
        assert_eq!(lemmatizer.lemmatize("heroes"), "hero");
    }

    #[test]
    fn test_words_left_alone() {
        let lemmatizer = Lemmatizer::new();
        for word in ["glass", "status", "analysis", "news", "gas", "paris2024", "run"] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_idempotent() {
        let lemmatizer = Lemmatizer::new();
        for word in ["dresses", "analyses", "stories", "olympics", "swimmers", "ties", "buses"] {
            let once = lemmatizer.lemmatize(word);
            assert_eq!(lemmatizer.lemmatize(&once), once, "word {}", word);
        }
    }
}
