//! # VADER Polarity Scorers
//!
//! Two implementations of [`PolarityScorer`]:
//!
//! - [`VaderAnalyzer`] delegates to the `vader_sentiment` crate, which ships
//!   the complete VADER lexicon. It is the default scorer.
//! - [`VaderScorer`] runs the same heuristics over a user-supplied lexicon in
//!   the VADER file format (`scoring.lexicon_path`).

use super::lexicon::{Lexicon, SentimentLexicon};
use crate::models::PolarityScores;
use unicode_segmentation::UnicodeSegmentation;

/// Empirically derived increment for booster words
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;

/// Increment for ALL-CAPS words in mixed-case text
const C_INCR: f64 = 0.733;

/// Scalar applied to negated valences
const N_SCALAR: f64 = -0.74;

/// Normalization constant approximating the max expected raw score
const ALPHA: f64 = 15.0;

const EXCLAMATION_AMPLIFIER: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_AMPLIFIER: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Negation words
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
    "ain't", "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't",
    "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
    "don't", "hadn't", "hasn't", "haven't", "isn't", "mightn't", "mustn't",
    "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without",
    "wont", "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

/// Booster (intensifier) and dampener words
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fabulously", B_INCR),
    ("fully", B_INCR),
    ("greatly", B_INCR),
    ("hella", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("uber", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
    ("sorta", B_DECR),
    ("sortof", B_DECR),
    ("kindof", B_DECR),
    ("kind of", B_DECR),
    ("sort of", B_DECR),
];

/// Idioms whose valence replaces the valence of the word they end on
const SPECIAL_CASES: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
];

/// Seam between the classifier and whatever produces polarity scores
pub trait PolarityScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

/// Scorer backed by the `vader_sentiment` crate and its full lexicon
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderAnalyzer;

impl PolarityScorer for VaderAnalyzer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::default();
        }

        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        let field = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        PolarityScores {
            neg: round_to(field("neg"), 3),
            neu: round_to(field("neu"), 3),
            pos: round_to(field("pos"), 3),
            compound: round_to(field("compound"), 4).clamp(-1.0, 1.0),
        }
    }
}

/// VADER heuristics over a custom lexicon
#[derive(Debug, Clone)]
pub struct VaderScorer<L = Lexicon> {
    lexicon: L,
}

impl<L: SentimentLexicon> VaderScorer<L> {
    pub fn new(lexicon: L) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    fn word_valence(&self, words: &[Token], i: usize, cap_diff: bool) -> f64 {
        let token = &words[i];
        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };

        if token.is_upper && cap_diff {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let previous = &words[i - distance];
            if !self.lexicon.contains(&previous.lower) {
                let mut scalar = booster_scalar(previous, valence, cap_diff);
                if distance == 2 {
                    scalar *= 0.95;
                } else if distance == 3 {
                    scalar *= 0.9;
                }
                valence += scalar;
                valence = negation_check(valence, words, distance, i);
                if distance == 3 {
                    valence = special_idioms_check(valence, words, i);
                }
            }
        }

        self.least_check(valence, words, i)
    }

    /// "least" before a word flips it, except in "at least" and "very least"
    fn least_check(&self, valence: f64, words: &[Token], i: usize) -> f64 {
        if i == 0 {
            return valence;
        }
        let previous = words[i - 1].lower.as_str();
        if previous != "least" || self.lexicon.contains(previous) {
            return valence;
        }
        if i > 1 && matches!(words[i - 2].lower.as_str(), "at" | "very") {
            return valence;
        }
        valence * N_SCALAR
    }
}

impl<L: SentimentLexicon + Send + Sync> PolarityScorer for VaderScorer<L> {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let words = tokenize(&describe_emoji(text));
        let cap_diff = allcap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for (i, token) in words.iter().enumerate() {
            if booster(&token.lower).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if token.lower == "kind" && words.get(i + 1).is_some_and(|next| next.lower == "of") {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.word_valence(&words, i, cap_diff));
        }

        but_check(&words, &mut sentiments);
        score_valence(&sentiments, text)
    }
}

#[derive(Debug, Clone)]
struct Token {
    lower: String,
    is_upper: bool,
}

/// Replace each emoji with its spoken name so the lexicon can score it
fn describe_emoji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        match emojis::get(grapheme) {
            Some(emoji) => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(emoji.name());
                out.push(' ');
            }
            None => out.push_str(grapheme),
        }
    }
    out
}

/// Strip surrounding punctuation unless that leaves two characters or fewer,
/// which keeps emoticons such as `:)` and `:-(` intact
fn strip_punctuation(raw: &str) -> &str {
    let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        raw
    } else {
        stripped
    }
}

/// Split on whitespace and drop single characters
fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(strip_punctuation)
        .filter(|word| word.chars().count() > 1)
        .map(|word| Token {
            lower: word.to_lowercase(),
            is_upper: is_all_caps(word),
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// True when some, but not all, words are ALL CAPS
fn allcap_differential(words: &[Token]) -> bool {
    let caps = words.iter().filter(|t| t.is_upper).count();
    caps > 0 && caps < words.len()
}

fn booster(word: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(booster, _)| *booster == word)
        .map(|(_, scalar)| *scalar)
}

fn booster_scalar(token: &Token, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(&token.lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if token.is_upper && cap_diff {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn negation_check(valence: f64, words: &[Token], distance: usize, i: usize) -> f64 {
    let back = |n: usize| words[i - n].lower.as_str();
    match distance {
        1 => {
            if is_negated(back(1)) {
                return valence * N_SCALAR;
            }
        }
        2 => {
            if back(2) == "never" && matches!(back(1), "so" | "this") {
                return valence * 1.25;
            }
            if back(2) == "without" && back(1) == "doubt" {
                return valence;
            }
            if is_negated(back(2)) {
                return valence * N_SCALAR;
            }
        }
        _ => {
            if back(3) == "never" && (matches!(back(2), "so" | "this") || matches!(back(1), "so" | "this")) {
                return valence * 1.25;
            }
            if back(3) == "without" && (back(2) == "doubt" || back(1) == "doubt") {
                return valence;
            }
            if is_negated(back(3)) {
                return valence * N_SCALAR;
            }
        }
    }
    valence
}

/// Idioms spanning the three words before `i` (or starting at `i`) replace
/// its valence; booster bigrams such as "kind of" add to it
fn special_idioms_check(valence: f64, words: &[Token], i: usize) -> f64 {
    let w = |n: usize| words[n].lower.as_str();
    let special = |phrase: &str| {
        SPECIAL_CASES
            .iter()
            .find(|(idiom, _)| *idiom == phrase)
            .map(|(_, value)| *value)
    };

    let one_zero = format!("{} {}", w(i - 1), w(i));
    let two_one_zero = format!("{} {} {}", w(i - 2), w(i - 1), w(i));
    let two_one = format!("{} {}", w(i - 2), w(i - 1));
    let three_two_one = format!("{} {} {}", w(i - 3), w(i - 2), w(i - 1));
    let three_two = format!("{} {}", w(i - 3), w(i - 2));

    let mut valence = [&one_zero, &two_one_zero, &two_one, &three_two_one, &three_two]
        .into_iter()
        .find_map(|sequence| special(sequence))
        .unwrap_or(valence);

    if i + 1 < words.len() {
        if let Some(value) = special(&format!("{} {}", w(i), w(i + 1))) {
            valence = value;
        }
    }
    if i + 2 < words.len() {
        if let Some(value) = special(&format!("{} {} {}", w(i), w(i + 1), w(i + 2))) {
            valence = value;
        }
    }

    for n_gram in [&three_two_one, &three_two, &two_one] {
        if let Some(scalar) = booster(n_gram) {
            valence += scalar;
        }
    }
    valence
}

/// Words before "but" are dampened, words after it are emphasized
fn but_check(words: &[Token], sentiments: &mut [f64]) {
    let Some(but_index) = words.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (index, sentiment) in sentiments.iter_mut().enumerate() {
        if index < but_index {
            *sentiment *= 0.5;
        } else if index > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let exclamation_amp = exclamations as f64 * EXCLAMATION_AMPLIFIER;

    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_AMPLIFIER,
        _ => QUESTION_CAP,
    };

    exclamation_amp + question_amp
}

/// Map an unbounded raw score into [-1, 1]
fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let amplifier = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += amplifier;
    } else if sum < 0.0 {
        sum -= amplifier;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += amplifier;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= amplifier;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    PolarityScores {
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to((neu_count / total).abs(), 3),
        pos: round_to((pos_sum / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Excerpt of the VADER lexicon file format with the published valences
    const LEXICON: &str = "amazing\t2.8\t0.87178\t[3, 3, 4, 3, 2, 1, 3, 4, 3, 2]
awful\t-2.0\t1.48324\t[-2, -3, -3, -2, -3, 3, -3, -3, -3, -1]
good\t1.9\t0.9434\t[2, 1, 1, 3, 2, 4, 2, 2, 1, 1]
great\t3.1\t0.7\t[3, 4, 4, 4, 3, 2, 3, 2, 3, 3]
hate\t-2.7\t1.00499\t[-4, -3, -4, -4, -2, -2, -2, -2, -1, -3]
heart\t1.0\t0.5\t[1, 1]
love\t3.2\t0.4\t[3, 3, 3, 3, 3, 3, 3, 4, 4, 3]
party\t1.7\t0.64031\t[2, 2, 1, 2, 3, 1, 1, 1, 2, 2]
terrible\t-2.5\t1.50333\t[-3, -3, -3, -1, -3, -4, 1, -3, -3, -3]
:)\t2.0\t1.18322\t[2, 2, 1, 1, 1, 1, 4, 3, 4, 1]
";

    fn scorer() -> VaderScorer {
        VaderScorer::new(Lexicon::from_reader(Cursor::new(LEXICON)).unwrap())
    }

    fn compound(text: &str) -> f64 {
        scorer().polarity_scores(text).compound
    }

    #[test]
    fn test_positive_text() {
        // 3.2 + 2.8 + 2 * 0.292 normalized with alpha 15
        assert_eq!(compound("I love the Olympics! This is amazing!"), 0.8619);
    }

    #[test]
    fn test_negative_text() {
        assert_eq!(compound("This is terrible, I hate how it was organized"), -0.802);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(compound("The games were good") > 0.0);
        assert!(compound("The games were not good") < 0.0);
        assert!(compound("The games weren't good") < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        assert!(compound("The opening was very good") > compound("The opening was good"));
        assert!(compound("The opening was slightly good") < compound("The opening was good"));
    }

    #[test]
    fn test_booster_bigram_dampens() {
        assert!(compound("it was kind of good") < compound("it was good"));
        assert!(compound("it was kind of good") > 0.0);
    }

    #[test]
    fn test_least_check() {
        assert!(compound("the least good option") < 0.0);
        assert!(compound("at least good") > 0.0);
    }

    #[test]
    fn test_idiom_replaces_valence() {
        assert!(compound("this left me with a heart") > 0.0);
        assert!(compound("this left me with a broken heart") < 0.0);
    }

    #[test]
    fn test_emoticon_kept_by_tokenizer() {
        assert!(compound("see you there :)") > 0.0);
        assert_eq!(strip_punctuation(":)"), ":)");
        assert_eq!(strip_punctuation("good!!"), "good");
        assert_eq!(strip_punctuation("ok,"), "ok,");
    }

    #[test]
    fn test_emoji_scored_by_name() {
        assert_eq!(describe_emoji("done🎉"), "done party popper ");
        assert!(compound("Opening night 🎉") > 0.0);
    }

    #[test]
    fn test_caps_emphasis() {
        assert!(compound("The opening was GOOD") > compound("The opening was good"));
        // All-caps text carries no differential emphasis
        assert_eq!(compound("THE OPENING WAS GOOD"), compound("the opening was good"));
    }

    #[test]
    fn test_exclamation_emphasis() {
        assert!(compound("good!!!") > compound("good"));
        assert_eq!(compound("good!!!!!!"), compound("good!!!!"));
    }

    #[test]
    fn test_but_shifts_weight() {
        assert!(compound("The food was great but the service was terrible") < 0.0);
    }

    #[test]
    fn test_no_sentiment_words() {
        let scores = scorer().polarity_scores("The stadium opens at noon");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(scorer().polarity_scores("   "), PolarityScores::default());
        assert_eq!(VaderAnalyzer.polarity_scores(""), PolarityScores::default());
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let scores = scorer().polarity_scores("great games but awful weather");
        let sum = scores.neg + scores.neu + scores.pos;
        assert!((sum - 1.0).abs() < 0.01, "sum {}", sum);
    }

    #[test]
    fn test_compound_bounded() {
        let score = compound("love love love love love love love love love love!!!!");
        assert!(score <= 1.0 && score > 0.9);
    }

    #[test]
    fn test_analyzer_matches_reference_examples() {
        let close = |text: &str, expected: f64| {
            let score = VaderAnalyzer.polarity_scores(text).compound;
            assert!((score - expected).abs() < 0.01, "{} -> {}", text, score);
        };
        close("I love the Olympics! This is amazing!", 0.8619);
        close("This is terrible, I hate how it was organized", -0.802);
        close("good", 0.4404);
    }

    #[test]
    fn test_analyzer_tweet_vocabulary() {
        let score = |text: &str| VaderAnalyzer.polarity_scores(text).compound;

        assert!(score("Thrilled and grateful for this gold medal") > 0.05);
        assert!(score("lol this is hilarious") > 0.05);
        assert!(score("Congrats to the team, what a win!") > 0.05);
        assert!(score("Boo, the referee robbed us. Unacceptable!") < -0.05);
        assert!(score("Such a disappointing and boring final") < -0.05);
        assert_eq!(score("The ceremony starts at eight tonight"), 0.0);
    }
}
