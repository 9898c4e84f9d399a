//! # Tweet Analysis Demo
//!
//! Classifies a few tweets, shows the preprocessing pipeline and prints a
//! condensed dashboard report.
//!
//! ```bash
//! cargo run --example analyze_tweets
//! ```

use chrono::NaiveDate;
use sentiment_dashboard::{SentimentService, TextRecord};

fn main() {
    println!("=== Olympics Tweet Sentiment Demo ===\n");

    let service = SentimentService::default();

    let tweets = vec![
        "I love the Olympics! This is amazing!",
        "The games were okay, nothing special.",
        "This is terrible, I hate how it was organized",
        "@paris2024 What a GREAT opening ceremony 🎉 #Paris2024 https://t.co/abc",
        "Not bad at all, the swimmers were brilliant #Swimming",
        "Worst queues ever at the stadium... #Paris2024",
    ];

    println!("{}", "=".repeat(70));
    for tweet in &tweets {
        match service.analyze_text(tweet) {
            Ok(result) => {
                println!("\nTweet: \"{}\"", tweet);
                println!("  {} {} ({:.4})", result.glyph, result.label, result.compound_score);
                println!("  Cleaned: \"{}\"", service.preprocessor().preprocess(tweet));
            }
            Err(e) => println!("\nTweet: \"{}\" skipped: {}", tweet, e),
        }
    }
    println!("\n{}", "=".repeat(70));

    // Spread the tweets over the first days of the games
    let records: Vec<TextRecord> = tweets
        .iter()
        .enumerate()
        .map(|(i, tweet)| {
            match NaiveDate::from_ymd_opt(2024, 7, 26 + (i as u32 % 3)).and_then(|d| d.and_hms_opt(12, 0, 0)) {
                Some(ts) => TextRecord::with_timestamp(*tweet, ts),
                None => TextRecord::new(*tweet),
            }
        })
        .collect();

    let report = match service.build_dashboard(&records) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Dashboard failed: {}", e);
            return;
        }
    };

    println!("\nSentiment distribution:");
    for bar in &report.label_bars {
        println!("  {:<9} {:>3} {}", bar.label, bar.count, "#".repeat(bar.count));
    }

    println!("\nSentiment over time:");
    for point in &report.sentiment_over_time {
        println!("  {}  {:+.3}", point.date, point.mean_score);
    }

    println!("\nTop hashtags:");
    for tag in &report.top_hashtags {
        println!("  {:<12} {}", tag.term, tag.count);
    }

    println!("\nWord cloud (top 5):");
    for entry in report.word_cloud.iter().take(5) {
        println!("  {:<12} weight {:.2}", entry.word, entry.weight);
    }
}
