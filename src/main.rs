//! CLI for the sentiment dashboard
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- serve --bind 0.0.0.0:8501
//! cargo run -- analyze --text "I love the Olympics! This is amazing!"
//! cargo run -- batch --file tweets.csv --column Tweet_Content
//! cargo run -- dashboard --file tweets.csv
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentiment_dashboard::{
    data::{parse_text_lines, CsvTable, UploadKind},
    utils::{init_logging, load_config, AppConfig},
    web::{self, fetch_animations, AppState},
    SentimentService, TextRecord,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration read when `--config` is not given and the file exists
const DEFAULT_CONFIG: &str = "config/dashboard.toml";

#[derive(Parser)]
#[command(name = "sentiment_dashboard")]
#[command(version)]
#[command(about = "Sentiment analysis dashboard for Olympics tweets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (json, toml or yaml) [default: config/dashboard.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Classify one text
    Analyze {
        /// Text to classify
        #[arg(short, long)]
        text: String,
    },

    /// Classify every row of a CSV or TXT file
    Batch {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,

        /// Text column for CSV files
        #[arg(long)]
        column: Option<String>,
    },

    /// Print the dashboard report of a tweets file as JSON
    Dashboard {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(|| {
        let path = PathBuf::from(DEFAULT_CONFIG);
        path.exists().then_some(path)
    });
    let mut config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging);
    config.validate().context("Invalid configuration")?;

    let service = SentimentService::from_config(&config).context("Failed to build sentiment service")?;

    match cli.command {
        Commands::Serve { bind } => run_serve(service, config, bind).await?,
        Commands::Analyze { text } => run_analyze(&service, &text)?,
        Commands::Batch { file, column } => run_batch(&service, &config, &file, column)?,
        Commands::Dashboard { file } => run_dashboard(&service, &config, &file)?,
    }

    Ok(())
}

async fn run_serve(service: SentimentService, config: AppConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let animations = fetch_animations(&config.animations).await;
    let state = Arc::new(AppState::new(service, config, animations));

    web::serve(state, &bind)
        .await
        .with_context(|| format!("Server on {} failed", bind))
}

fn run_analyze(service: &SentimentService, text: &str) -> Result<()> {
    let result = service.analyze_text(text)?;
    let scores = service.classifier().polarity_scores(text);

    println!("\n{}  {}", result.glyph, result.label);
    println!("Compound: {:.4}", result.compound_score);
    println!(
        "Breakdown: pos {:.3} / neu {:.3} / neg {:.3}",
        scores.pos, scores.neu, scores.neg
    );
    Ok(())
}

fn read_records(path: &Path, column: &str, timestamp_column: Option<&str>) -> Result<Vec<TextRecord>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path.to_string_lossy();

    let records = match UploadKind::from_filename(&name)? {
        UploadKind::Text => parse_text_lines(&bytes)?,
        UploadKind::Csv => {
            let table = CsvTable::parse(&bytes)?;
            let timestamp_column = timestamp_column.filter(|c| {
                let present = table.has_column(c);
                if !present {
                    warn!(column = %c, "timestamp column missing, time series disabled");
                }
                present
            });
            table.records(column, timestamp_column)?
        }
    };
    info!(file = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

fn run_batch(service: &SentimentService, config: &AppConfig, file: &Path, column: Option<String>) -> Result<()> {
    let column = column.unwrap_or_else(|| config.aggregation.text_column.clone());
    let records = read_records(file, &column, None)?;
    let report = service.analyze_records(&records)?;

    println!("\n{:<10} {:>8}  Text", "Sentiment", "Score");
    println!("{}", "-".repeat(60));
    for record in &report.records {
        let text: String = record.text.chars().take(60).collect();
        println!(
            "{} {:<8} {:>8.4}  {}",
            record.result.glyph, record.result.label, record.result.compound_score, text
        );
    }

    println!("\nSummary:");
    for bar in &report.label_bars {
        println!("  {:<10} {}", bar.label, bar.count);
    }
    Ok(())
}

fn run_dashboard(service: &SentimentService, config: &AppConfig, file: &Path) -> Result<()> {
    let settings = &config.aggregation;
    let records = read_records(file, &settings.text_column, Some(&settings.timestamp_column))?;
    let report = service.build_dashboard(&records)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
