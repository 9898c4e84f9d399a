//! Configuration utilities

use crate::dashboard::AggregationLimits;
use crate::models::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerSettings,
    /// Polarity scoring settings
    pub scoring: ScoringSettings,
    /// Text pipeline settings
    pub text: TextSettings,
    /// Dashboard aggregation settings
    pub aggregation: AggregationSettings,
    /// Decorative animation settings
    pub animations: AnimationSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// People shown on the team tab
    pub team: Vec<TeamMember>,
}

impl AppConfig {
    /// Check values that would make the analysis meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.aggregation.validate()?;
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue(
                "server.max_upload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to listen on
    pub bind: String,
    /// Page title shown in the header
    pub title: String,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// Image shown for team members without a photo
    pub placeholder_photo_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            title: "Olympic Sentiment Analyzer".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            placeholder_photo_url: "https://via.placeholder.com/200".to_string(),
        }
    }
}

/// Polarity scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Compound scores at or above this are positive
    pub positive_threshold: f64,
    /// Compound scores at or below this are negative
    pub negative_threshold: f64,
    /// VADER-format lexicon file; the full bundled VADER lexicon is used when unset
    pub lexicon_path: Option<PathBuf>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            positive_threshold: crate::defaults::POSITIVE_THRESHOLD,
            negative_threshold: crate::defaults::NEGATIVE_THRESHOLD,
            lexicon_path: None,
        }
    }
}

impl ScoringSettings {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            positive: self.positive_threshold,
            negative: self.negative_threshold,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: f64| (-1.0..=1.0).contains(&v);
        if !in_range(self.positive_threshold) || !in_range(self.negative_threshold) {
            return Err(ConfigError::InvalidValue(
                "scoring thresholds must lie in [-1, 1]".to_string(),
            ));
        }
        if self.negative_threshold >= self.positive_threshold {
            return Err(ConfigError::InvalidValue(format!(
                "scoring.negative_threshold ({}) must be below scoring.positive_threshold ({})",
                self.negative_threshold, self.positive_threshold
            )));
        }
        Ok(())
    }
}

/// Text pipeline settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Newline-separated stopword list; the embedded English list when unset
    pub stopwords_path: Option<PathBuf>,
}

/// Dashboard aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Number of hashtags in the top-hashtag chart
    pub top_hashtags: usize,
    /// Number of words in the top-word chart
    pub top_words: usize,
    /// Words must be longer than this to be ranked
    pub min_word_length: usize,
    /// Maximum words drawn in the word cloud
    pub word_cloud_max_words: usize,
    /// CSV column holding the tweet text
    pub text_column: String,
    /// CSV column holding the tweet timestamp
    pub timestamp_column: String,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            top_hashtags: crate::defaults::TOP_HASHTAGS,
            top_words: crate::defaults::TOP_WORDS,
            min_word_length: crate::defaults::MIN_WORD_LENGTH,
            word_cloud_max_words: crate::defaults::WORD_CLOUD_MAX_WORDS,
            text_column: "Tweet_Content".to_string(),
            timestamp_column: "Tweet_Timestamp".to_string(),
        }
    }
}

impl AggregationSettings {
    pub fn limits(&self) -> AggregationLimits {
        AggregationLimits {
            top_hashtags: self.top_hashtags,
            top_words: self.top_words,
            min_word_length: self.min_word_length,
            word_cloud_max_words: self.word_cloud_max_words,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.top_hashtags == 0 || self.top_words == 0 || self.word_cloud_max_words == 0 {
            return Err(ConfigError::InvalidValue(
                "aggregation caps must be positive".to_string(),
            ));
        }
        if self.text_column.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "aggregation.text_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lottie animations shown at the top of each tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Fetch and show animations
    pub enabled: bool,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub home: Option<String>,
    pub analyzer: Option<String>,
    pub dashboard: Option<String>,
    pub team: Option<String>,
    pub info: Option<String>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let url = |path: &str| Some(format!("https://lottie.host/{}.json", path));
        Self {
            enabled: true,
            timeout_secs: 5,
            home: url("fe78a580-e21b-4613-b5d6-cc64b1a934b7/vDApSHkH81"),
            analyzer: url("83213d4d-0fde-4804-86d7-03b17919cf3b/nYDHta6PFS"),
            dashboard: url("a96d76d8-f260-420f-98be-03cf4f377403/NKKum85jXp"),
            team: url("18039274-4e01-4558-845e-a1d1d3b950eb/cKT9Btma01"),
            info: url("93047e01-af1c-425a-89f5-c4d49abc3aaa/LVMzN5PPXM"),
        }
    }
}

impl AnimationSettings {
    /// (tab, url) pairs of the configured animations
    pub fn urls(&self) -> Vec<(&'static str, &str)> {
        [
            ("home", &self.home),
            ("analyzer", &self.analyzer),
            ("dashboard", &self.dashboard),
            ("team", &self.team),
            ("info", &self.info),
        ]
        .into_iter()
        .filter_map(|(tab, url)| url.as_deref().map(|u| (tab, u)))
        .collect()
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON format
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// One entry of the team tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub bio: String,
    /// Local image file
    #[serde(default)]
    pub photo: Option<PathBuf>,
    /// GitHub user name
    #[serde(default)]
    pub github: Option<String>,
    /// LinkedIn profile slug
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Load configuration from file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::FileError(e.to_string()))?;

    let ext = path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "json" => serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string())),
        "toml" => toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string())),
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string())),
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

/// Save configuration to file
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<(), ConfigError> {
    let ext = path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let content = match ext {
        "json" => serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        "toml" => toml::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        "yaml" | "yml" => serde_yaml::to_string(config)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        _ => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
    };

    std::fs::write(path, content)
        .map_err(|e| ConfigError::FileError(e.to_string()))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Serialization error
    #[error("Serialize error: {0}")]
    SerializeError(String),
    /// Unsupported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    /// Value out of range
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scoring.positive_threshold, 0.05);
        assert_eq!(config.scoring.negative_threshold, -0.05);
        assert_eq!(config.aggregation.top_hashtags, 10);
        assert_eq!(config.aggregation.top_words, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = AppConfig::default();
        config.scoring.positive_threshold = -0.1;
        config.scoring.negative_threshold = 0.1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let mut config = AppConfig::default();
        config.aggregation.top_words = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "[aggregation]\ntop_words = 5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.aggregation.top_words, 5);
        assert_eq!(config.aggregation.top_hashtags, 10);
        assert_eq!(config.server.bind, "127.0.0.1:8501");
    }

    #[test]
    fn test_save_and_load_each_format() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.team.push(TeamMember {
            name: "Ada".to_string(),
            title: "Analyst".to_string(),
            bio: String::new(),
            photo: None,
            github: Some("ada".to_string()),
            linkedin: None,
            email: None,
        });

        for ext in ["json", "toml", "yaml"] {
            let path = dir.path().join(format!("config.{}", ext));
            save_config(&config, &path).unwrap();
            let loaded = load_config(&path).unwrap();
            assert_eq!(loaded.team, config.team, "format {}", ext);
        }
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "x=1").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_animation_urls() {
        let mut settings = AnimationSettings::default();
        assert_eq!(settings.urls().len(), 5);
        settings.team = None;
        assert!(settings.urls().iter().all(|(tab, _)| *tab != "team"));
    }
}
