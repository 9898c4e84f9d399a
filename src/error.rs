//! # Errors
//!
//! Error types shared by the analysis pipeline and the web layer.

use thiserror::Error;

/// Errors that can occur while turning user input into sentiment results
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("no text to analyze")]
    EmptyInput,

    #[error("column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("unsupported upload '{0}', expected a .csv or .txt file")]
    UnsupportedUpload(String),

    #[error("upload is not valid UTF-8 text")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("lexicon error at line {line}: {message}")]
    Lexicon { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Whether the error is something the user can fix by changing the input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DashboardError::EmptyInput
                | DashboardError::MissingColumn { .. }
                | DashboardError::UnsupportedUpload(_)
                | DashboardError::InvalidEncoding(_)
                | DashboardError::Csv(_)
        )
    }
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_lists_alternatives() {
        let err = DashboardError::MissingColumn {
            column: "Tweet_Content".to_string(),
            available: vec!["id".to_string(), "text".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "column 'Tweet_Content' not found (available: id, text)"
        );
        assert!(err.is_user_error());
    }

    #[test]
    fn test_lexicon_error_is_not_user_error() {
        let err = DashboardError::Lexicon {
            line: 3,
            message: "bad valence".to_string(),
        };
        assert!(!err.is_user_error());
    }
}
