//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for edustat operations
#[derive(Debug, Error)]
pub enum EdustatError {
    /// An input data file does not exist
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// An input file exists but its columns or values do not match the
    /// expected schema
    #[error("schema error in {}: {message}", path.display())]
    Schema { message: String, path: PathBuf },

    /// Paired or joined tables disagree on record counts or identities
    #[error("alignment error: {0}")]
    Alignment(String),

    /// Statistical input too small or with zero variance for the requested test
    #[error("degenerate statistical input: {0}")]
    DegenerateInput(String),

    /// No students survive an intersection across data sources
    #[error("empty cohort: {0}")]
    EmptyCohort(String),

    /// A correlation column has zero variance
    #[error("constant column: `{column}` has zero variance")]
    ConstantColumn { column: String },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Figure rendering errors
    #[error("figure rendering failed: {0}")]
    Render(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV parsing errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl EdustatError {
    /// Create a schema error with path context
    pub fn schema(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Schema {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a rendering error from any displayable backend error
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, EdustatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message_names_the_path() {
        let err = EdustatError::MissingFile {
            path: PathBuf::from("data/test_scores.csv"),
        };
        assert_eq!(
            err.to_string(),
            "input file not found: data/test_scores.csv"
        );
    }

    #[test]
    fn constant_column_message_names_the_column() {
        let err = EdustatError::ConstantColumn {
            column: "srl_score".to_string(),
        };
        assert!(err.to_string().contains("srl_score"));
    }
}
