//! Error handling for the cv-match engine and CLI

use thiserror::Error;

/// Which engine input failed its minimum-length precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Job,
    Cv,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Job => write!(f, "job listing"),
            InputKind::Cv => write!(f, "CV"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CvMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{kind} text too short: {actual} characters after trimming (minimum {min})")]
    InputTooShort {
        kind: InputKind,
        min: usize,
        actual: usize,
    },

    #[error("missing {0} profile: stage invoked out of order")]
    MissingProfile(&'static str),

    #[error("skill lexicon load failed: {0}")]
    LexiconLoad(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CvMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvMatchError {
    fn from(err: anyhow::Error) -> Self {
        CvMatchError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_too_short_message() {
        let err = CvMatchError::InputTooShort {
            kind: InputKind::Job,
            min: 50,
            actual: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("job listing"));
        assert!(msg.contains("50"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_missing_profile_message() {
        let err = CvMatchError::MissingProfile("cv");
        assert!(err.to_string().contains("cv"));
    }
}
