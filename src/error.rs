//! Error types for skemi.
//!
//! Only environmental failures surface as errors. Malformed corpus entries,
//! degenerate vectors and empty inputs degrade to warnings or "no match".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkemiError {
    /// The corpus document could not be fetched, read or parsed as a whole.
    #[error("match service unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SkemiError {
    /// Stable machine-readable code used in robot-mode output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CorpusUnavailable(_) => "corpus_unavailable",
            Self::InvalidCorpus(_) => "invalid_corpus",
            Self::Dataset(_) => "invalid_dataset",
            Self::Config(_) => "config_error",
            Self::MissingConfig(_) => "missing_config",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, SkemiError>;
