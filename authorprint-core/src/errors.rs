//! Error types for the attribution pipeline

use thiserror::Error;

/// Errors raised while building a candidate pool or attributing documents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributionError {
    #[error("no candidate has at least {min_train_len} training words; nothing to attribute against")]
    EmptyCandidatePool { min_train_len: usize },

    #[error(
        "candidate '{author}' has {available} training words, cannot draw an excerpt of {requested} words"
    )]
    ExcerptOutOfRange {
        author: String,
        available: usize,
        requested: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type AttributionResult<T> = Result<T, AttributionError>;
