//! Attribution parameters
//!
//! Every knob of the voting procedure lives here with the defaults of the
//! reference method. The CLI deserializes this struct straight out of the
//! `[attribution]` table of `authorprint.toml`.

use crate::errors::{AttributionError, AttributionResult};
use crate::similarity::Metric;
use serde::{Deserialize, Serialize};

/// Maximum length of the global feature list
pub const FEATURE_LENGTH: usize = 20_000;

/// Unknown documents shorter than this (in words) are not attributed.
/// Zero disables the check.
pub const MIN_LEN: usize = 0;

/// Candidates with fewer training words than this are dropped
pub const MIN_TRAIN_LEN: usize = 500;

/// Character n-gram size
pub const NGRAM_SIZE: usize = 4;

/// Number of voting trials per unknown document
pub const REPETITIONS: usize = 100;

/// Minimum vote fraction needed to accept the winner (open-set attribution)
pub const THRESHOLD: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttributionConfig {
    pub feature_length: usize,
    pub min_len: usize,
    pub min_train_len: usize,
    pub ngram_size: usize,
    pub repetitions: usize,
    pub threshold: f64,
    /// Similarity used inside the voting loop
    pub metric: Metric,
    /// Run seed. `None` draws one from the thread RNG at engine construction.
    pub seed: Option<u64>,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            feature_length: FEATURE_LENGTH,
            min_len: MIN_LEN,
            min_train_len: MIN_TRAIN_LEN,
            ngram_size: NGRAM_SIZE,
            repetitions: REPETITIONS,
            threshold: THRESHOLD,
            metric: Metric::MinMax,
            seed: None,
        }
    }
}

impl AttributionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameter combinations the voting loop cannot run with.
    pub fn validate(&self) -> AttributionResult<()> {
        if self.ngram_size == 0 {
            return Err(AttributionError::InvalidConfig(
                "ngram_size must be at least 1".into(),
            ));
        }
        if self.repetitions == 0 {
            return Err(AttributionError::InvalidConfig(
                "repetitions must be at least 1".into(),
            ));
        }
        if self.feature_length == 0 {
            return Err(AttributionError::InvalidConfig(
                "feature_length must be at least 1".into(),
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(AttributionError::InvalidConfig(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
