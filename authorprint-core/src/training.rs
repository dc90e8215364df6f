//! Global feature list construction

use crate::candidates::CandidatePool;
use crate::config::AttributionConfig;
use crate::errors::{AttributionError, AttributionResult};
use crate::ngram::{create_vector, select_features, FeatureList, FeatureSpace};
use tracing::info;

/// Read-only training state shared by every attribution in a run
#[derive(Debug, Clone)]
pub struct TrainingCorpus {
    features: FeatureList,
    min_words: usize,
}

impl TrainingCorpus {
    /// Build the feature list from the concatenated text of every candidate in
    /// the (already pruned) pool.
    pub fn train(pool: &CandidatePool, config: &AttributionConfig) -> AttributionResult<Self> {
        config.validate()?;

        let min_words = pool
            .min_words()
            .ok_or(AttributionError::EmptyCandidatePool {
                min_train_len: config.min_train_len,
            })?;

        info!("Training on {} candidates...", pool.len());
        let corpus: String = pool
            .candidates()
            .iter()
            .map(|c| c.text())
            .collect();
        let vector = create_vector(&corpus, config.ngram_size);

        info!("Selecting features from {} distinct n-grams...", vector.len());
        let features = select_features(&vector, config.feature_length);
        info!(
            "Feature list: {} features, shortest candidate {} words",
            features.len(),
            min_words
        );

        Ok(Self {
            features,
            min_words,
        })
    }

    pub fn features(&self) -> &FeatureList {
        &self.features
    }

    /// Smallest training word count among surviving candidates
    pub fn min_words(&self) -> usize {
        self.min_words
    }
}
