//! authorprint_core - character n-gram authorship attribution
//!
//! Pipeline, leaf first:
//!
//! 1. [`ngram`] turns text into n-gram frequency vectors and ranks features.
//! 2. [`similarity`] compares projected vectors (minmax or cosine).
//! 3. [`candidates`] prunes authors with too little training text.
//! 4. [`training`] builds the global feature list once per run.
//! 5. [`voting`] attributes each unknown document by randomized voting.
//!
//! ```no_run
//! use authorprint_core::{
//!     AttributionConfig, Attributor, Candidate, CandidatePool, Document, TrainingCorpus,
//! };
//!
//! # fn main() -> Result<(), authorprint_core::AttributionError> {
//! let config = AttributionConfig::default().with_seed(42);
//! let pool = CandidatePool::new(
//!     vec![
//!         Candidate::new("austen", ["..."]),
//!         Candidate::new("bronte", ["..."]),
//!     ],
//!     config.min_train_len,
//! );
//! let corpus = TrainingCorpus::train(&pool, &config)?;
//! let engine = Attributor::new(&pool, &corpus, &config)?;
//! let results = engine.attribute_all(&[Document::new("unknown1", "...")])?;
//! # Ok(())
//! # }
//! ```

pub mod candidates;
pub mod config;
mod errors;
pub mod ngram;
pub mod similarity;
pub mod training;
pub mod voting;

pub use candidates::{Candidate, CandidatePool, DroppedCandidate, Document};
pub use config::AttributionConfig;
pub use errors::{AttributionError, AttributionResult};
pub use ngram::{
    create_vector, select_features, FeatureList, FeatureMap, FeatureSpace, FeatureSubset,
    FeatureVector,
};
pub use similarity::{cosine_similarity, minmax_similarity, text_similarity, Metric};
pub use training::TrainingCorpus;
pub use voting::{Attribution, Attributor, NO_AUTHOR};
