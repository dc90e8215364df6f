//! Randomized feature-subset voting (attribution engine)
//!
//! For each unknown document, `repetitions` independent trials each draw a
//! random half of the global feature list and a random same-length excerpt of
//! every candidate. The candidate most similar to the unknown excerpt wins
//! the trial; the share of trials won by the overall winner is the score.
//!
//! Documents and trials run in parallel with rayon. Every trial seeds its own
//! ChaCha generator from `(run seed, document index, trial index)`, so a fixed
//! run seed reproduces the same votes on any thread count.

use crate::candidates::{CandidatePool, Document};
use crate::config::AttributionConfig;
use crate::errors::{AttributionError, AttributionResult};
use crate::ngram::{create_vector, FeatureVector};
use crate::training::TrainingCorpus;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

/// Outcome for one unknown document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribution {
    pub document: String,
    /// Winning author, or `None` when the score fell below the threshold
    #[serde(serialize_with = "serialize_author")]
    pub author: Option<String>,
    /// Fraction of trials won by the top candidate, in [0, 1]
    pub score: f64,
    /// Votes per candidate in pool order (empty when the document was skipped)
    #[serde(skip)]
    pub votes: Vec<u32>,
}

impl Attribution {
    /// Author label as written in answer files
    pub fn author_label(&self) -> &str {
        self.author.as_deref().unwrap_or(NO_AUTHOR)
    }
}

/// Author label used for unattributed documents
pub const NO_AUTHOR: &str = "None";

fn serialize_author<S: Serializer>(author: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(author.as_deref().unwrap_or(NO_AUTHOR))
}

/// Attributes unknown documents against a trained candidate pool.
pub struct Attributor<'a> {
    pool: &'a CandidatePool,
    corpus: &'a TrainingCorpus,
    config: &'a AttributionConfig,
    run_seed: u64,
}

impl<'a> Attributor<'a> {
    pub fn new(
        pool: &'a CandidatePool,
        corpus: &'a TrainingCorpus,
        config: &'a AttributionConfig,
    ) -> AttributionResult<Self> {
        config.validate()?;
        if pool.is_empty() {
            return Err(AttributionError::EmptyCandidatePool {
                min_train_len: config.min_train_len,
            });
        }
        let run_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!("Attribution run seed: {}", run_seed);
        Ok(Self {
            pool,
            corpus,
            config,
            run_seed,
        })
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    /// Attribute every document in parallel. Results keep input order.
    pub fn attribute_all(&self, documents: &[Document]) -> AttributionResult<Vec<Attribution>> {
        self.attribute_all_with(documents, |_| {})
    }

    /// Like [`Attributor::attribute_all`], calling `on_done` as each document finishes.
    pub fn attribute_all_with<F>(
        &self,
        documents: &[Document],
        on_done: F,
    ) -> AttributionResult<Vec<Attribution>>
    where
        F: Fn(&Attribution) + Sync,
    {
        documents
            .par_iter()
            .enumerate()
            .map(|(index, doc)| -> AttributionResult<Attribution> {
                let attribution = self.attribute(index, doc)?;
                on_done(&attribution);
                Ok(attribution)
            })
            .collect()
    }

    /// Attribute one document. `index` is its position in the run and only
    /// feeds the random seed derivation.
    pub fn attribute(&self, index: usize, doc: &Document) -> AttributionResult<Attribution> {
        let ulen = doc.word_count();
        if ulen < self.config.min_len {
            debug!(
                "Skipping {}: {} words, need {}",
                doc.id, ulen, self.config.min_len
            );
            return Ok(Attribution {
                document: doc.id.clone(),
                author: None,
                score: 0.0,
                votes: Vec::new(),
            });
        }

        let textlen = ulen.min(self.corpus.min_words());
        debug!("Testing {} with excerpt length {}", doc.id, textlen);
        let unknown = create_vector(&doc.excerpt(textlen), self.config.ngram_size);

        let winners = (0..self.config.repetitions)
            .into_par_iter()
            .map(|trial| self.run_trial(index, trial, textlen, &unknown))
            .collect::<AttributionResult<Vec<usize>>>()?;

        let mut votes = vec![0u32; self.pool.len()];
        for winner in winners {
            votes[winner] += 1;
        }

        let (best, best_votes) = first_max(votes.iter().copied()).unwrap_or((0, 0));
        let score = f64::from(best_votes) / self.config.repetitions as f64;

        let author = if score >= self.config.threshold {
            self.pool
                .candidates()
                .get(best)
                .map(|c| c.author().to_string())
        } else {
            None
        };

        info!(
            "{} -> {} (score {:.2})",
            doc.id,
            author.as_deref().unwrap_or(NO_AUTHOR),
            score
        );

        Ok(Attribution {
            document: doc.id.clone(),
            author,
            score,
            votes,
        })
    }

    /// One voting trial. Returns the index of the winning candidate.
    fn run_trial(
        &self,
        doc_index: usize,
        trial: usize,
        textlen: usize,
        unknown: &FeatureVector,
    ) -> AttributionResult<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(trial_seed(self.run_seed, doc_index, trial));
        let subset = self.corpus.features().random_subset(&mut rng);
        let unknown_map = unknown.project(&subset);

        let mut sims = Vec::with_capacity(self.pool.len());
        for candidate in self.pool.candidates() {
            let excerpt = candidate.random_excerpt(textlen, &mut rng)?;
            let vector = create_vector(&excerpt, self.config.ngram_size);
            sims.push(self.config.metric.score(&vector.project(&subset), &unknown_map));
        }

        Ok(first_max(sims).map(|(i, _)| i).unwrap_or(0))
    }
}

/// Index and value of the first maximum; later equal values never win.
fn first_max<T: PartialOrd + Copy>(values: impl IntoIterator<Item = T>) -> Option<(usize, T)> {
    let mut best: Option<(usize, T)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

/// SplitMix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn trial_seed(run_seed: u64, doc_index: usize, trial: usize) -> u64 {
    mix(mix(mix(run_seed) ^ doc_index as u64) ^ trial as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::Candidate;
    use crate::similarity::Metric;

    /// `count` words cycling through `prefix0 .. prefix{vocab-1}`
    fn vocabulary_text(prefix: &str, vocab: usize, count: usize) -> String {
        (0..count)
            .map(|i| format!("{prefix}{}", i % vocab))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn setup(
        candidates: Vec<Candidate>,
        config: &AttributionConfig,
    ) -> (CandidatePool, TrainingCorpus) {
        let pool = CandidatePool::new(candidates, config.min_train_len);
        let corpus = TrainingCorpus::train(&pool, config).expect("train");
        (pool, corpus)
    }

    fn three_authors() -> Vec<Candidate> {
        vec![
            Candidate::new("alpha", [vocabulary_text("alpha", 40, 600)]),
            Candidate::new("bravo", [vocabulary_text("bravo", 40, 600)]),
            Candidate::new("delta", [vocabulary_text("delta", 40, 600)]),
        ]
    }

    #[test]
    fn test_first_max_prefers_earliest() {
        assert_eq!(first_max([0.5, 0.9, 0.9, 0.1]), Some((1, 0.9)));
        assert_eq!(first_max([0.0, 0.0, 0.0]), Some((0, 0.0)));
        assert_eq!(first_max([2u32, 7, 7]), Some((1, 7)));
        assert_eq!(first_max(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_trial_seeds_differ() {
        let a = trial_seed(42, 0, 0);
        assert_ne!(a, trial_seed(42, 0, 1));
        assert_ne!(a, trial_seed(42, 1, 0));
        assert_ne!(a, trial_seed(43, 0, 0));
        assert_eq!(a, trial_seed(42, 0, 0));
    }

    #[test]
    fn test_distinct_vocabularies_pick_matching_author() {
        let config = AttributionConfig::default().with_seed(7);
        let (pool, corpus) = setup(three_authors(), &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();

        let unknown = Document::new("u1", vocabulary_text("bravo", 40, 600));
        let result = engine.attribute(0, &unknown).unwrap();

        assert_eq!(result.author.as_deref(), Some("bravo"));
        assert!(result.score > 0.95, "score was {}", result.score);
        assert_eq!(result.votes.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_unknown_equal_to_candidate_prefix() {
        let config = AttributionConfig::default().with_seed(11);
        let texts = [
            vocabulary_text("kilo", 60, 700),
            vocabulary_text("lima", 60, 650),
            vocabulary_text("mike", 60, 800),
        ];
        let candidates = vec![
            Candidate::new("kilo", [&texts[0]]),
            Candidate::new("lima", [&texts[1]]),
            Candidate::new("mike", [&texts[2]]),
        ];
        let (pool, corpus) = setup(candidates, &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();

        let first_500: Vec<&str> = texts[2].split_whitespace().take(500).collect();
        let unknown = Document::new("u", first_500.join(" "));
        let result = engine.attribute(0, &unknown).unwrap();
        assert_eq!(result.author.as_deref(), Some("mike"));
    }

    #[test]
    fn test_threshold_above_one_rejects_everything() {
        let config = AttributionConfig {
            threshold: 1.5,
            seed: Some(3),
            ..Default::default()
        };
        let (pool, corpus) = setup(three_authors(), &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();

        let docs = vec![
            Document::new("u1", vocabulary_text("alpha", 40, 600)),
            Document::new("u2", vocabulary_text("delta", 40, 300)),
        ];
        let results = engine.attribute_all(&docs).unwrap();
        assert!(results.iter().all(|r| r.author.is_none()));
        assert!(results.iter().all(|r| r.score > 0.0));
        assert_eq!(results[0].author_label(), "None");
    }

    #[test]
    fn test_short_unknown_skipped_below_min_len() {
        let config = AttributionConfig {
            min_len: 50,
            seed: Some(1),
            ..Default::default()
        };
        let (pool, corpus) = setup(three_authors(), &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();

        let result = engine
            .attribute(0, &Document::new("tiny", "alpha1 alpha2"))
            .unwrap();
        assert_eq!(result.author, None);
        assert_eq!(result.score, 0.0);
        assert!(result.votes.is_empty());
    }

    #[test]
    fn test_fixed_seed_reproduces_results() {
        let config = AttributionConfig {
            repetitions: 30,
            seed: Some(1234),
            ..Default::default()
        };
        let (pool, corpus) = setup(three_authors(), &config);
        let docs = vec![
            // mixed text gives a split vote, so ordering effects would show
            Document::new(
                "mixed",
                format!(
                    "{} {}",
                    vocabulary_text("alpha", 40, 200),
                    vocabulary_text("bravo", 40, 200)
                ),
            ),
            Document::new("plain", vocabulary_text("delta", 40, 600)),
        ];

        let first = Attributor::new(&pool, &corpus, &config)
            .unwrap()
            .attribute_all(&docs)
            .unwrap();
        let second = Attributor::new(&pool, &corpus, &config)
            .unwrap()
            .attribute_all(&docs)
            .unwrap();
        assert_eq!(first, second);

        let single_threaded = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| {
                Attributor::new(&pool, &corpus, &config)
                    .unwrap()
                    .attribute_all(&docs)
                    .unwrap()
            });
        assert_eq!(first, single_threaded);
    }

    #[test]
    fn test_results_keep_input_order() {
        let config = AttributionConfig {
            repetitions: 10,
            seed: Some(5),
            ..Default::default()
        };
        let (pool, corpus) = setup(three_authors(), &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();
        let docs: Vec<Document> = ["delta", "alpha", "bravo", "alpha"]
            .iter()
            .enumerate()
            .map(|(i, p)| Document::new(format!("u{i}"), vocabulary_text(p, 40, 600)))
            .collect();

        let results = engine.attribute_all(&docs).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(ids, vec!["u0", "u1", "u2", "u3"]);
        let authors: Vec<&str> = results.iter().map(|r| r.author_label()).collect();
        assert_eq!(authors, vec!["delta", "alpha", "bravo", "alpha"]);
    }

    #[test]
    fn test_cosine_metric_also_attributes() {
        let config = AttributionConfig {
            metric: Metric::Cosine,
            repetitions: 20,
            seed: Some(8),
            ..Default::default()
        };
        let (pool, corpus) = setup(three_authors(), &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();
        let result = engine
            .attribute(0, &Document::new("u", vocabulary_text("delta", 40, 600)))
            .unwrap();
        assert_eq!(result.author.as_deref(), Some("delta"));
    }

    #[test]
    fn test_empty_unknown_goes_to_first_candidate() {
        let config = AttributionConfig {
            repetitions: 10,
            seed: Some(4),
            ..Default::default()
        };
        let (pool, corpus) = setup(three_authors(), &config);
        let engine = Attributor::new(&pool, &corpus, &config).unwrap();

        // every trial compares empty excerpts, so all similarities tie at zero
        let result = engine.attribute(0, &Document::new("blank", "  \n ")).unwrap();
        assert_eq!(result.author.as_deref(), Some("alpha"));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.votes, vec![10, 0, 0]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AttributionConfig::default();
        let (pool, corpus) = setup(three_authors(), &config);
        let bad = AttributionConfig {
            repetitions: 0,
            ..Default::default()
        };
        assert!(matches!(
            Attributor::new(&pool, &corpus, &bad),
            Err(AttributionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_attribution_serializes_none_author() {
        let attribution = Attribution {
            document: "u1".into(),
            author: None,
            score: 0.25,
            votes: vec![1, 3],
        };
        let json = serde_json::to_value(&attribution).unwrap();
        assert_eq!(json["author"], "None");
        assert_eq!(json["score"], 0.25);
        assert!(json.get("votes").is_none());
    }
}
