//! Character n-gram vectors and feature selection
//!
//! Text is split on whitespace only. Words of at most `n` characters count as
//! a single n-gram; longer words contribute every `n`-character window.
//! Windows are measured in `char`s, never bytes.

use indexmap::{IndexMap, IndexSet};
use rand::seq::index;
use rand::Rng;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

/// N-gram occurrence counts for a text.
///
/// Keys keep first-occurrence order so that sorting by frequency breaks ties
/// the same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureVector {
    counts: IndexMap<String, u32, FxBuildHasher>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, ngram: &str) -> Option<u32> {
        self.counts.get(ngram).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn add(&mut self, ngram: &str) {
        if let Some(count) = self.counts.get_mut(ngram) {
            *count += 1;
        } else {
            self.counts.insert(ngram.to_owned(), 1);
        }
    }

    fn add_word(&mut self, word: &str, ngram_size: usize) {
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let chars = bounds.len() - 1;

        if chars <= ngram_size {
            self.add(word);
            return;
        }

        for start in 0..=chars - ngram_size {
            self.add(&word[bounds[start]..bounds[start + ngram_size]]);
        }
    }

    /// Restrict this vector to the n-grams of `space`, keeping original counts.
    pub fn project<S: FeatureSpace + ?Sized>(&self, space: &S) -> FeatureMap<'_> {
        self.iter()
            .filter(|(ngram, _)| space.contains(ngram))
            .collect()
    }
}

/// Build the n-gram frequency vector of `text`.
pub fn create_vector(text: &str, ngram_size: usize) -> FeatureVector {
    let mut vector = FeatureVector::default();
    for word in text.split_whitespace() {
        vector.add_word(word, ngram_size);
    }
    vector
}

/// Rank n-grams by descending count and keep the first `feature_length`.
///
/// The sort is stable: equally frequent n-grams stay in first-occurrence order.
pub fn select_features(vector: &FeatureVector, feature_length: usize) -> FeatureList {
    let mut ranked: Vec<(&str, u32)> = vector.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(feature_length.min(ranked.len()));

    FeatureList {
        features: ranked.into_iter().map(|(ngram, _)| ngram.to_owned()).collect(),
    }
}

/// Anything a vector can be projected onto.
pub trait FeatureSpace {
    fn contains(&self, ngram: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The global, frequency-ranked feature list of a training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureList {
    features: IndexSet<String, FxBuildHasher>,
}

impl FeatureList {
    /// Feature at rank `rank` (0 = most frequent).
    pub fn get(&self, rank: usize) -> Option<&str> {
        self.features.get_index(rank).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    /// Sample half of the list (rounded down) uniformly without replacement.
    pub fn random_subset<R: Rng + ?Sized>(&self, rng: &mut R) -> FeatureSubset<'_> {
        let amount = self.features.len() / 2;
        let members = index::sample(rng, self.features.len(), amount)
            .into_iter()
            .filter_map(|i| self.get(i))
            .collect();
        FeatureSubset { members }
    }
}

impl FeatureSpace for FeatureList {
    fn contains(&self, ngram: &str) -> bool {
        self.features.contains(ngram)
    }

    fn len(&self) -> usize {
        self.features.len()
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ephemeral random half of a [`FeatureList`], drawn once per voting trial.
#[derive(Debug, Clone)]
pub struct FeatureSubset<'a> {
    members: FxHashSet<&'a str>,
}

impl FeatureSpace for FeatureSubset<'_> {
    fn contains(&self, ngram: &str) -> bool {
        self.members.contains(ngram)
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

/// A feature vector restricted to some feature space.
///
/// N-grams of the space that do not occur in the text are absent, never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureMap<'a> {
    counts: FxHashMap<&'a str, u32>,
}

impl<'a> FeatureMap<'a> {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, ngram: &str) -> Option<u32> {
        self.counts.get(ngram).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u32)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

impl<'a> FromIterator<(&'a str, u32)> for FeatureMap<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
