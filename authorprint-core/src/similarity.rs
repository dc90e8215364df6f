//! Similarity between sparse n-gram feature maps
//!
//! Both metrics accumulate in integers and only convert at the final
//! division, so the result is independent of hash-map iteration order.

use crate::ngram::{create_vector, FeatureMap, FeatureSpace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity metric used to compare a candidate excerpt with an unknown text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cosine,
    #[default]
    MinMax,
}

impl Metric {
    pub fn score(&self, x: &FeatureMap<'_>, y: &FeatureMap<'_>) -> f64 {
        match self {
            Metric::Cosine => cosine_similarity(x, y),
            Metric::MinMax => minmax_similarity(x, y),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" | "cos" => Ok(Metric::Cosine),
            "minmax" | "min-max" => Ok(Metric::MinMax),
            _ => Err(format!("Unknown metric '{}'. Valid metrics: minmax, cosine", s)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Cosine => write!(f, "cosine"),
            Metric::MinMax => write!(f, "minmax"),
        }
    }
}

fn squared_norm(v: &FeatureMap<'_>) -> u64 {
    v.iter().map(|(_, c)| u64::from(c) * u64::from(c)).sum()
}

/// `dot(X, Y) / (|X| * |Y|)`. Zero when either map has zero norm.
pub fn cosine_similarity(x: &FeatureMap<'_>, y: &FeatureMap<'_>) -> f64 {
    let norm_x = squared_norm(x);
    let norm_y = squared_norm(y);

    if norm_x == 0 || norm_y == 0 {
        return 0.0;
    }

    let dot: u64 = x
        .iter()
        .filter_map(|(ngram, cx)| y.get(ngram).map(|cy| u64::from(cx) * u64::from(cy)))
        .sum();

    dot as f64 / ((norm_x as f64).sqrt() * (norm_y as f64).sqrt())
}

/// `sum(min(Xi, Yi)) / sum(max(Xi, Yi))` over the union of keys.
/// Zero when both maps are empty.
pub fn minmax_similarity(x: &FeatureMap<'_>, y: &FeatureMap<'_>) -> f64 {
    let mut minsum: u64 = 0;
    let mut maxsum: u64 = 0;

    for (ngram, cx) in x.iter() {
        match y.get(ngram) {
            Some(cy) => {
                minsum += u64::from(cx.min(cy));
                maxsum += u64::from(cx.max(cy));
            }
            None => maxsum += u64::from(cx),
        }
    }

    for (ngram, cy) in y.iter() {
        if x.get(ngram).is_none() {
            maxsum += u64::from(cy);
        }
    }

    if maxsum == 0 {
        return 0.0;
    }

    minsum as f64 / maxsum as f64
}

/// Vectorize two texts, project both onto `space`, and compare them.
pub fn text_similarity<S: FeatureSpace + ?Sized>(
    text_x: &str,
    text_y: &str,
    space: &S,
    ngram_size: usize,
    metric: Metric,
) -> f64 {
    let vec_x = create_vector(text_x, ngram_size);
    let vec_y = create_vector(text_y, ngram_size);
    metric.score(&vec_x.project(space), &vec_y.project(space))
}
