//! Data models shared by the reporters and the evaluator
//!
//! The JSON shapes follow the PAN authorship-attribution task: an answers file
//! `{"answers": [...]}` and a ground-truth file `{"ground_truth": [...]}`.

use authorprint_core::{Attribution, DroppedCandidate};
use serde::{Deserialize, Serialize};

/// One line of `answers.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub unknown_text: String,
    /// Predicted author, or `"None"`
    pub author: String,
    pub score: f64,
}

impl From<&Attribution> for Answer {
    fn from(a: &Attribution) -> Self {
        Self {
            unknown_text: a.document.clone(),
            author: a.author_label().to_string(),
            score: a.score,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub answers: Vec<Answer>,
}

impl AnswerSheet {
    pub fn from_attributions(attributions: &[Attribution]) -> Self {
        Self {
            answers: attributions.iter().map(Answer::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    #[serde(rename = "unknown-text")]
    pub unknown_text: String,
    #[serde(rename = "true-author")]
    pub true_author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub ground_truth: Vec<GroundTruthEntry>,
}

/// Everything a reporter needs to describe one attribution run
#[derive(Debug, Clone)]
pub struct AttributionReport {
    pub attributions: Vec<Attribution>,
    /// Surviving candidates, in pool order
    pub candidates: Vec<String>,
    pub dropped: Vec<DroppedCandidate>,
    pub feature_count: usize,
    pub run_seed: u64,
}

impl AttributionReport {
    pub fn answer_sheet(&self) -> AnswerSheet {
        AnswerSheet::from_attributions(&self.attributions)
    }

    pub fn attributed_count(&self) -> usize {
        self.attributions
            .iter()
            .filter(|a| a.author.is_some())
            .count()
    }
}
