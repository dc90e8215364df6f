//! Scoring of an answer sheet against ground truth
//!
//! Each ground-truth document is matched to the answer with the same
//! `unknown_text`. A hit earns its score, a miss costs it:
//!
//! - accuracy = hits / samples × 100
//! - prediction score = Σ score (hits) − Σ score (misses)
//! - rating = (Σ 2·score (hits) + Σ score (misses)) × 10 / (3 · samples), out of 10

use crate::models::{AnswerSheet, GroundTruth};
use anyhow::{bail, Result};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub samples: usize,
    pub hits: usize,
    /// Percentage of correctly attributed documents
    pub accuracy: f64,
    pub prediction_score: f64,
    /// Confidence-weighted rating out of 10
    pub rating: f64,
}

pub fn evaluate(truth: &GroundTruth, answers: &AnswerSheet) -> Result<EvaluationSummary> {
    let samples = truth.ground_truth.len();
    if samples == 0 {
        bail!("Ground truth is empty");
    }
    if answers.answers.len() != samples {
        bail!(
            "Answer count ({}) does not match ground truth ({})",
            answers.answers.len(),
            samples
        );
    }

    let by_document: FxHashMap<&str, _> = answers
        .answers
        .iter()
        .map(|a| (a.unknown_text.as_str(), a))
        .collect();

    let mut hits = 0;
    let mut prediction_score = 0.0;
    let mut weighted = 0.0;
    for entry in &truth.ground_truth {
        let Some(answer) = by_document.get(entry.unknown_text.as_str()) else {
            bail!("No answer for '{}'", entry.unknown_text);
        };
        if answer.author == entry.true_author {
            hits += 1;
            prediction_score += answer.score;
            weighted += 2.0 * answer.score;
        } else {
            prediction_score -= answer.score;
            weighted += answer.score;
        }
    }

    Ok(EvaluationSummary {
        samples,
        hits,
        accuracy: hits as f64 / samples as f64 * 100.0,
        prediction_score,
        rating: weighted * 10.0 / (3.0 * samples as f64),
    })
}

impl EvaluationSummary {
    pub fn render_text(&self) -> String {
        format!(
            "Number of samples:   {}\nPrediction accuracy: {:.2}%\nPrediction score:    {:.2}\nRating:              {:.2}/10\n",
            self.samples, self.accuracy, self.prediction_score, self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, GroundTruthEntry};

    fn truth(pairs: &[(&str, &str)]) -> GroundTruth {
        GroundTruth {
            ground_truth: pairs
                .iter()
                .map(|(doc, author)| GroundTruthEntry {
                    unknown_text: doc.to_string(),
                    true_author: author.to_string(),
                })
                .collect(),
        }
    }

    fn sheet(entries: &[(&str, &str, f64)]) -> AnswerSheet {
        AnswerSheet {
            answers: entries
                .iter()
                .map(|(doc, author, score)| Answer {
                    unknown_text: doc.to_string(),
                    author: author.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }

    #[test]
    fn test_hits_and_misses() {
        let summary = evaluate(
            &truth(&[("u1", "a"), ("u2", "b")]),
            &sheet(&[("u1", "a", 0.9), ("u2", "a", 0.6)]),
        )
        .unwrap();
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.hits, 1);
        assert!((summary.accuracy - 50.0).abs() < 1e-9);
        assert!((summary.prediction_score - 0.3).abs() < 1e-9);
        // (2 * 0.9 + 0.6) * 10 / 6
        assert!((summary.rating - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_answers_matched_by_document_not_position() {
        let summary = evaluate(
            &truth(&[("u1", "a"), ("u2", "b")]),
            &sheet(&[("u2", "b", 1.0), ("u1", "a", 1.0)]),
        )
        .unwrap();
        assert_eq!(summary.hits, 2);
        assert!((summary.accuracy - 100.0).abs() < 1e-9);
        assert!((summary.rating - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unattributed_answer_is_a_miss() {
        let summary = evaluate(&truth(&[("u1", "a")]), &sheet(&[("u1", "None", 0.4)])).unwrap();
        assert_eq!(summary.hits, 0);
        assert!((summary.prediction_score + 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_size_mismatch_is_an_error() {
        let err = evaluate(&truth(&[("u1", "a"), ("u2", "b")]), &sheet(&[("u1", "a", 1.0)]));
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_answer_is_an_error() {
        let err = evaluate(&truth(&[("u1", "a")]), &sheet(&[("u9", "a", 1.0)])).unwrap_err();
        assert!(err.to_string().contains("u1"));
    }

    #[test]
    fn test_empty_ground_truth_is_an_error() {
        assert!(evaluate(&truth(&[]), &sheet(&[])).is_err());
    }

    #[test]
    fn test_render_text() {
        let summary = evaluate(&truth(&[("u1", "a")]), &sheet(&[("u1", "a", 0.75)])).unwrap();
        let text = summary.render_text();
        assert!(text.contains("Prediction accuracy: 100.00%"));
        assert!(text.contains("Prediction score:    0.75"));
        assert!(text.contains("Rating:              5.00/10"));
    }
}
