//! Evaluate command - score an answers file against ground truth

use crate::evaluation;
use crate::models::{AnswerSheet, GroundTruth};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Run the evaluate command
pub fn run(ground_truth: &Path, answers: &Path, format: &str) -> Result<()> {
    let truth: GroundTruth = read_json(ground_truth)?;
    let sheet: AnswerSheet = read_json(answers)?;

    let summary = evaluation::evaluate(&truth, &sheet)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print!("{}", summary.render_text()),
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
