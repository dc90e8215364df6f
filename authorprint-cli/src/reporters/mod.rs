//! Output reporters for attribution results
//!
//! Supports two console formats:
//! - `json` - the PAN answer sheet, as written to `answers.json`
//! - `text` - a terminal table with run details
//!
//! Regardless of format, [`write_answers`] persists `answers.json`.

mod json;
mod text;

use crate::models::AttributionReport;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name of the persisted answer sheet
pub const ANSWERS_FILENAME: &str = "answers.json";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the specified format
pub fn report(report: &AttributionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Write `answers.json` into `output_dir`, creating the directory if needed.
pub fn write_answers(output_dir: &Path, report: &AttributionReport) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(ANSWERS_FILENAME);
    let mut content = json::render(report)?;
    content.push('\n');
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
