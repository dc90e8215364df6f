//! Text (terminal) reporter

use crate::models::AttributionReport;
use anyhow::Result;
use console::style;
use std::fmt::Write;

/// Render report as a terminal table
pub fn render(report: &AttributionReport) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "\n{}", style("authorprint attribution").bold())?;
    writeln!(out, "{}", style("──────────────────────────────────────").dim())?;
    writeln!(
        out,
        "Candidates: {}  Features: {}  Seed: {}",
        report.candidates.len(),
        report.feature_count,
        report.run_seed
    )?;
    for dropped in &report.dropped {
        writeln!(
            out,
            "{} dropped {} ({} training words)",
            style("!").yellow(),
            dropped.author,
            dropped.word_count
        )?;
    }
    writeln!(out)?;

    let doc_width = report
        .attributions
        .iter()
        .map(|a| a.document.chars().count())
        .max()
        .unwrap_or(0)
        .max("DOCUMENT".len());
    let author_width = report
        .attributions
        .iter()
        .map(|a| a.author_label().chars().count())
        .max()
        .unwrap_or(0)
        .max("AUTHOR".len());

    writeln!(
        out,
        "{}",
        style(format!(
            "{:<doc_width$}  {:<author_width$}  {:>5}",
            "DOCUMENT", "AUTHOR", "SCORE"
        ))
        .bold()
    )?;
    for a in &report.attributions {
        let author = format!("{:<author_width$}", a.author_label());
        let author = if a.author.is_some() {
            style(author).green()
        } else {
            style(author).dim()
        };
        writeln!(
            out,
            "{:<doc_width$}  {}  {:>5.2}",
            a.document, author, a.score
        )?;
    }

    writeln!(
        out,
        "\n{} of {} documents attributed",
        report.attributed_count(),
        report.attributions.len()
    )?;

    Ok(out)
}
