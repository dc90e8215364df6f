//! Attribute command - attribute every unknown document of a corpus

use crate::config::{load_project_config, AttributionOverrides};
use crate::corpus;
use crate::models::AttributionReport;
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use authorprint_core::{Attributor, CandidatePool, FeatureSpace, TrainingCorpus};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};

/// Run the attribute command
pub fn run(
    input: &Path,
    output: &Path,
    format: Option<&str>,
    config_path: Option<&Path>,
    overrides: AttributionOverrides,
    workers: usize,
) -> Result<()> {
    let start = Instant::now();

    let project_config = load_project_config(config_path, input)?;
    let mut config = project_config.attribution;
    overrides.apply(&mut config);
    config.validate().context("Invalid attribution settings")?;

    let format = format
        .or(project_config.output.format.as_deref())
        .unwrap_or("json");
    let format = OutputFormat::from_str(format)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Failed to build worker pool")?;

    let source = corpus::open(input)
        .with_context(|| format!("Failed to open corpus at {}", input.display()))?;
    let (candidates, unknowns) = pool.install(|| -> Result<_> {
        Ok((
            corpus::load_candidates(source.as_ref())?,
            corpus::load_unknowns(source.as_ref())?,
        ))
    })?;
    if unknowns.is_empty() {
        warn!("No unknown documents found in {}", input.display());
    }

    let candidate_pool = CandidatePool::new(candidates, config.min_train_len);
    let training = TrainingCorpus::train(&candidate_pool, &config)?;
    let attributor = Attributor::new(&candidate_pool, &training, &config)?;

    let bar = ProgressBar::new(unknowns.len() as u64);
    bar.set_style(create_bar_style()?);
    bar.set_message("attributing");

    let attributions = pool.install(|| {
        attributor.attribute_all_with(&unknowns, |attribution| {
            bar.set_message(attribution.document.clone());
            bar.inc(1);
        })
    })?;
    bar.finish_and_clear();

    let report = AttributionReport {
        attributions,
        candidates: candidate_pool
            .candidates()
            .iter()
            .map(|c| c.author().to_string())
            .collect(),
        dropped: candidate_pool.dropped().to_vec(),
        feature_count: training.features().len(),
        run_seed: attributor.run_seed(),
    };

    let answers_path = reporters::write_answers(output, &report)?;
    info!(
        "Attributed {}/{} documents in {:.2}s, answers written to {}",
        report.attributed_count(),
        report.attributions.len(),
        start.elapsed().as_secs_f64(),
        answers_path.display()
    );

    println!("{}", reporters::report(&report, format)?);
    Ok(())
}

/// Create bar progress style
fn create_bar_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("█▓▒░  "))
}
