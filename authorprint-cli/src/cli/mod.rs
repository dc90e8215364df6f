//! CLI command definitions and handlers

mod attribute;
mod evaluate;
mod init;

use crate::config::AttributionOverrides;
use anyhow::Result;
use authorprint_core::Metric;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// authorprint - who wrote this?
#[derive(Parser, Debug)]
#[command(name = "authorprint")]
#[command(
    version,
    about = "Authorship attribution by character n-gram voting",
    long_about = "authorprint compares each unknown document against same-length excerpts \
of every candidate author's known writing, over many random halves of the most frequent \
character 4-grams, and reports the author that wins the most trials together with the \
fraction of trials won.",
    after_help = "\
Examples:
  authorprint attribute -i data -o results            Attribute every unknown text in data/
  authorprint attribute -i data -o results --seed 7   Reproducible run
  authorprint attribute -i data -o out -f text        Print a table as well as answers.json
  authorprint evaluate -g data/ground-truth.json -a results/answers.json
  authorprint init                                    Write an example authorprint.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    /// Path to an authorprint.toml (default: corpus dir, then current dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Attribute every unknown document of a corpus
    #[command(after_help = "\
Corpus layouts:
  <corpus>/meta-file.json       PAN layout: candidate-authors, unknown folder, unknown-texts
  <corpus>/<author>/*, unknown/*   Plain layout: one directory per candidate plus unknown/")]
    Attribute {
        /// Path to the corpus directory
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Directory that receives answers.json
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Console output format: json, text
        #[arg(long, short = 'f', value_parser = ["json", "text"])]
        format: Option<String>,

        #[command(flatten)]
        overrides: AttributionArgs,
    },

    /// Score an answers.json against ground truth
    Evaluate {
        /// Ground truth file ({"ground_truth": [{"unknown-text", "true-author"}]})
        #[arg(long, short = 'g')]
        ground_truth: PathBuf,

        /// Answers file written by `attribute`
        #[arg(long, short = 'a')]
        answers: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an example authorprint.toml
    Init {
        /// Directory to create the config in
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Attribution parameters settable from the command line
#[derive(clap::Args, Debug, Default)]
pub struct AttributionArgs {
    /// Run seed for reproducible results
    #[arg(long, env = "AUTHORPRINT_SEED")]
    seed: Option<u64>,

    /// Voting trials per unknown document
    #[arg(long)]
    repetitions: Option<usize>,

    /// Minimum vote fraction to accept the winner (0 = always accept)
    #[arg(long)]
    threshold: Option<f64>,

    /// Similarity metric: minmax, cosine
    #[arg(long)]
    metric: Option<Metric>,

    /// Character n-gram size
    #[arg(long)]
    ngram_size: Option<usize>,

    /// Maximum number of features kept after ranking
    #[arg(long)]
    feature_length: Option<usize>,

    /// Skip unknown documents with fewer words than this
    #[arg(long)]
    min_len: Option<usize>,

    /// Drop candidates with fewer training words than this
    #[arg(long)]
    min_train_len: Option<usize>,
}

impl From<AttributionArgs> for AttributionOverrides {
    fn from(args: AttributionArgs) -> Self {
        Self {
            seed: args.seed,
            repetitions: args.repetitions,
            threshold: args.threshold,
            metric: args.metric,
            ngram_size: args.ngram_size,
            feature_length: args.feature_length,
            min_len: args.min_len,
            min_train_len: args.min_train_len,
        }
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Attribute {
            input,
            output,
            format,
            overrides,
        } => attribute::run(
            &input,
            &output,
            format.as_deref(),
            cli.config.as_deref(),
            overrides.into(),
            cli.workers,
        ),

        Commands::Evaluate {
            ground_truth,
            answers,
            format,
        } => evaluate::run(&ground_truth, &answers, &format),

        Commands::Init { path } => init::run(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("8"), Ok(8));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_attribute_args_parse() {
        let cli = Cli::try_parse_from([
            "authorprint",
            "attribute",
            "-i",
            "data",
            "-o",
            "out",
            "--seed",
            "9",
            "--metric",
            "cosine",
            "--threshold",
            "0.3",
        ])
        .expect("parse");
        match cli.command {
            Commands::Attribute { overrides, .. } => {
                let overrides: AttributionOverrides = overrides.into();
                assert_eq!(overrides.seed, Some(9));
                assert_eq!(overrides.metric, Some(Metric::Cosine));
                assert_eq!(overrides.threshold, Some(0.3));
                assert_eq!(overrides.repetitions, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let result = Cli::try_parse_from([
            "authorprint", "attribute", "-i", "d", "-o", "o", "--metric", "jaccard",
        ]);
        assert!(result.is_err());
    }
}
