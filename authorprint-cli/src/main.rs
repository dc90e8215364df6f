//! authorprint - authorship attribution from the command line
//!
//! Loads candidate authors and unknown documents from a corpus directory,
//! attributes each unknown document by character n-gram voting, and writes
//! the answers in the PAN `answers.json` format.

mod cli;
mod config;
mod corpus;
mod evaluation;
mod models;
mod reporters;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level; logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
