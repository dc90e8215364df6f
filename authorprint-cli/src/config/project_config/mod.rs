//! Project-level configuration support
//!
//! Loads `authorprint.toml` from an explicit `--config` path, else from the
//! corpus directory, else from the current directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # authorprint.toml
//!
//! [attribution]
//! feature_length = 20000
//! min_len = 0
//! min_train_len = 500
//! ngram_size = 4
//! repetitions = 100
//! threshold = 0.0
//! metric = "minmax"   # or "cosine"
//! seed = 42           # omit for a fresh seed every run
//!
//! [output]
//! format = "json"     # console output: json or text
//! ```

use anyhow::Context;
use authorprint_core::{AttributionConfig, Metric};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// File name looked up in the corpus and current directories
pub const CONFIG_FILENAME: &str = "authorprint.toml";

/// Contents of `authorprint.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub attribution: AttributionConfig,
    pub output: OutputDefaults,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    /// Console output format when `--format` is not given
    pub format: Option<String>,
}

/// Attribution settings given on the command line. `None` keeps the
/// configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributionOverrides {
    pub seed: Option<u64>,
    pub repetitions: Option<usize>,
    pub threshold: Option<f64>,
    pub metric: Option<Metric>,
    pub ngram_size: Option<usize>,
    pub feature_length: Option<usize>,
    pub min_len: Option<usize>,
    pub min_train_len: Option<usize>,
}

impl AttributionOverrides {
    /// Layer the overrides on top of `config`.
    pub fn apply(&self, config: &mut AttributionConfig) {
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(v) = self.repetitions {
            config.repetitions = v;
        }
        if let Some(v) = self.threshold {
            config.threshold = v;
        }
        if let Some(v) = self.metric {
            config.metric = v;
        }
        if let Some(v) = self.ngram_size {
            config.ngram_size = v;
        }
        if let Some(v) = self.feature_length {
            config.feature_length = v;
        }
        if let Some(v) = self.min_len {
            config.min_len = v;
        }
        if let Some(v) = self.min_train_len {
            config.min_train_len = v;
        }
    }
}

/// Load the project config.
///
/// An explicit path must exist and parse. Implicit lookups that fail to parse
/// are logged and skipped.
pub fn load_project_config(
    explicit: Option<&Path>,
    corpus_dir: &Path,
) -> anyhow::Result<ProjectConfig> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        debug!("Loaded project config from {}", path.display());
        return Ok(config);
    }

    for dir in [corpus_dir, Path::new(".")] {
        let toml_path = dir.join(CONFIG_FILENAME);
        if !toml_path.exists() {
            continue;
        }
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return Ok(config);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    Ok(ProjectConfig::default())
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Example config written by `authorprint init`
pub const EXAMPLE_CONFIG: &str = r#"# authorprint configuration

[attribution]
# Maximum number of most-frequent n-grams kept as features
feature_length = 20000

# Unknown documents with fewer words are not attributed (0 = attribute all)
min_len = 0

# Candidates with fewer training words are dropped
min_train_len = 500

# Character n-gram size
ngram_size = 4

# Voting trials per unknown document
repetitions = 100

# Minimum vote fraction to accept the winner (0 = always accept)
threshold = 0.0

# Similarity used in the voting loop: "minmax" or "cosine"
metric = "minmax"

# Fixed seed for reproducible runs
# seed = 42

[output]
# Console output format: "json" or "text"
format = "json"
"#;
