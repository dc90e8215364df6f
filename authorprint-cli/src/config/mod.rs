//! Configuration module for authorprint
//!
//! This module handles:
//! - Project-level configuration (authorprint.toml)
//! - Command-line overrides of attribution parameters

mod project_config;

pub use project_config::{
    load_project_config, AttributionOverrides, CONFIG_FILENAME, EXAMPLE_CONFIG,
};
