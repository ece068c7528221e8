//! CLI command handlers for `pulsedash`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod detail;
pub mod render;

use pulse_dashboard::config::Config;
use pulse_dashboard::core::loader::{load_dataset, DataSource};
use pulse_dashboard::core::models::Dataset;
use pulse_dashboard::error;
use std::time::Duration;

/// Load the dataset named on the command line, or the configured one
fn load_source(source: Option<&str>, config: &Config) -> Result<(DataSource, Dataset), String> {
    let location = source.unwrap_or(&config.source.dataset);
    if location.trim().is_empty() {
        return Err("✗ No dataset given and config `dataset` is empty".to_string());
    }
    let source = DataSource::parse(location);
    let timeout = Duration::from_secs(config.source.timeout_secs);
    match load_dataset(&source, timeout) {
        Ok(dataset) => Ok((source, dataset)),
        Err(e) => {
            error!("Failed to load dataset {source}: {e}");
            Err(format!("✗ Failed to load {source}: {e}"))
        }
    }
}
