pub mod missing;
pub mod required;

use anyhow::{Context, Result};
use std::path::Path;
use tmplguard_core::{Analyzer, AnalyzerConfig};

/// `--config` wins over `$TMPLGUARD_CONFIG`.
pub fn load_analyzer(config: Option<&Path>) -> Result<Analyzer> {
    let config = match config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::from_env().context("loading config from environment")?,
    };
    Ok(Analyzer::new(config))
}

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
