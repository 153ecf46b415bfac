use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the path of a YAML analyzer config.
pub const CONFIG_ENV: &str = "TMPLGUARD_CONFIG";

/// Which block helpers the extractor treats as conditionals or loops.
///
/// ```yaml
/// conditional_helpers: [if, unless, ifNotEmpty]
/// iteration_helpers: [each]
/// self_reference: this
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub conditional_helpers: Vec<String>,
    pub iteration_helpers: Vec<String>,
    /// Token meaning "the current element" inside a loop body.
    pub self_reference: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            conditional_helpers: vec!["if".to_string(), "unless".to_string()],
            iteration_helpers: vec!["each".to_string()],
            self_reference: "this".to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Loads the file named by `TMPLGUARD_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => {
                tracing::debug!(%path, "loading analyzer config");
                Self::from_file(Path::new(&path))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn is_conditional(&self, helper: &str) -> bool {
        self.conditional_helpers.iter().any(|h| h == helper)
    }

    pub fn is_iteration(&self, helper: &str) -> bool {
        self.iteration_helpers.iter().any(|h| h == helper)
    }
}
