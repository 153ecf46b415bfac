//! # tmplguard core
//!
//! Works out which payload fields a Handlebars template needs and checks a
//! payload for them before anything is rendered.
//!
//! ```no_run
//! use serde_json::json;
//!
//! let template = "{{title}} {{#each rows}}{{id}}{{/each}}";
//! let missing = tmplguard_core::get_missing_variables(&json!({ "rows": [{}] }), template)?;
//! assert_eq!(missing, vec!["title", "rows[0].id"]);
//! # Ok::<(), tmplguard_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod payload;
pub mod requirements;
pub mod syntax;
pub mod validator;

pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use extractor::Extractor;
pub use requirements::{LoopRequirement, Requirement, RequirementSpec};
pub use validator::{MissingReason, MissingVariable};

use serde_json::Value;
use syntax::Program;

/// What a payload is checked against: template source, or a spec derived
/// earlier.
#[derive(Debug, Clone, Copy)]
pub enum SpecSource<'a> {
    Template(&'a str),
    Spec(&'a RequirementSpec),
}

impl<'a> From<&'a str> for SpecSource<'a> {
    fn from(template: &'a str) -> Self {
        SpecSource::Template(template)
    }
}

impl<'a> From<&'a String> for SpecSource<'a> {
    fn from(template: &'a String) -> Self {
        SpecSource::Template(template)
    }
}

impl<'a> From<&'a RequirementSpec> for SpecSource<'a> {
    fn from(spec: &'a RequirementSpec) -> Self {
        SpecSource::Spec(spec)
    }
}

/// Extraction and validation bound to one [`AnalyzerConfig`].
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn extract(&self, program: &Program) -> RequirementSpec {
        Extractor::new(&self.config).extract(program)
    }

    pub fn validate(&self, payload: &Value, spec: &RequirementSpec) -> Vec<MissingVariable> {
        validator::validate(payload, spec)
    }

    pub fn required_variables(&self, template: &str) -> Result<RequirementSpec> {
        let program = syntax::parse(template)?;
        Ok(self.extract(&program))
    }

    pub fn inspect<'a>(
        &self,
        payload: &Value,
        source: impl Into<SpecSource<'a>>,
    ) -> Result<Vec<MissingVariable>> {
        match source.into() {
            SpecSource::Spec(spec) => Ok(self.validate(payload, spec)),
            SpecSource::Template(template) => {
                let spec = self.required_variables(template)?;
                Ok(self.validate(payload, &spec))
            }
        }
    }

    pub fn missing_variables<'a>(
        &self,
        payload: &Value,
        source: impl Into<SpecSource<'a>>,
    ) -> Result<Vec<String>> {
        Ok(self
            .inspect(payload, source)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }
}

/// Requirement spec of `template` under the default config.
pub fn get_required_variables(template: &str) -> Result<RequirementSpec> {
    Analyzer::default().required_variables(template)
}

/// Missing paths of `payload` against a template or a spec, under the default
/// config.
pub fn get_missing_variables<'a>(
    payload: &Value,
    source: impl Into<SpecSource<'a>>,
) -> Result<Vec<String>> {
    Analyzer::default().missing_variables(payload, source)
}
