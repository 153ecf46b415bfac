use crate::cli::SourceArgs;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;
use tmplguard_core::{Analyzer, RequirementSpec};

pub fn run(analyzer: &Analyzer, payload: &Path, source: &SourceArgs, plain: bool) -> Result<ExitCode> {
    let payload: Value = serde_json::from_str(&super::read_file(payload)?)
        .with_context(|| format!("parsing payload {}", payload.display()))?;

    let missing = match (&source.template, &source.spec) {
        (Some(template), _) => {
            let text = super::read_file(template)?;
            analyzer
                .missing_variables(&payload, text.as_str())
                .with_context(|| format!("analyzing {}", template.display()))?
        }
        (None, Some(spec)) => {
            let spec = RequirementSpec::from_json(&super::read_file(spec)?)
                .with_context(|| format!("parsing spec {}", spec.display()))?;
            analyzer.missing_variables(&payload, &spec)?
        }
        (None, None) => bail!("either --template or --spec is required"),
    };

    if plain {
        for path in &missing {
            println!("{}", path);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&missing)?);
    }

    tracing::info!(missing = missing.len(), "payload checked");
    if missing.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
