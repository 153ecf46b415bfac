use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;
use tmplguard_core::Analyzer;

pub fn run(analyzer: &Analyzer, template: &Path) -> Result<ExitCode> {
    let source = super::read_file(template)?;
    let spec = analyzer
        .required_variables(&source)
        .with_context(|| format!("analyzing {}", template.display()))?;

    println!("{}", spec.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
