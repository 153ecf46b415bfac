use thiserror::Error;

/// Failures at the outer surfaces of the analyzer.
///
/// Missing payload fields are never errors; they are reported as data by the
/// validator. These variants only cover inputs that could not be read at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("template parse failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid analyzer config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid requirement spec: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
