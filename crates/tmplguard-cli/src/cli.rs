//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tmplguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analyzer config (YAML). Falls back to $TMPLGUARD_CONFIG, then defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the fields a template needs, as a JSON requirement spec
    Required {
        /// Handlebars template file
        template: PathBuf,
    },

    /// Check a JSON payload against a template or a requirement spec
    Missing {
        /// JSON payload file
        payload: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// One missing path per line instead of a JSON array
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Handlebars template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Requirement spec file, as printed by `required`
    #[arg(long)]
    pub spec: Option<PathBuf>,
}
