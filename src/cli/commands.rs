//! CLI command definitions

use crate::core::config::IdStyle;
use clap::Args;

/// Render a pipeline
#[derive(Debug, Args, Clone)]
pub struct ShowCommand {
    /// Path to pipeline YAML file (built-in sample when omitted)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Validate a pipeline file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Apply an edit script to a pipeline
#[derive(Debug, Args, Clone)]
pub struct EditCommand {
    /// Path to pipeline YAML file (built-in sample when omitted)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Edit script to run (reads stdin when omitted)
    #[arg(long)]
    pub script: Option<String>,

    /// ID style for new stages and jobs (overrides the editor config)
    #[arg(long, value_enum)]
    pub ids: Option<IdStyleArg>,

    /// Format of the final pipeline
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Don't print edit events as they happen
    #[arg(long)]
    pub quiet: bool,
}

/// Output format argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// ID style argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IdStyleArg {
    Uuid,
    Sequential,
}

impl From<IdStyleArg> for IdStyle {
    fn from(arg: IdStyleArg) -> Self {
        match arg {
            IdStyleArg::Uuid => IdStyle::Uuid,
            IdStyleArg::Sequential => IdStyle::Sequential,
        }
    }
}
