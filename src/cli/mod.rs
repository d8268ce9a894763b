//! Command-line interface

pub mod commands;
pub mod output;
pub mod script;

use clap::{Parser, Subcommand};
use commands::{EditCommand, ShowCommand, ValidateCommand};
use std::ffi::OsString;

/// Terminal editor for CI/CD pipelines
#[derive(Debug, Parser, Clone)]
#[command(name = "pipeline-editor")]
#[command(author = "Pipeline Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Edit CI/CD pipeline stages and jobs in memory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to editor settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a pipeline as stage columns
    Show(ShowCommand),

    /// Validate a pipeline file
    Validate(ValidateCommand),

    /// Run an edit script against a pipeline
    Edit(EditCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
