//! Job domain model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Config key for the repository URL of a source job
pub const REPO_URL: &str = "repoUrl";
/// Config key for the branch of a source job
pub const BRANCH: &str = "branch";
/// Config key for the language label of a source job
pub const LANGUAGE: &str = "language";
/// Config key for the shell commands of a non-source job
pub const COMMANDS: &str = "commands";

/// Category of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobType {
    /// Source checkout
    Source,
    Test,
    Build,
    Deploy,
    Scan,
    /// Free-form shell commands
    Custom,
}

impl JobType {
    /// Upper-case tag used in serialized pipelines
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Source => "SOURCE",
            JobType::Test => "TEST",
            JobType::Build => "BUILD",
            JobType::Deploy => "DEPLOY",
            JobType::Scan => "SCAN",
            JobType::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work within a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier (unique across the whole pipeline)
    pub id: String,

    /// Display label
    pub name: String,

    /// Job category
    #[serde(rename = "type")]
    pub job_type: JobType,

    /// Optional subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Icon name shown on the job card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Free-form key/value configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, String>>,
}

impl Job {
    /// Create a job with no description and no config
    pub fn new(id: impl Into<String>, name: impl Into<String>, job_type: JobType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            job_type,
            description: None,
            icon: None,
            config: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set a config entry, creating the config map if needed
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get a config value; missing keys read as the empty string
    pub fn config_value(&self, key: &str) -> &str {
        self.config
            .as_ref()
            .and_then(|c| c.get(key))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether this is a source checkout job
    pub fn is_source(&self) -> bool {
        self.job_type == JobType::Source
    }
}
