//! Stage domain model

use crate::core::job::Job;
use serde::{Deserialize, Serialize};

/// An ordered phase of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Unique stage identifier
    pub id: String,

    /// Display label
    pub name: String,

    /// Jobs in display order
    #[serde(default)]
    pub jobs: Vec<Job>,

    /// Descriptive serial/parallel flag (absent means serial)
    #[serde(
        rename = "isParallel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_parallel: Option<bool>,
}

impl Stage {
    /// Create an empty serial stage
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            jobs: Vec::new(),
            is_parallel: None,
        }
    }

    /// Mark the stage as parallel
    pub fn parallel(mut self) -> Self {
        self.is_parallel = Some(true);
        self
    }

    /// Append a job
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Whether the stage is flagged parallel
    pub fn is_parallel(&self) -> bool {
        self.is_parallel.unwrap_or(false)
    }

    /// Get a job by ID
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Position of a job within this stage
    pub fn job_position(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|j| j.id == id)
    }
}
