//! Job selection and its resolution against a pipeline

use crate::core::{Job, Pipeline};
use serde::{Deserialize, Serialize};

/// Resolve a selected job ID to the job it names
///
/// Scans stages in order, then jobs within each stage, and returns the first
/// match. Returns `None` when nothing is selected or the ID no longer exists.
pub fn resolve<'a>(pipeline: &'a Pipeline, selected: Option<&str>) -> Option<&'a Job> {
    selected.and_then(|id| pipeline.find_job(id))
}

/// Which job's edit panel is open
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Empty,
    Active(String),
}

impl Selection {
    /// Open the panel for a job
    pub fn select(&mut self, job_id: impl Into<String>) {
        *self = Selection::Active(job_id.into());
    }

    /// Close the panel
    pub fn close(&mut self) {
        *self = Selection::Empty;
    }

    /// Clear the selection if it references the deleted job
    ///
    /// Returns true when the selection was cleared.
    pub fn on_deleted(&mut self, job_id: &str) -> bool {
        if self.is_selected(job_id) {
            self.close();
            true
        } else {
            false
        }
    }

    /// The selected job ID, if any
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Selection::Empty => None,
            Selection::Active(id) => Some(id.as_str()),
        }
    }

    /// Whether this job is the selected one
    pub fn is_selected(&self, job_id: &str) -> bool {
        self.job_id() == Some(job_id)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Resolve against a pipeline
    pub fn resolve<'a>(&self, pipeline: &'a Pipeline) -> Option<&'a Job> {
        resolve(pipeline, self.job_id())
    }
}
