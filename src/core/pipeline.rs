//! Pipeline domain model
//!
//! A [`Pipeline`] is an immutable value. Every transformation returns a new
//! pipeline that shares all untouched stages with the original; only the
//! stage being changed is copied (`Arc::make_mut`). Transformations given an
//! unknown stage or job id return an unchanged copy.

use crate::core::{job::Job, stage::Stage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A pipeline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Pipeline identifier
    pub id: String,

    /// Pipeline name
    pub name: String,

    /// Stages in display order
    #[serde(default)]
    pub stages: Vec<Arc<Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Build a pipeline from owned stages
    pub fn with_stages(
        id: impl Into<String>,
        name: impl Into<String>,
        stages: impl IntoIterator<Item = Stage>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stages: stages.into_iter().map(Arc::new).collect(),
        }
    }

    /// Get a stage by ID
    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id).map(Arc::as_ref)
    }

    /// Find a job by ID, scanning stages then jobs in order
    pub fn find_job(&self, id: &str) -> Option<&Job> {
        self.stages.iter().find_map(|s| s.job(id))
    }

    /// Locate a job as (stage index, job index)
    pub fn locate_job(&self, id: &str) -> Option<(usize, usize)> {
        self.stages
            .iter()
            .enumerate()
            .find_map(|(si, s)| s.job_position(id).map(|ji| (si, ji)))
    }

    /// Whether a stage with this ID exists
    pub fn contains_stage(&self, id: &str) -> bool {
        self.stage(id).is_some()
    }

    /// Whether a job with this ID exists anywhere in the pipeline
    pub fn contains_job(&self, id: &str) -> bool {
        self.find_job(id).is_some()
    }

    /// Iterate over all jobs in display order
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.stages.iter().flat_map(|s| s.jobs.iter())
    }

    /// Total number of jobs
    pub fn job_count(&self) -> usize {
        self.stages.iter().map(|s| s.jobs.len()).sum()
    }

    /// All stage and job IDs currently in use
    pub fn used_ids(&self) -> HashSet<&str> {
        self.stages
            .iter()
            .map(|s| s.id.as_str())
            .chain(self.jobs().map(|j| j.id.as_str()))
            .collect()
    }

    /// Append a stage at the end
    pub fn with_stage_appended(&self, stage: Stage) -> Pipeline {
        let mut next = self.clone();
        next.stages.push(Arc::new(stage));
        next
    }

    /// Append a job to the end of a stage's job list
    pub fn with_job_appended(&self, stage_id: &str, job: Job) -> Pipeline {
        self.map_stage(stage_id, |stage| stage.jobs.push(job))
    }

    /// Set a stage's name verbatim
    pub fn with_stage_renamed(&self, stage_id: &str, name: &str) -> Pipeline {
        self.map_stage(stage_id, |stage| stage.name = name.to_string())
    }

    /// Flip a stage's parallel flag (absent counts as serial)
    pub fn with_parallel_toggled(&self, stage_id: &str) -> Pipeline {
        self.map_stage(stage_id, |stage| {
            stage.is_parallel = Some(!stage.is_parallel());
        })
    }

    /// Replace the job carrying `job.id` in place, wherever it lives
    pub fn with_job_replaced(&self, job: Job) -> Pipeline {
        match self.locate_job(&job.id) {
            Some((si, ji)) => self.map_stage_at(si, |stage| stage.jobs[ji] = job),
            None => self.clone(),
        }
    }

    /// Remove a job, keeping the relative order of the rest
    pub fn without_job(&self, job_id: &str) -> Pipeline {
        match self.locate_job(job_id) {
            Some((si, ji)) => self.map_stage_at(si, |stage| {
                stage.jobs.remove(ji);
            }),
            None => self.clone(),
        }
    }

    fn map_stage<F>(&self, stage_id: &str, f: F) -> Pipeline
    where
        F: FnOnce(&mut Stage),
    {
        match self.stages.iter().position(|s| s.id == stage_id) {
            Some(index) => self.map_stage_at(index, f),
            None => self.clone(),
        }
    }

    fn map_stage_at<F>(&self, index: usize, f: F) -> Pipeline
    where
        F: FnOnce(&mut Stage),
    {
        let mut next = self.clone();
        f(Arc::make_mut(&mut next.stages[index]));
        next
    }
}
