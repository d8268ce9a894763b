//! Pipeline store: owns the current pipeline value and applies edits
//!
//! Every operation is total. An unknown stage or job ID leaves the pipeline
//! untouched and the operation reports that nothing was applied.

use crate::core::{Job, JobType, Pipeline, Stage};
use crate::editor::ids::{IdSource, UuidIds};
use serde::{Deserialize, Serialize};

/// Candidate IDs tried before falling back to suffixed IDs
const MAX_ID_ATTEMPTS: usize = 16;

/// Names and descriptions given to newly created stages and jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// New stages are named `"{prefix} {stage count}"`
    pub stage_name_prefix: String,
    pub job_name: String,
    pub job_description: String,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            stage_name_prefix: "阶段".to_string(),
            job_name: "新任务".to_string(),
            job_description: "Pending configuration".to_string(),
        }
    }
}

/// Holds the live pipeline and produces each new version of it
pub struct PipelineStore {
    pipeline: Pipeline,
    ids: Box<dyn IdSource>,
    defaults: EditorDefaults,
}

impl PipelineStore {
    /// Create a store with random IDs and default names
    pub fn new(pipeline: Pipeline) -> Self {
        Self::with_parts(pipeline, Box::new(UuidIds), EditorDefaults::default())
    }

    /// Create a store with an explicit ID source and defaults
    pub fn with_parts(pipeline: Pipeline, ids: Box<dyn IdSource>, defaults: EditorDefaults) -> Self {
        Self {
            pipeline,
            ids,
            defaults,
        }
    }

    /// Current pipeline value
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Defaults used for new stages and jobs
    pub fn defaults(&self) -> &EditorDefaults {
        &self.defaults
    }

    /// Consume the store, returning the final pipeline
    pub fn into_pipeline(self) -> Pipeline {
        self.pipeline
    }

    /// Append a new empty stage; returns its ID
    pub fn add_stage(&mut self) -> String {
        let id = self.fresh_id("stage");
        let name = format!(
            "{} {}",
            self.defaults.stage_name_prefix,
            self.pipeline.stages.len()
        );
        self.pipeline = self.pipeline.with_stage_appended(Stage::new(id.clone(), name));
        id
    }

    /// Append a placeholder custom job to a stage; returns its ID
    pub fn add_job(&mut self, stage_id: &str) -> Option<String> {
        if !self.pipeline.contains_stage(stage_id) {
            return None;
        }

        let id = self.fresh_id("job");
        let job = Job::new(id.clone(), self.defaults.job_name.clone(), JobType::Custom)
            .with_description(self.defaults.job_description.clone());
        self.pipeline = self.pipeline.with_job_appended(stage_id, job);
        Some(id)
    }

    /// Set a stage's name verbatim
    pub fn rename_stage(&mut self, stage_id: &str, name: &str) -> bool {
        self.apply(self.pipeline.contains_stage(stage_id), |p| {
            p.with_stage_renamed(stage_id, name)
        })
    }

    /// Flip a stage's parallel flag
    pub fn toggle_parallel(&mut self, stage_id: &str) -> bool {
        self.apply(self.pipeline.contains_stage(stage_id), |p| {
            p.with_parallel_toggled(stage_id)
        })
    }

    /// Replace the job with the same ID, keeping its position
    pub fn update_job(&mut self, job: Job) -> bool {
        let found = self.pipeline.contains_job(&job.id);
        self.apply(found, |p| p.with_job_replaced(job))
    }

    /// Remove a job from whichever stage holds it
    pub fn delete_job(&mut self, job_id: &str) -> bool {
        self.apply(self.pipeline.contains_job(job_id), |p| p.without_job(job_id))
    }

    fn apply<F>(&mut self, found: bool, f: F) -> bool
    where
        F: FnOnce(&Pipeline) -> Pipeline,
    {
        if found {
            self.pipeline = f(&self.pipeline);
        }
        found
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let used = self.pipeline.used_ids();

        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id(prefix);
            if !used.contains(candidate.as_str()) {
                return candidate;
            }
        }

        let base = self.ids.next_id(prefix);
        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !used.contains(candidate.as_str()))
            .unwrap_or(base)
    }
}
