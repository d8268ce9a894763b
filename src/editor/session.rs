//! Editing session: the pipeline store, the selection and their listeners
//!
//! One session is created per editor instance. It is the only owner of the
//! live pipeline; presentation code reads through it and calls its
//! operations in response to user gestures.

use crate::core::config::{EditorConfig, IdStyle};
use crate::core::{Job, Pipeline};
use crate::editor::ids::{IdSource, SequentialIds, UuidIds};
use crate::editor::selection::Selection;
use crate::editor::store::{EditorDefaults, PipelineStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Changes observable by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    StageAdded {
        stage_id: String,
        name: String,
    },
    StageRenamed {
        stage_id: String,
        name: String,
    },
    ParallelToggled {
        stage_id: String,
        is_parallel: bool,
    },
    JobAdded {
        stage_id: String,
        job_id: String,
    },
    JobUpdated {
        job_id: String,
    },
    JobDeleted {
        stage_id: String,
        job_id: String,
    },
    JobSelected {
        job_id: String,
    },
    SelectionCleared,
}

/// Type for event handlers
pub type EventHandler = Box<dyn Fn(&EditEvent)>;

/// Summary of an editing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditSummary {
    pub pipeline_id: String,
    pub pipeline_name: String,
    pub stages: usize,
    pub jobs: usize,
    /// Operations that changed the pipeline
    pub edits: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

/// A single editor instance
pub struct EditorSession {
    store: PipelineStore,
    selection: Selection,
    handlers: Vec<EventHandler>,
    edits: usize,
    started_at: DateTime<Utc>,
}

impl EditorSession {
    /// Start a session with default settings
    pub fn new(pipeline: Pipeline) -> Self {
        Self::from_store(PipelineStore::new(pipeline))
    }

    /// Start a session with an explicit ID source and defaults
    pub fn with_parts(pipeline: Pipeline, ids: Box<dyn IdSource>, defaults: EditorDefaults) -> Self {
        Self::from_store(PipelineStore::with_parts(pipeline, ids, defaults))
    }

    /// Start a session configured from editor settings
    pub fn with_config(pipeline: Pipeline, config: &EditorConfig) -> Self {
        let ids: Box<dyn IdSource> = match config.id_style {
            IdStyle::Uuid => Box::new(UuidIds),
            IdStyle::Sequential => Box::new(SequentialIds::new()),
        };
        Self::with_parts(pipeline, ids, config.defaults.clone())
    }

    fn from_store(store: PipelineStore) -> Self {
        debug!(
            "Opened editing session for {} ({} stages)",
            store.pipeline().name,
            store.pipeline().stages.len()
        );
        Self {
            store,
            selection: Selection::Empty,
            handlers: Vec::new(),
            edits: 0,
            started_at: Utc::now(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&EditEvent) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    fn emit(&self, event: EditEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }

    fn record(&mut self, event: EditEvent) {
        self.edits += 1;
        self.emit(event);
    }

    /// Current pipeline value
    pub fn pipeline(&self) -> &Pipeline {
        self.store.pipeline()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected job, resolved against the current pipeline
    pub fn selected_job(&self) -> Option<&Job> {
        self.selection.resolve(self.store.pipeline())
    }

    /// Number of operations that changed the pipeline
    pub fn edit_count(&self) -> usize {
        self.edits
    }

    /// Append a new stage; returns its ID
    pub fn add_stage(&mut self) -> String {
        let stage_id = self.store.add_stage();
        let name = self
            .store
            .pipeline()
            .stage(&stage_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        debug!("Added stage {} ({})", stage_id, name);
        self.record(EditEvent::StageAdded {
            stage_id: stage_id.clone(),
            name,
        });
        stage_id
    }

    /// Append a placeholder job to a stage; returns its ID
    pub fn add_job(&mut self, stage_id: &str) -> Option<String> {
        match self.store.add_job(stage_id) {
            Some(job_id) => {
                debug!("Added job {} to stage {}", job_id, stage_id);
                self.record(EditEvent::JobAdded {
                    stage_id: stage_id.to_string(),
                    job_id: job_id.clone(),
                });
                Some(job_id)
            }
            None => {
                trace!("add_job: no stage {}", stage_id);
                None
            }
        }
    }

    /// Set a stage's name verbatim
    pub fn rename_stage(&mut self, stage_id: &str, name: &str) -> bool {
        if !self.store.rename_stage(stage_id, name) {
            trace!("rename_stage: no stage {}", stage_id);
            return false;
        }
        debug!("Renamed stage {} to {:?}", stage_id, name);
        self.record(EditEvent::StageRenamed {
            stage_id: stage_id.to_string(),
            name: name.to_string(),
        });
        true
    }

    /// Flip a stage's parallel flag
    pub fn toggle_parallel(&mut self, stage_id: &str) -> bool {
        if !self.store.toggle_parallel(stage_id) {
            trace!("toggle_parallel: no stage {}", stage_id);
            return false;
        }
        let is_parallel = self
            .store
            .pipeline()
            .stage(stage_id)
            .is_some_and(|s| s.is_parallel());
        debug!("Stage {} is now {}", stage_id, if is_parallel { "parallel" } else { "serial" });
        self.record(EditEvent::ParallelToggled {
            stage_id: stage_id.to_string(),
            is_parallel,
        });
        true
    }

    /// Replace a job with an updated value of the same ID
    pub fn update_job(&mut self, job: Job) -> bool {
        let job_id = job.id.clone();
        if !self.store.update_job(job) {
            trace!("update_job: no job {}", job_id);
            return false;
        }
        debug!("Updated job {}", job_id);
        self.record(EditEvent::JobUpdated { job_id });
        true
    }

    /// Apply an edit to the selected job
    ///
    /// Returns false when nothing is selected or the selected job is gone.
    pub fn update_selected<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&Job) -> Job,
    {
        let updated = match self.selected_job() {
            Some(job) => edit(job),
            None => return false,
        };
        self.update_job(updated)
    }

    /// Remove a job; clears the selection if it pointed at that job
    pub fn delete_job(&mut self, job_id: &str) -> bool {
        let stage_id = self
            .store
            .pipeline()
            .locate_job(job_id)
            .map(|(si, _)| self.store.pipeline().stages[si].id.clone());

        let deleted = self.store.delete_job(job_id);
        let cleared = self.selection.on_deleted(job_id);

        if let Some(stage_id) = stage_id.filter(|_| deleted) {
            debug!("Deleted job {} from stage {}", job_id, stage_id);
            self.record(EditEvent::JobDeleted {
                stage_id,
                job_id: job_id.to_string(),
            });
        } else {
            trace!("delete_job: no job {}", job_id);
        }

        if cleared {
            self.emit(EditEvent::SelectionCleared);
        }
        deleted
    }

    /// Delete the selected job and close the panel
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.job_id().map(str::to_string) {
            Some(job_id) => self.delete_job(&job_id),
            None => false,
        }
    }

    /// Open the edit panel for a job; returns the resolved job
    pub fn select(&mut self, job_id: &str) -> Option<&Job> {
        debug!("Selected job {}", job_id);
        self.selection.select(job_id);
        self.emit(EditEvent::JobSelected {
            job_id: job_id.to_string(),
        });
        self.selected_job()
    }

    /// Close the edit panel
    pub fn close(&mut self) {
        if !self.selection.is_empty() {
            debug!("Closed edit panel");
            self.selection.close();
            self.emit(EditEvent::SelectionCleared);
        }
    }

    /// Summarize the session so far
    pub fn summary(&self) -> EditSummary {
        let pipeline = self.store.pipeline();
        EditSummary {
            pipeline_id: pipeline.id.clone(),
            pipeline_name: pipeline.name.clone(),
            stages: pipeline.stages.len(),
            jobs: pipeline.job_count(),
            edits: self.edits,
            started_at: self.started_at,
            elapsed_ms: Utc::now()
                .signed_duration_since(self.started_at)
                .num_milliseconds(),
        }
    }

    /// End the session, returning the final pipeline
    pub fn finish(self) -> Pipeline {
        debug!("Closing editing session after {} edits", self.edits);
        self.store.into_pipeline()
    }
}
