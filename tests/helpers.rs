//! Test utility functions for pipeline-editor

#![allow(dead_code)]

use pipeline_editor::core::seed::sample_pipeline;
use pipeline_editor::core::{Job, Pipeline};
use pipeline_editor::editor::{EditEvent, EditorDefaults, EditorSession, SequentialIds};
use std::cell::RefCell;
use std::rc::Rc;

/// Session over the sample pipeline with deterministic IDs
pub fn sample_session() -> EditorSession {
    session_for(sample_pipeline())
}

/// Session over any pipeline with deterministic IDs
pub fn session_for(pipeline: Pipeline) -> EditorSession {
    EditorSession::with_parts(
        pipeline,
        Box::new(SequentialIds::new()),
        EditorDefaults::default(),
    )
}

/// Attach a handler that records every event
pub fn record_events(session: &mut EditorSession) -> Rc<RefCell<Vec<EditEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    session.add_event_handler(move |event| sink.borrow_mut().push(event.clone()));
    events
}

/// Job IDs of a stage, in order
pub fn job_ids(pipeline: &Pipeline, stage_id: &str) -> Vec<String> {
    pipeline
        .stage(stage_id)
        .map(|s| s.jobs.iter().map(|j| j.id.clone()).collect())
        .unwrap_or_default()
}

/// Job counts per stage, in stage order
pub fn job_counts(pipeline: &Pipeline) -> Vec<usize> {
    pipeline.stages.iter().map(|s| s.jobs.len()).collect()
}

/// Every job in the pipeline, in display order
pub fn all_jobs(pipeline: &Pipeline) -> Vec<Job> {
    pipeline.jobs().cloned().collect()
}

/// Assert that IDs are unique across stages and across all jobs
pub fn assert_unique_ids(pipeline: &Pipeline) {
    let mut stage_ids = std::collections::HashSet::new();
    for stage in &pipeline.stages {
        assert!(stage_ids.insert(stage.id.clone()), "duplicate stage ID {}", stage.id);
    }

    let mut job_ids = std::collections::HashSet::new();
    for job in pipeline.jobs() {
        assert!(job_ids.insert(job.id.clone()), "duplicate job ID {}", job.id);
    }
}
