//! Scenario tests: editing the sample pipeline through a session

mod helpers;

use helpers::*;
use pipeline_editor::core::seed::sample_pipeline;
use pipeline_editor::core::{Job, JobType};
use pipeline_editor::editor::{resolve, EditEvent, EditorSession};

/// Adding a stage to the sample pipeline appends a numbered, empty stage
#[test]
fn test_add_stage_to_sample() {
    let mut session = sample_session();
    let stage_id = session.add_stage();

    let pipeline = session.pipeline();
    assert_eq!(pipeline.stages.len(), 7);

    let last = pipeline.stages.last().unwrap();
    assert_eq!(last.id, stage_id);
    assert_eq!(last.name, "阶段 6");
    assert!(last.jobs.is_empty());
    assert!(!last.is_parallel());
    assert_unique_ids(pipeline);
}

/// Adding a job to the build stage grows it from one to two jobs
#[test]
fn test_add_job_to_build_stage() {
    let mut session = sample_session();
    let before = job_counts(session.pipeline());

    let job_id = session.add_job("stage-build").unwrap();

    let after = job_counts(session.pipeline());
    assert_eq!(before[2], 1);
    assert_eq!(after[2], 2);
    for i in [0, 1, 3, 4, 5] {
        assert_eq!(before[i], after[i]);
    }

    let job = session.pipeline().find_job(&job_id).unwrap();
    assert_eq!(job.job_type, JobType::Custom);
    assert_eq!(job.name, "新任务");
    assert_eq!(
        job_ids(session.pipeline(), "stage-build"),
        vec!["job-maven-build".to_string(), job_id.clone()]
    );
    assert_unique_ids(session.pipeline());
}

/// Deleting the selected job clears the selection and empties its stage
#[test]
fn test_select_then_delete() {
    let mut session = sample_session();
    session.select("job-maven-build");
    assert_eq!(session.selected_job().unwrap().name, "Maven 构建");

    assert!(session.delete_job("job-maven-build"));

    assert_eq!(session.selected_job(), None);
    assert!(session.selection().is_empty());
    assert!(session.pipeline().stage("stage-build").unwrap().jobs.is_empty());
    assert_eq!(resolve(session.pipeline(), Some("job-maven-build")), None);
}

/// Renaming a stage touches nothing else
#[test]
fn test_rename_stage_leaves_jobs_untouched() {
    let mut session = sample_session();
    let before = session.pipeline().clone();

    assert!(session.rename_stage("stage-test", "测试阶段"));

    let after = session.pipeline();
    assert_eq!(after.stage("stage-test").unwrap().name, "测试阶段");
    assert_eq!(all_jobs(after), all_jobs(&before));
    for (old, new) in before.stages.iter().zip(&after.stages) {
        if old.id != "stage-test" {
            assert_eq!(old, new);
        }
    }
}

/// Unknown stage IDs leave the pipeline unchanged
#[test]
fn test_unknown_stage_no_ops() {
    let mut session = sample_session();
    let before = session.pipeline().clone();

    assert!(!session.rename_stage("stage-nope", "x"));
    assert!(!session.toggle_parallel("stage-nope"));
    assert_eq!(session.add_job("stage-nope"), None);

    assert_eq!(session.pipeline(), &before);
    assert_eq!(session.edit_count(), 0);
}

/// Repeated stage additions each grow the pipeline by one with fresh IDs
#[test]
fn test_repeated_add_stage() {
    let mut session = sample_session();
    let mut ids = Vec::new();

    for n in 1..=4 {
        ids.push(session.add_stage());
        assert_eq!(session.pipeline().stages.len(), 6 + n);
    }

    let names: Vec<_> = session.pipeline().stages[6..].iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["阶段 6", "阶段 7", "阶段 8", "阶段 9"]);
    assert_unique_ids(session.pipeline());
}

/// Update followed by resolve returns the same job
#[test]
fn test_update_then_resolve_round_trip() {
    let mut session = sample_session();

    let updated = Job::new("job-source-1", "", JobType::Source)
        .with_description("develop")
        .with_config("branch", "develop")
        .with_config("language", "Java");

    assert!(session.update_job(updated.clone()));
    assert_eq!(resolve(session.pipeline(), Some("job-source-1")), Some(&updated));
    assert_eq!(
        job_ids(session.pipeline(), "stage-source"),
        vec!["job-source-1".to_string(), "job-source-2".to_string()]
    );
}

/// Updating a job that does not exist changes nothing
#[test]
fn test_update_unknown_job() {
    let mut session = sample_session();
    let before = session.pipeline().clone();

    assert!(!session.update_job(Job::new("job-ghost", "ghost", JobType::Custom)));
    assert_eq!(session.pipeline(), &before);
    assert_eq!(resolve(session.pipeline(), Some("job-ghost")), None);
}

/// Deleting from the middle keeps the rest in order
#[test]
fn test_delete_preserves_order() {
    let mut session = sample_session();
    let total = session.pipeline().job_count();

    assert!(session.delete_job("job-golang-test"));
    assert!(!session.delete_job("job-golang-test"));

    assert_eq!(session.pipeline().job_count(), total - 1);
    assert_eq!(
        job_ids(session.pipeline(), "stage-test"),
        vec!["job-maven-test".to_string(), "job-jacoco".to_string()]
    );
}

/// The selection survives edits that keep its job and shows the new fields
#[test]
fn test_selection_follows_updates() {
    let mut session = sample_session();
    session.select("job-sbom");

    session.add_stage();
    session.toggle_parallel("stage-custom-1");
    session.rename_stage("stage-custom-1", "扫描");
    assert!(session.update_selected(|job| {
        let mut job = job.clone();
        job.name = "SBOM 检查".to_string();
        job
    }));

    assert_eq!(session.selection().job_id(), Some("job-sbom"));
    assert_eq!(session.selected_job().unwrap().name, "SBOM 检查");
}

/// Earlier pipeline values are never changed by later edits
#[test]
fn test_previous_versions_are_unchanged() {
    let mut session = sample_session();
    let snapshot = session.pipeline().clone();

    session.add_job("stage-deploy");
    session.delete_job("job-source-1");
    session.toggle_parallel("stage-source");

    assert_eq!(snapshot, sample_pipeline());
    assert_ne!(session.pipeline(), &snapshot);
}

/// Events arrive in order for a compound user action
#[test]
fn test_event_stream() {
    let mut session = sample_session();
    let events = record_events(&mut session);

    let job_id = session.add_job("stage-upload").unwrap();
    session.select(&job_id);
    session.delete_selected();

    assert_eq!(
        *events.borrow(),
        vec![
            EditEvent::JobAdded {
                stage_id: "stage-upload".to_string(),
                job_id: job_id.clone(),
            },
            EditEvent::JobSelected {
                job_id: job_id.clone(),
            },
            EditEvent::JobDeleted {
                stage_id: "stage-upload".to_string(),
                job_id,
            },
            EditEvent::SelectionCleared,
        ]
    );
}

/// A session built with default settings still yields unique random IDs
#[test]
fn test_default_session_ids() {
    let mut session = EditorSession::new(sample_pipeline());
    for _ in 0..10 {
        session.add_stage();
        session.add_job("stage-build");
    }
    assert_eq!(session.pipeline().stages.len(), 16);
    assert_eq!(session.pipeline().stage("stage-build").unwrap().jobs.len(), 11);
    assert_unique_ids(session.pipeline());
}
