//! Edit panel rules
//!
//! The store accepts any value it is given. The checks a user sees while
//! editing (stage-name revert, read-only repository URL, which fields a job
//! type exposes) live here, on the presentation side of the store.

use crate::core::{Job, JobType, BRANCH, COMMANDS, LANGUAGE, REPO_URL};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Language choices offered for source jobs
pub const LANGUAGES: &[&str] = &[
    "Java",
    "Golang",
    "NodeJS",
    "Python",
    "PHP",
    "Ruby",
    "GCC",
    ".NET Core",
];

/// Stage holding the source checkouts
pub const SOURCE_STAGE_ID: &str = "stage-source";

/// Whether the editor offers adding a job to this stage
///
/// The source stage has no add button; the store itself accepts the job.
pub fn accepts_new_jobs(stage_id: &str) -> bool {
    stage_id != SOURCE_STAGE_ID
}

/// Decide what a stage-name edit commits to
///
/// The draft is trimmed. A blank or unchanged draft reverts (`None`).
pub fn commit_stage_name(current: &str, draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    if trimmed.is_empty() || draft == current || trimmed == current {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The job with a new name (blank names are allowed)
pub fn with_name(job: &Job, name: &str) -> Job {
    Job {
        name: name.to_string(),
        ..job.clone()
    }
}

/// The job with one config entry set, merged into its existing config
pub fn with_config_value(job: &Job, key: &str, value: &str) -> Job {
    job.clone().with_config(key, value)
}

/// Which form the edit panel shows for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelForm {
    /// Language, repository URL (read-only) and branch
    Source,
    /// Shell commands
    Commands,
}

impl PanelForm {
    pub fn for_job(job: &Job) -> Self {
        match job.job_type {
            JobType::Source => PanelForm::Source,
            _ => PanelForm::Commands,
        }
    }

    /// Panel heading
    pub fn title(&self) -> &'static str {
        match self {
            PanelForm::Source => "编辑源",
            PanelForm::Commands => "编辑任务",
        }
    }

    /// Fields shown, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            PanelForm::Source => &[Field::Name, Field::Language, Field::RepoUrl, Field::Branch],
            PanelForm::Commands => &[Field::Name, Field::Commands],
        }
    }
}

impl fmt::Display for PanelForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelForm::Source => f.write_str("source"),
            PanelForm::Commands => f.write_str("commands"),
        }
    }
}

/// An editable field of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Language,
    RepoUrl,
    Branch,
    Commands,
}

impl Field {
    /// Config key backing this field (`None` for the job name)
    pub fn config_key(&self) -> Option<&'static str> {
        match self {
            Field::Name => None,
            Field::Language => Some(LANGUAGE),
            Field::RepoUrl => Some(REPO_URL),
            Field::Branch => Some(BRANCH),
            Field::Commands => Some(COMMANDS),
        }
    }

    /// Current display value; missing config reads as empty
    pub fn value<'a>(&self, job: &'a Job) -> &'a str {
        match self.config_key() {
            Some(key) => job.config_value(key),
            None => job.name.as_str(),
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Field::RepoUrl)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key().unwrap_or("name"))
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "language" => Ok(Field::Language),
            "repoUrl" | "repo-url" => Ok(Field::RepoUrl),
            "branch" => Ok(Field::Branch),
            "commands" => Ok(Field::Commands),
            other => Err(FieldError::Unknown(other.to_string())),
        }
    }
}

/// Rejected panel edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    Unknown(String),

    #[error("field '{0}' is read-only")]
    ReadOnly(Field),

    #[error("field '{field}' is not part of the {form} form")]
    NotInForm { field: Field, form: PanelForm },

    #[error("unsupported language '{0}' (expected one of: {})", LANGUAGES.join(", "))]
    UnknownLanguage(String),
}

/// Build the job resulting from editing one panel field
pub fn set_field(job: &Job, field: Field, value: &str) -> Result<Job, FieldError> {
    let form = PanelForm::for_job(job);
    if !form.fields().contains(&field) {
        return Err(FieldError::NotInForm { field, form });
    }
    if field.is_read_only() {
        return Err(FieldError::ReadOnly(field));
    }
    if field == Field::Language && !LANGUAGES.contains(&value) {
        return Err(FieldError::UnknownLanguage(value.to_string()));
    }

    Ok(match field.config_key() {
        Some(key) => with_config_value(job, key, value),
        None => with_name(job, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_pipeline;

    #[test]
    fn test_commit_stage_name() {
        assert_eq!(commit_stage_name("构建", "  Build  "), Some("Build".to_string()));
        assert_eq!(commit_stage_name("构建", "   "), None);
        assert_eq!(commit_stage_name("构建", ""), None);
        assert_eq!(commit_stage_name("构建", "构建"), None);
        assert_eq!(commit_stage_name("构建", " 构建 "), None);
    }

    #[test]
    fn test_source_stage_takes_no_new_jobs() {
        assert!(!accepts_new_jobs(SOURCE_STAGE_ID));
        assert!(accepts_new_jobs("stage-build"));
        assert!(accepts_new_jobs("stage-1"));
    }

    #[test]
    fn test_forms_by_job_type() {
        let pipeline = sample_pipeline();
        let source = pipeline.find_job("job-source-1").unwrap();
        let build = pipeline.find_job("job-maven-build").unwrap();

        assert_eq!(PanelForm::for_job(source), PanelForm::Source);
        assert_eq!(PanelForm::for_job(source).title(), "编辑源");
        assert_eq!(PanelForm::for_job(build), PanelForm::Commands);
        assert_eq!(PanelForm::for_job(build).title(), "编辑任务");
    }

    #[test]
    fn test_config_edit_merges() {
        let pipeline = sample_pipeline();
        let source = pipeline.find_job("job-source-1").unwrap();

        let edited = set_field(source, Field::Branch, "develop").unwrap();
        assert_eq!(edited.config_value(BRANCH), "develop");
        assert_eq!(edited.config_value(LANGUAGE), "Java");
        assert_eq!(edited.config_value(REPO_URL), source.config_value(REPO_URL));
        assert_eq!(edited.id, source.id);
    }

    #[test]
    fn test_commands_on_job_without_config() {
        let pipeline = sample_pipeline();
        let build = pipeline.find_job("job-maven-build").unwrap();
        assert_eq!(Field::Commands.value(build), "");

        let edited = set_field(build, Field::Commands, "mvn -B package").unwrap();
        assert_eq!(Field::Commands.value(&edited), "mvn -B package");
        assert_eq!(edited.config.as_ref().map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_rejected_edits() {
        let pipeline = sample_pipeline();
        let source = pipeline.find_job("job-source-1").unwrap();
        let build = pipeline.find_job("job-maven-build").unwrap();

        assert_eq!(
            set_field(source, Field::RepoUrl, "https://elsewhere"),
            Err(FieldError::ReadOnly(Field::RepoUrl))
        );
        assert_eq!(
            set_field(build, Field::Branch, "main"),
            Err(FieldError::NotInForm {
                field: Field::Branch,
                form: PanelForm::Commands
            })
        );
        assert_eq!(
            set_field(source, Field::Commands, "ls"),
            Err(FieldError::NotInForm {
                field: Field::Commands,
                form: PanelForm::Source
            })
        );
        assert_eq!(
            set_field(source, Field::Language, "Cobol"),
            Err(FieldError::UnknownLanguage("Cobol".to_string()))
        );
    }

    #[test]
    fn test_blank_job_name_allowed() {
        let pipeline = sample_pipeline();
        let job = pipeline.find_job("job-deploy").unwrap();
        let edited = set_field(job, Field::Name, "").unwrap();
        assert_eq!(edited.name, "");
    }

    #[test]
    fn test_field_names() {
        assert_eq!("repo-url".parse::<Field>(), Ok(Field::RepoUrl));
        assert_eq!("repoUrl".parse::<Field>(), Ok(Field::RepoUrl));
        assert_eq!(Field::RepoUrl.to_string(), "repoUrl");
        assert_eq!(Field::Name.to_string(), "name");
        assert!("icon".parse::<Field>().is_err());
    }
}
